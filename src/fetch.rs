//! Request orchestration: attempt, refresh, retry once.
//!
//! Every protected page goes through [`fetch_with_refresh`], which implements
//! a small state machine per incoming request:
//!
//! ```text
//! NoSession ──────────────────────────────▶ LoginRequired
//! Attempt ── success ─────────────────────▶ Fetched(result)
//!    │ failure
//!    ▼
//! RefreshCheck ── no refresh token ───────▶ LoginRequired
//!    │ refresh
//!    ├─ refresh failed ───────────────────▶ LoginRequired
//!    └─ refresh ok ── retry once ─ success ▶ Fetched(result)
//!                            └─ failure ──▶ LoginRequired
//! ```
//!
//! The retry budget is exactly one refresh-and-retry cycle per request. A
//! failure after the retried attempt never loops back into another refresh;
//! it degrades to "please log in again". Provider errors are therefore never
//! surfaced to the user as hard failures.
//!
//! Any resource failure triggers the refresh path, regardless of status
//! code; the orchestrator does not distinguish a 401 from other upstream
//! failures.

use std::future::Future;

use crate::{error::ApiError, session::SessionStore, spotify::AuthClient, warning};

/// Outcome of an orchestrated resource fetch.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// The resource call (original or retried) succeeded.
    Fetched(T),
    /// No usable session remains; the user must log in again.
    LoginRequired,
}

impl<T> FetchOutcome<T> {
    pub fn fetched(self) -> Option<T> {
        match self {
            FetchOutcome::Fetched(value) => Some(value),
            FetchOutcome::LoginRequired => None,
        }
    }
}

/// Runs a resource call with the session's access token, refreshing and
/// retrying once on failure.
///
/// `call` receives the access token to use for one attempt; it is invoked at
/// most twice. On a successful refresh the session store is updated before
/// the retry, and a refresh response that omits the refresh token keeps the
/// previously stored one so the next request can still refresh.
pub async fn fetch_with_refresh<T, F, Fut>(
    auth: &AuthClient,
    sessions: &dyn SessionStore,
    sid: Option<&str>,
    call: F,
) -> FetchOutcome<T>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let Some(sid) = sid else {
        return FetchOutcome::LoginRequired;
    };
    let Some(token) = sessions.get(sid).await else {
        return FetchOutcome::LoginRequired;
    };

    let err = match call(token.access_token.clone()).await {
        Ok(value) => return FetchOutcome::Fetched(value),
        Err(err) => err,
    };
    warning!("Resource call failed, attempting token refresh: {}", err);

    let Some(refresh_token) = token.refresh_token.clone() else {
        warning!("No refresh token in session, forcing re-login");
        return FetchOutcome::LoginRequired;
    };

    let mut fresh = match auth.refresh_access_token(&refresh_token).await {
        Ok(fresh) => fresh,
        Err(err) => {
            warning!("Token refresh failed, forcing re-login: {}", err);
            return FetchOutcome::LoginRequired;
        }
    };
    if fresh.refresh_token.is_none() {
        fresh.refresh_token = Some(refresh_token);
    }
    sessions.set(sid, fresh.clone()).await;

    match call(fresh.access_token).await {
        Ok(value) => FetchOutcome::Fetched(value),
        Err(err) => {
            // Retry budget spent; no second refresh.
            warning!("Retried call failed, forcing re-login: {}", err);
            FetchOutcome::LoginRequired
        }
    }
}
