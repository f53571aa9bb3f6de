use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension,
    extract::Query,
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
};

use crate::{server::AppState, session, warning};

use super::redirect;

/// OAuth callback: exchanges the authorization code for tokens and issues
/// the session cookie.
///
/// A provider-reported `error` parameter (the user denied consent) is the
/// one failure surfaced verbatim, as a plain 200 message. A failed exchange
/// degrades to a login redirect like every other upstream failure.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    if let Some(error) = params.get("error") {
        return format!("Error: {error}").into_response();
    }

    let Some(code) = params.get("code") else {
        return "Error: missing authorization code".into_response();
    };

    match state.auth.exchange_code(code).await {
        Ok(token) => {
            let sid = session::new_session_id();
            state.sessions.set(&sid, token).await;
            let cookie = session::set_cookie_header(&state.secret_key, &sid);
            ([(SET_COOKIE, cookie)], redirect("/profile")).into_response()
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            redirect("/login")
        }
    }
}
