//! Per-browser session store and signed session cookies.
//!
//! Tokens live in a single per-browser session and nowhere else. The store is
//! a key-value abstraction (get/set/clear by session id) so the in-memory
//! implementation can be swapped without touching the handlers. Session ids
//! travel in a cookie whose value is signed with the `SECRET_KEY` so a
//! browser cannot mint or alter one.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::HeaderMap;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::types::Token;

pub const SESSION_COOKIE: &str = "tastecheck_session";

/// Key-value session store keyed by session id.
///
/// Read-then-write within a single request is the only access pattern; each
/// operation is atomic per key, so no cross-request locking is needed.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, sid: &str) -> Option<Token>;
    async fn set(&self, sid: &str, token: Token);
    async fn clear(&self, sid: &str);
}

/// In-memory session store. Sessions vanish on process restart, which is the
/// intended lifecycle: the user just logs in again.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<HashMap<String, Token>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, sid: &str) -> Option<Token> {
        self.inner.lock().await.get(sid).cloned()
    }

    async fn set(&self, sid: &str, token: Token) {
        self.inner.lock().await.insert(sid.to_string(), token);
    }

    async fn clear(&self, sid: &str) {
        self.inner.lock().await.remove(sid);
    }
}

/// Generates a fresh random session id (32 alphanumeric characters).
pub fn new_session_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

fn signature(secret: &str, sid: &str) -> String {
    let hash = Sha256::digest(format!("{secret}:{sid}").as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Builds the signed cookie value `<sid>.<signature>`.
pub fn cookie_value(secret: &str, sid: &str) -> String {
    format!("{sid}.{}", signature(secret, sid))
}

/// Verifies a signed cookie value and returns the session id it names.
///
/// Tampered, truncated, or foreign-keyed values yield `None`, which the
/// handlers treat the same as no session at all.
pub fn verify_cookie_value(secret: &str, value: &str) -> Option<String> {
    let (sid, sig) = value.split_once('.')?;
    if sid.is_empty() || sig != signature(secret, sid) {
        return None;
    }
    Some(sid.to_string())
}

/// Builds the `Set-Cookie` header value issuing a session cookie.
pub fn set_cookie_header(secret: &str, sid: &str) -> String {
    format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
        cookie_value(secret, sid)
    )
}

/// Builds the `Set-Cookie` header value that removes the session cookie.
pub fn clear_cookie_header() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0")
}

/// Extracts and verifies the session id from a request's `Cookie` header.
pub fn session_id_from_headers(headers: &HeaderMap, secret: &str) -> Option<String> {
    let cookies = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name != SESSION_COOKIE {
            return None;
        }
        verify_cookie_value(secret, value)
    })
}
