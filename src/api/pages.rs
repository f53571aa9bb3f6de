use std::sync::Arc;

use axum::{
    Extension,
    http::{HeaderMap, header::SET_COOKIE},
    response::{Html, IntoResponse, Json, Response},
};
use serde_json::{Value, json};

use crate::{server::AppState, session};

use super::redirect;

/// Scopes requested during login.
pub const LOGIN_SCOPES: &[&str] = &[
    "user-read-private",
    "user-read-email",
    "user-top-read",
    "playlist-read-private",
];

pub async fn index() -> Html<&'static str> {
    Html(
        "<h2>Taste Check</h2>\
         <p>See what you have been listening to, and let the critic weigh in.</p>\
         <p><a href=\"/login\">Log in with Spotify</a></p>",
    )
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Redirects (302) to Spotify's consent page.
pub async fn login(Extension(state): Extension<Arc<AppState>>) -> Response {
    redirect(&state.auth.authorization_url(LOGIN_SCOPES))
}

/// Clears the session and removes the session cookie.
pub async fn logout(headers: HeaderMap, Extension(state): Extension<Arc<AppState>>) -> Response {
    if let Some(sid) = session::session_id_from_headers(&headers, &state.secret_key) {
        state.sessions.clear(&sid).await;
    }
    ([(SET_COOKIE, session::clear_cookie_header())], redirect("/")).into_response()
}
