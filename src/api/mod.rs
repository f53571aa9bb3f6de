//! # API Module
//!
//! HTTP handlers for the taste check web server. Every endpoint is an async
//! function wired into the [Axum](https://docs.rs/axum) router built in
//! [`crate::server`], with shared application state injected via `Extension`.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - Redirects the browser to Spotify's consent page
//! - [`callback`] - Receives the authorization code, exchanges it for
//!   tokens, and issues the session cookie
//! - [`logout`] - Clears the session and removes the cookie
//!
//! ### Listening stats (session required)
//!
//! - [`profile`] - The authenticated user's profile
//! - [`top_tracks`] - Top tracks over a `time_range`
//! - [`top_artists`] - Top artists over a `time_range`
//! - [`judgment`] - Top tracks plus generated taste commentary
//!
//! ### Misc
//!
//! - [`index`] - Landing page with a login link
//! - [`health`] - Health check returning application status and version
//!
//! All protected endpoints follow the same policy: on any upstream failure
//! the request goes through one refresh-and-retry cycle and then degrades to
//! a redirect to `/login`. The only provider error shown verbatim is the
//! `error` query parameter on `/callback` (the user denied consent).

mod callback;
mod pages;
mod stats;

pub use callback::callback;
pub use pages::{health, index, login, logout};
pub use stats::{judgment, profile, top_artists, top_tracks};

use axum::{
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};

/// Plain 302 redirect. `axum::response::Redirect` answers 303/307/308; the
/// provider round-trip and the login fallback use classic 302 semantics.
pub(crate) fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

/// Minimal HTML escaping for values interpolated into page bodies.
pub(crate) fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
