//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by the
//! taste check app: the OAuth 2.0 authorization-code flow and the resource
//! endpoints behind the stats pages. It is the only layer that talks HTTP to
//! Spotify; everything above it works with typed results and structured
//! errors.
//!
//! ## Architecture
//!
//! ```text
//! HTTP handlers (api) / Orchestrator (fetch)
//!          ↓
//! Spotify Integration Layer
//!     ├── AuthClient  (consent URL, code exchange, token refresh)
//!     └── ResourceClient (profile, top tracks, top artists)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Authentication Strategy
//!
//! The app is a confidential server-side client, so it uses the plain
//! authorization-code flow with an HTTP Basic credential built from the
//! client id and secret (base64 of `id:secret`):
//!
//! 1. **Consent URL**: [`AuthClient::authorization_url`] sends the user to
//!    Spotify with the requested scopes.
//! 2. **Callback**: Spotify redirects back with a short-lived code.
//! 3. **Code Exchange**: [`AuthClient::exchange_code`] trades the code for an
//!    access/refresh token pair.
//! 4. **Refresh**: [`AuthClient::refresh_access_token`] obtains a new access
//!    token without re-prompting the user.
//!
//! A token response may legitimately omit the refresh token (Spotify does
//! this on re-consent); that case is logged and degrades to forcing a fresh
//! login when the access token eventually expires.
//!
//! ## Error Handling
//!
//! Every non-2xx upstream response becomes an [`crate::error::ApiError`]
//! variant carrying the status code and raw body. The resource client does
//! not try to classify failures: the orchestrator treats any resource error
//! as a refresh trigger, so a 401 and a 502 take the same recovery path.
//!
//! ## API Coverage
//!
//! - `GET /me` - Current user's profile
//! - `GET /me/top/tracks` - Top tracks over a time range
//! - `GET /me/top/artists` - Top artists over a time range
//! - `POST /api/token` - Token exchange and refresh operations

pub mod auth;
pub mod resources;

pub use auth::AuthClient;
pub use resources::ResourceClient;
