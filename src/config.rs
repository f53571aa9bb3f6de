//! Configuration management for the taste check web app.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and a `.env` file. It provides a centralized way to
//! manage application configuration including Spotify API credentials, the
//! session signing key, server settings, and endpoint URLs.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. Application defaults (where applicable)

use std::env;

/// Fixed OAuth redirect target registered with the Spotify application.
///
/// Spotify validates this against the redirect URI configured in the
/// developer dashboard, so it is a constant rather than an environment
/// variable. It must match the address the server binds by default.
pub const REDIRECT_URI: &str = "http://localhost:8888/callback";

/// Loads environment variables from a `.env` file in the working directory.
///
/// Missing `.env` files are not an error; configuration may come entirely
/// from the process environment. Individual accessors panic when a required
/// variable is absent.
pub fn load_env() {
    dotenv::dotenv().ok();
}

/// Returns the address the HTTP server binds to.
///
/// Retrieves the `SERVER_ADDRESS` environment variable, defaulting to
/// `127.0.0.1:8888` which matches the port baked into [`REDIRECT_URI`].
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8888".to_string())
}

/// Returns the Spotify API client ID for authentication.
///
/// Retrieves the `CLIENT_ID` environment variable which contains the client
/// ID obtained when registering the application with Spotify's developer
/// platform.
///
/// # Panics
///
/// Panics if the `CLIENT_ID` environment variable is not set.
pub fn client_id() -> String {
    env::var("CLIENT_ID").expect("CLIENT_ID must be set")
}

/// Returns the Spotify API client secret for authentication.
///
/// Retrieves the `CLIENT_SECRET` environment variable. Together with the
/// client ID it forms the HTTP Basic credential sent to the token endpoint.
///
/// # Panics
///
/// Panics if the `CLIENT_SECRET` environment variable is not set.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn client_secret() -> String {
    env::var("CLIENT_SECRET").expect("CLIENT_SECRET must be set")
}

/// Returns the session cookie signing key.
///
/// Retrieves the `SECRET_KEY` environment variable used to sign session
/// cookie values so a browser cannot forge a session id.
///
/// # Panics
///
/// Panics if the `SECRET_KEY` environment variable is not set.
pub fn secret_key() -> String {
    env::var("SECRET_KEY").expect("SECRET_KEY must be set")
}

/// Returns the Spotify OAuth authorization URL.
///
/// The `SPOTIFY_AUTH_URL` environment variable overrides the production
/// endpoint where users are redirected to grant permissions.
pub fn spotify_auth_url() -> String {
    env::var("SPOTIFY_AUTH_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/authorize".to_string())
}

/// Returns the Spotify OAuth token exchange URL.
///
/// The `SPOTIFY_TOKEN_URL` environment variable overrides the production
/// endpoint used for both the authorization-code exchange and token refresh.
pub fn spotify_token_url() -> String {
    env::var("SPOTIFY_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the Spotify Web API base URL.
///
/// The `SPOTIFY_API_URL` environment variable overrides the production
/// endpoint used for all resource calls after authentication.
pub fn spotify_api_url() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the chat-completions URL of the external text generator, if any.
///
/// When `GENERATOR_URL` is unset the judgment page falls back to a fixed
/// commentary message instead of calling out to a language model.
pub fn generator_url() -> Option<String> {
    env::var("GENERATOR_URL").ok()
}

/// Returns the API key for the external text generator.
pub fn generator_api_key() -> String {
    env::var("GENERATOR_API_KEY").unwrap_or_default()
}
