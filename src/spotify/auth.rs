use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;

use crate::{
    config,
    error::ApiError,
    types::{Token, TokenResponse},
    warning,
};

/// Client for Spotify's accounts service: consent URL construction, the
/// authorization-code exchange, and token refresh.
pub struct AuthClient {
    http: Client,
    client_id: String,
    client_secret: String,
    auth_url: String,
    token_url: String,
    redirect_uri: String,
}

impl AuthClient {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        auth_url: impl Into<String>,
        token_url: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        AuthClient {
            http: http_client(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_url: auth_url.into(),
            token_url: token_url.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(
            config::client_id(),
            config::client_secret(),
            config::spotify_auth_url(),
            config::spotify_token_url(),
            config::REDIRECT_URI,
        )
    }

    /// Constructs the provider consent URL for the given scopes.
    ///
    /// Pure string construction: client id, `response_type=code`, the fixed
    /// redirect target, and the scopes joined by spaces, in that order.
    pub fn authorization_url(&self, scopes: &[&str]) -> String {
        format!(
            "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}",
            auth_url = self.auth_url,
            client_id = self.client_id,
            redirect_uri = self.redirect_uri,
            scope = scopes.join(" ")
        )
    }

    /// Exchanges an authorization code for an access/refresh token pair.
    ///
    /// Sends a credentialed POST to the token endpoint with the Basic header
    /// built from `base64(client_id:client_secret)`. A missing refresh token
    /// in a successful response is logged, not fatal.
    pub async fn exchange_code(&self, code: &str) -> Result<Token, ApiError> {
        let res = self
            .http
            .post(&self.token_url)
            .header("Authorization", self.basic_credentials())
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", &self.redirect_uri),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(ApiError::AuthExchange {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TokenResponse = serde_json::from_str(&body)?;
        if parsed.refresh_token.is_none() {
            warning!("No refresh token received from Spotify API");
        }

        Ok(Token::from_response(parsed))
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// Spotify typically omits the refresh token from refresh responses; the
    /// caller is responsible for preserving the stored one in that case.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<Token, ApiError> {
        let res = self
            .http
            .post(&self.token_url)
            .header("Authorization", self.basic_credentials())
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(ApiError::Refresh {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TokenResponse = serde_json::from_str(&body)?;
        Ok(Token::from_response(parsed))
    }

    fn basic_credentials(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

pub(crate) fn http_client() -> Client {
    // Bounded timeout so a slow upstream cannot pin a worker indefinitely.
    Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .expect("failed to build HTTP client")
}
