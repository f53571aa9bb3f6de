//! Error types for upstream provider and generator failures.
//!
//! Every variant that stems from a non-2xx upstream response carries the
//! HTTP status code and the raw response body for diagnostics. None of these
//! errors ever reach the browser as a hard failure; the handlers absorb them
//! into a login redirect (or, for the judgment page, a fallback commentary).

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Token exchange failed: {status}, {body}")]
    AuthExchange { status: u16, body: String },

    #[error("Token refresh failed: {status}, {body}")]
    Refresh { status: u16, body: String },

    #[error("{endpoint} request failed: {status}, {body}")]
    Resource {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Text generation failed: {status}, {body}")]
    Generator { status: u16, body: String },

    #[error("Unexpected response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// Upstream HTTP status for provider-reported failures, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::AuthExchange { status, .. }
            | ApiError::Refresh { status, .. }
            | ApiError::Resource { status, .. }
            | ApiError::Generator { status, .. } => Some(*status),
            ApiError::Parse(_) | ApiError::Http(_) => None,
        }
    }
}
