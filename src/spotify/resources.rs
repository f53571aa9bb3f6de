use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    config,
    error::ApiError,
    types::{TimeRange, TopArtists, TopTracks, UserProfile},
};

use super::auth::http_client;

/// Client for the Spotify Web API resource endpoints.
///
/// Each call issues a GET with a Bearer header and fails with
/// [`ApiError::Resource`] on any non-2xx status. No status classification
/// happens here; the orchestrator decides what a failure means.
pub struct ResourceClient {
    http: Client,
    api_url: String,
}

impl ResourceClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        ResourceClient {
            http: http_client(),
            api_url: api_url.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(config::spotify_api_url())
    }

    /// Retrieves the authenticated user's profile.
    pub async fn get_profile(&self, access_token: &str) -> Result<UserProfile, ApiError> {
        let url = format!("{}/me", self.api_url);
        self.get_json("profile", url, access_token).await
    }

    /// Retrieves the user's top tracks.
    ///
    /// `time_range`: short_term (4 weeks), medium_term (6 months),
    /// long_term (years).
    pub async fn get_top_tracks(
        &self,
        access_token: &str,
        limit: u32,
        time_range: TimeRange,
    ) -> Result<TopTracks, ApiError> {
        let url = format!(
            "{}/me/top/tracks?limit={}&time_range={}",
            self.api_url, limit, time_range
        );
        self.get_json("top tracks", url, access_token).await
    }

    /// Retrieves the user's top artists.
    pub async fn get_top_artists(
        &self,
        access_token: &str,
        limit: u32,
        time_range: TimeRange,
    ) -> Result<TopArtists, ApiError> {
        let url = format!(
            "{}/me/top/artists?limit={}&time_range={}",
            self.api_url, limit, time_range
        );
        self.get_json("top artists", url, access_token).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        url: String,
        access_token: &str,
    ) -> Result<T, ApiError> {
        let res = self.http.get(&url).bearer_auth(access_token).send().await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(ApiError::Resource {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Default page size for the top-items endpoints.
pub const DEFAULT_LIMIT: u32 = 10;
