//! Taste judgment: formats the user's top tracks into a prompt and asks an
//! external text generator for commentary.
//!
//! The generator sits behind the [`Commentator`] trait so the HTTP
//! implementation can be swapped or mocked. Generator failures never fail
//! the page; the handler substitutes [`FALLBACK_COMMENTARY`].

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::{config, error::ApiError, spotify::auth::http_client, types::Track, warning};

/// Shown when the generator is unconfigured or errors out.
pub const FALLBACK_COMMENTARY: &str =
    "The critic has stepped out for coffee. Your taste survives unjudged, for now.";

const PERSONA_PREAMBLE: &str = "You are a merciless but witty music critic. \
Given a listener's top tracks, deliver a short, humorous verdict on their \
taste in two or three sentences. Be playful, not cruel.";

/// How many tracks make it into the prompt and the rendered list.
pub const JUDGED_TRACKS: usize = 10;

/// Capability interface for the external text generator.
#[async_trait]
pub trait Commentator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ApiError>;
}

/// [`Commentator`] backed by an OpenAI-style chat-completions endpoint.
pub struct ChatCompletionsCommentator {
    http: Client,
    url: String,
    api_key: String,
}

impl ChatCompletionsCommentator {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        ChatCompletionsCommentator {
            http: http_client(),
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// Builds the commentator from `GENERATOR_URL`/`GENERATOR_API_KEY`, or
    /// `None` when no generator is configured.
    pub fn from_env() -> Option<Self> {
        config::generator_url().map(|url| Self::new(url, config::generator_api_key()))
    }
}

#[async_trait]
impl Commentator for ChatCompletionsCommentator {
    async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        let res = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "messages": [
                    { "role": "system", "content": PERSONA_PREAMBLE },
                    { "role": "user", "content": prompt },
                ],
            }))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(ApiError::Generator {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: Value = serde_json::from_str(&body)?;
        match parsed["choices"][0]["message"]["content"].as_str() {
            Some(text) => Ok(text.trim().to_string()),
            None => Err(ApiError::Generator {
                status: status.as_u16(),
                body,
            }),
        }
    }
}

/// Formats tracks as a numbered `N. Title by Artist1, Artist2` list,
/// truncated to [`JUDGED_TRACKS`] lines.
pub fn format_track_list(tracks: &[Track]) -> String {
    tracks
        .iter()
        .take(JUDGED_TRACKS)
        .enumerate()
        .map(|(i, track)| {
            let artists = track
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}. {} by {}", i + 1, track.name, artists)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the prompt sent to the generator for a formatted track list.
pub fn judgment_prompt(track_list: &str) -> String {
    format!("Here are my current top tracks:\n{track_list}\n\nWhat is your verdict?")
}

/// Asks the commentator for a verdict, substituting the fallback message
/// when no generator is configured or the call fails.
pub async fn commentary_for(commentator: Option<&dyn Commentator>, track_list: &str) -> String {
    let Some(commentator) = commentator else {
        return FALLBACK_COMMENTARY.to_string();
    };

    match commentator.generate(&judgment_prompt(track_list)).await {
        Ok(text) => text,
        Err(err) => {
            warning!("Text generation failed, using fallback: {}", err);
            FALLBACK_COMMENTARY.to_string()
        }
    }
}
