use async_trait::async_trait;
use serde_json::json;
use tastecheck::error::ApiError;
use tastecheck::judge::{
    ChatCompletionsCommentator, Commentator, FALLBACK_COMMENTARY, commentary_for,
    format_track_list, judgment_prompt,
};
use tastecheck::types::{Track, TrackArtist};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn track(n: usize) -> Track {
    Track {
        id: format!("t{n}"),
        name: format!("Track {n}"),
        artists: vec![TrackArtist {
            id: format!("a{n}"),
            name: format!("Artist {n}"),
        }],
    }
}

struct CannedCritic;

#[async_trait]
impl Commentator for CannedCritic {
    async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        assert!(prompt.contains("top tracks"));
        Ok("Bold choices. Questionable, but bold.".to_string())
    }
}

struct BrokenCritic;

#[async_trait]
impl Commentator for BrokenCritic {
    async fn generate(&self, _prompt: &str) -> Result<String, ApiError> {
        Err(ApiError::Generator {
            status: 503,
            body: "overloaded".to_string(),
        })
    }
}

#[test]
fn test_format_track_list_truncates_to_ten() {
    let tracks: Vec<Track> = (1..=12).map(track).collect();
    let formatted = format_track_list(&tracks);

    let lines: Vec<&str> = formatted.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "1. Track 1 by Artist 1");
    assert_eq!(lines[9], "10. Track 10 by Artist 10");
    assert!(!formatted.contains("Track 11"));
}

#[test]
fn test_format_track_list_short_list() {
    let tracks: Vec<Track> = (1..=3).map(track).collect();
    let formatted = format_track_list(&tracks);
    assert_eq!(formatted.lines().count(), 3);
}

#[test]
fn test_format_track_list_joins_artists() {
    let mut t = track(1);
    t.artists.push(TrackArtist {
        id: "a2".to_string(),
        name: "Artist 2".to_string(),
    });

    let formatted = format_track_list(&[t]);
    assert_eq!(formatted, "1. Track 1 by Artist 1, Artist 2");
}

#[test]
fn test_judgment_prompt_embeds_track_list() {
    let prompt = judgment_prompt("1. Track 1 by Artist 1");
    assert!(prompt.contains("1. Track 1 by Artist 1"));
    assert!(prompt.contains("verdict"));
}

#[tokio::test]
async fn test_commentary_for_unconfigured_generator() {
    let commentary = commentary_for(None, "1. Track 1 by Artist 1").await;
    assert_eq!(commentary, FALLBACK_COMMENTARY);
}

#[tokio::test]
async fn test_commentary_for_failing_generator_falls_back() {
    let critic = BrokenCritic;
    let commentary = commentary_for(Some(&critic), "1. Track 1 by Artist 1").await;
    assert_eq!(commentary, FALLBACK_COMMENTARY);
}

#[tokio::test]
async fn test_commentary_for_working_generator() {
    let critic = CannedCritic;
    let commentary = commentary_for(Some(&critic), "1. Track 1 by Artist 1").await;
    assert_eq!(commentary, "Bold choices. Questionable, but bold.");
}

#[tokio::test]
async fn test_chat_completions_commentator_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("music critic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "  A verdict.  " } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let critic =
        ChatCompletionsCommentator::new(format!("{}/v1/chat/completions", server.uri()), "key");
    let text = critic.generate("judge me").await.unwrap();
    assert_eq!(text, "A verdict.");
}

#[tokio::test]
async fn test_chat_completions_commentator_error_carries_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let critic =
        ChatCompletionsCommentator::new(format!("{}/v1/chat/completions", server.uri()), "key");
    let err = critic.generate("judge me").await.unwrap_err();

    match err {
        ApiError::Generator { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("expected Generator error, got: {other}"),
    }
}

#[tokio::test]
async fn test_chat_completions_commentator_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let critic =
        ChatCompletionsCommentator::new(format!("{}/v1/chat/completions", server.uri()), "key");
    assert!(critic.generate("judge me").await.is_err());
}
