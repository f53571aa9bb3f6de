use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension,
    body::to_bytes,
    extract::Query,
    http::{
        HeaderMap, StatusCode,
        header::{COOKIE, LOCATION, SET_COOKIE},
    },
    response::Response,
};
use serde_json::json;
use tastecheck::api;
use tastecheck::server::AppState;
use tastecheck::session::{self, MemorySessionStore, SessionStore};
use tastecheck::spotify::{AuthClient, ResourceClient};
use tastecheck::types::Token;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "handler-test-secret";

fn app_state(server: &MockServer) -> Arc<AppState> {
    Arc::new(AppState {
        auth: AuthClient::new(
            "cid",
            "csecret",
            format!("{}/authorize", server.uri()),
            format!("{}/api/token", server.uri()),
            "http://localhost:8888/callback",
        ),
        resources: ResourceClient::new(server.uri()),
        sessions: Arc::new(MemorySessionStore::new()),
        commentator: None,
        secret_key: SECRET.to_string(),
    })
}

fn session_headers(sid: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        COOKIE,
        format!(
            "{}={}",
            session::SESSION_COOKIE,
            session::cookie_value(SECRET, sid)
        )
        .parse()
        .unwrap(),
    );
    headers
}

fn token(access: &str, refresh: Option<&str>) -> Token {
    Token {
        access_token: access.to_string(),
        refresh_token: refresh.map(String::from),
        expires_in: 3600,
        obtained_at: 0,
    }
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_protected_endpoints_redirect_without_session() {
    let server = MockServer::start().await;
    let state = app_state(&server);

    let responses = [
        api::profile(HeaderMap::new(), Extension(Arc::clone(&state))).await,
        api::top_tracks(
            HeaderMap::new(),
            Query(HashMap::new()),
            Extension(Arc::clone(&state)),
        )
        .await,
        api::top_artists(
            HeaderMap::new(),
            Query(HashMap::new()),
            Extension(Arc::clone(&state)),
        )
        .await,
        api::judgment(
            HeaderMap::new(),
            Query(HashMap::new()),
            Extension(Arc::clone(&state)),
        )
        .await,
    ];

    for response in responses {
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/login");
    }
}

#[tokio::test]
async fn test_top_tracks_handler_returns_retried_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/top/tracks"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access_token": "fresh" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/me/top/tracks"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id": "t1", "name": "Song One", "artists": [{ "id": "a1", "name": "Artist One" }] }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = app_state(&server);
    state.sessions.set("sid1", token("stale", Some("R"))).await;

    let response = api::top_tracks(
        session_headers("sid1"),
        Query(HashMap::new()),
        Extension(Arc::clone(&state)),
    )
    .await;

    // The retried data is rendered, not a login redirect
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Song One"));
    assert!(body.contains("Artist One"));
}

#[tokio::test]
async fn test_top_tracks_handler_redirects_when_refresh_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/top/tracks"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
        .mount(&server)
        .await;

    let state = app_state(&server);
    state.sessions.set("sid1", token("stale", Some("R"))).await;

    let response = api::top_tracks(
        session_headers("sid1"),
        Query(HashMap::new()),
        Extension(Arc::clone(&state)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_callback_error_param_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    let state = app_state(&server);

    let mut params = HashMap::new();
    params.insert("error".to_string(), "access_denied".to_string());

    let response = api::callback(Query(params), Extension(state)).await;

    // Plain 200 message, not a redirect
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Error: access_denied");
}

#[tokio::test]
async fn test_callback_exchanges_code_and_issues_session_cookie() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A",
            "refresh_token": "R",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = app_state(&server);

    let mut params = HashMap::new();
    params.insert("code".to_string(), "abc".to_string());

    let response = api::callback(Query(params), Extension(Arc::clone(&state))).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/profile");

    // The issued cookie names a session holding the exchanged token
    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("missing Set-Cookie header")
        .to_str()
        .unwrap();
    let value = cookie
        .strip_prefix(&format!("{}=", session::SESSION_COOKIE))
        .unwrap()
        .split(';')
        .next()
        .unwrap();
    let sid = session::verify_cookie_value(SECRET, value).expect("cookie should verify");
    let stored = state.sessions.get(&sid).await.expect("session should exist");
    assert_eq!(stored.access_token, "A");
    assert_eq!(stored.refresh_token.as_deref(), Some("R"));
}

#[tokio::test]
async fn test_callback_exchange_failure_redirects_to_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
        .mount(&server)
        .await;

    let state = app_state(&server);

    let mut params = HashMap::new();
    params.insert("code".to_string(), "bad".to_string());

    let response = api::callback(Query(params), Extension(state)).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_login_redirects_to_consent_page() {
    let server = MockServer::start().await;
    let state = app_state(&server);

    let response = api::login(Extension(state)).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    let target = location(&response);
    assert!(target.starts_with(&format!("{}/authorize?", server.uri())));
    assert!(target.contains(
        "client_id=cid&response_type=code&redirect_uri=http://localhost:8888/callback&scope=user-read-private user-read-email user-top-read playlist-read-private"
    ));
}

#[tokio::test]
async fn test_logout_clears_session_and_cookie() {
    let server = MockServer::start().await;
    let state = app_state(&server);
    state.sessions.set("sid1", token("A", Some("R"))).await;

    let response = api::logout(session_headers("sid1"), Extension(Arc::clone(&state))).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");
    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.contains("Max-Age=0"));
    assert!(state.sessions.get("sid1").await.is_none());
}
