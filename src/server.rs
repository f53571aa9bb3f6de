use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{
    api, config, error,
    judge::{ChatCompletionsCommentator, Commentator},
    session::{MemorySessionStore, SessionStore},
    spotify::{AuthClient, ResourceClient},
    warning,
};

/// Shared application state injected into every handler.
pub struct AppState {
    pub auth: AuthClient,
    pub resources: ResourceClient,
    pub sessions: Arc<dyn SessionStore>,
    pub commentator: Option<Arc<dyn Commentator>>,
    pub secret_key: String,
}

impl AppState {
    pub fn from_env() -> Self {
        let commentator = match ChatCompletionsCommentator::from_env() {
            Some(c) => Some(Arc::new(c) as Arc<dyn Commentator>),
            None => {
                warning!("GENERATOR_URL not set; judgment page will use the fallback commentary");
                None
            }
        };

        AppState {
            auth: AuthClient::from_env(),
            resources: ResourceClient::from_env(),
            sessions: Arc::new(MemorySessionStore::new()),
            commentator,
            secret_key: config::secret_key(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/logout", get(api::logout))
        .route("/profile", get(api::profile))
        .route("/top-tracks", get(api::top_tracks))
        .route("/top-artists", get(api::top_artists))
        .route("/judgment", get(api::judgment))
        .layer(Extension(state))
}

pub async fn start_api_server(state: Arc<AppState>) -> crate::Res<()> {
    let app = router(state);

    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
