use std::sync::Arc;

use tastecheck::{Res, config, info, server};

#[tokio::main]
async fn main() -> Res<()> {
    config::load_env();

    let state = Arc::new(server::AppState::from_env());

    info!("Listening on {}", config::server_addr());
    server::start_api_server(state).await
}
