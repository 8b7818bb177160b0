use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use snip::{
    api,
    config::{Config, LogConfig},
    db, logging,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = logging::init_logging(&LogConfig::load());
    let config = Config::load();

    // one store client for the whole process, shared by both handlers
    let store = db::connect(&config.store)
        .await
        .context("failed to connect to mapping store")?;

    let state = AppState::new(store, config.base_url.clone(), config.gateway.clone());
    let app = api::router(state, config.request_timeout);

    let listener = tokio::net::TcpListener::bind(&config.server_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server_addr))?;
    info!(addr = %config.server_addr, base_url = %config.base_url, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
