use std::sync::Arc;

use anyhow::Result;
use pressgate::{app, app_state::AppState, backend::WordPressClient, config::Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    let source = WordPressClient::new(config.backend_url().clone(), config.related_posts_count())?;
    let bind_addr = config.bind_addr().to_string();

    info!(
        backend = %config.backend_url(),
        external_host = %config.external_host(),
        "Starting pressgate"
    );

    let state = AppState::new(config, Arc::new(source))?;
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Listening");

    axum::serve(listener, app::router(state)).await?;
    Ok(())
}

// LOG_FORMAT=json switches to structured output; filtering follows RUST_LOG.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=debug"));

    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
