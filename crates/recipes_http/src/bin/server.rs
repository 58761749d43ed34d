//! Recipes HTTP server entry point.

use anyhow::{anyhow, Context};
use clap::Parser;
use log::{info, warn};
use recipes_http::{create_router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    config.init_logging().map_err(|err| anyhow!(err))?;

    let store = config
        .open_store()
        .with_context(|| format!("failed to open {:?} recipe store", config.backend))?;
    let app = create_router(config.router, AppState::new(store));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(
        "event=server_start module=http status=ok bind={} backend={:?} router={:?} on_duplicate={:?}",
        config.bind, config.backend, config.router, config.on_duplicate
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("event=server_stop module=http status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=server_stop module=http status=error error_code=signal_listen_failed error={err}");
    }
}
