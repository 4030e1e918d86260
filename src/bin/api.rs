use anyhow::{Context, Result};
use pageingest::{app_state::AppState, config::Config, server, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    telemetry::init_tracing(config.log_format())?;

    let app = server::router(AppState::new(&config));
    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;

    info!(
        addr = config.bind_addr(),
        max_body_bytes = config.max_body_bytes(),
        extract_timeout = ?config.extract_timeout(),
        max_concurrent_extractions = config.max_concurrent_extractions(),
        "ingestion server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
