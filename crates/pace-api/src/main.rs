use tracing_subscriber::EnvFilter;

use pace_api::app;
use pace_api::config::ServerConfig;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ServerConfig::from_env()?;
    let state = app::build_state(&config)?;
    let router = app::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        chat_dir = %config.chat_dir.display(),
        model = %config.openai.model,
        "pace-api listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("pace-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
}
