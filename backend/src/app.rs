//! Process setup: logging, index client, HTTP listener.

use anyhow::Context;

use crate::config::{Config, ENV_LOG};
use crate::db_utils::manticore_utils::SearchBackend;
use crate::server;

pub fn init_logging() {
    let filter = std::env::var(ENV_LOG)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .compact()
        .with_env_filter(filter)
        .init();
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    init_logging();

    let backend = SearchBackend::from_config(&config);
    tracing::info!(
        manticore_url = %config.manticore_url,
        index = %config.index_name,
        cache = backend.cache_enabled(),
        "search backend configured"
    );

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    tracing::info!("listening on http://{address}");

    axum::serve(listener, server::router(backend))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
