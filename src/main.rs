//! LRU Cache Server - A bounded in-memory key-value cache
//!
//! Provides LRU eviction and lazy per-entry TTL expiration behind a small
//! HTTP API.

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::info;

use lru_cache_server::{api::create_router, logging, AppState, Config};

/// Main entry point for the cache server.
///
/// # Startup Sequence
/// 1. Parse configuration from flags and environment variables
/// 2. Initialize tracing subscriber for logging
/// 3. Create the cache with the configured capacity
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on the configured address
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.validate().context("invalid configuration")?;

    logging::init(config.log_level).context("failed to initialize logging")?;

    info!(
        cache_size = config.cache_size,
        default_ttl_secs = config.default_ttl.num_seconds(),
        host_port = %config.host_port,
        log_level = %config.log_level,
        "Configuration loaded"
    );

    let state = AppState::from_config(&config);
    info!(size = config.cache_size, "Created LRU cache");

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.host_port)
        .await
        .with_context(|| format!("failed to bind {}", config.host_port))?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Graceful shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
