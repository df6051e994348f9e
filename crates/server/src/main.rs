//! seoshell server entry point.
//!
//! Boots the HTTP server that answers crawlers with synthesized metadata
//! documents and everyone else with the compiled single-page application.
//! Logs are JSON on stdout.

use anyhow::Result;
use seoshell_core::{AppConfig, Error};
use tracing_subscriber::EnvFilter;

mod assets;
mod error;
mod handler;
mod routes;
mod state;

use state::AppState;

/// Report on the build directory. A missing build is not fatal; the
/// application routes answer 404 until it appears.
async fn check_build(state: &AppState) {
    let index = state.index_path();
    match tokio::fs::try_exists(&index).await {
        Ok(true) => tracing::info!("serving application from {}", state.config.build_dir.display()),
        Ok(false) => tracing::warn!("application build not found at {}", index.display()),
        Err(e) => tracing::warn!("cannot inspect {}: {}", index.display(), e),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let state = AppConfig::load()
        .map_err(Error::from)
        .and_then(AppState::from_config)
        .inspect_err(|e| tracing::error!(code = e.code(), "startup failed: {}", e))?;

    let addr = state.config.listen_addr();
    tracing::info!("content API at {}", state.config.content_api_base);
    check_build(&state).await;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("seoshell listening on {}", addr);

    axum::serve(listener, routes::router(state)).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}
