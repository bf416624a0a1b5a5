// =============================================================================
// StockLens — Stock dashboard backend, Main Entry Point
// =============================================================================
//
// Serves the dashboard's data needs under `/api`: the company list, five
// years of (mock or proxied) historical prices, quotes, price predictions,
// persisted favorites, and the merged technical-indicator chart the
// favorites view renders.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod app_state;
mod favorites;
mod indicators;
mod market_data;
mod runtime_config;
mod types;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::runtime_config::RuntimeConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = RuntimeConfig::load("runtime_config.json").unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });

    // Env overrides for containerised deployments.
    if let Ok(addr) = std::env::var("STOCKLENS_BIND_ADDR") {
        config.bind_addr = addr;
    }
    if let Ok(base) = std::env::var("STOCKLENS_REMOTE_BASE_URL") {
        config.remote_base_url = Some(base);
    }

    info!(
        bind_addr = %config.bind_addr,
        remote = config.remote_base_url.as_deref().unwrap_or("(mock data)"),
        "StockLens backend starting"
    );

    // ── 2. Build shared state ────────────────────────────────────────────
    let state = Arc::new(AppState::new(config));

    // ── 3. Serve the REST API ────────────────────────────────────────────
    let bind_addr = state.runtime_config.read().bind_addr.clone();
    let app = api::rest::router(state.clone());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            warn!("Shutdown signal received — stopping gracefully");
        })
        .await?;

    if let Err(e) = state.runtime_config.read().save("runtime_config.json") {
        warn!(error = %e, "Failed to save runtime config on shutdown");
    }

    info!("StockLens backend shut down complete.");
    Ok(())
}
