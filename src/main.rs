// Main entry point - Dependency injection, refresh loop and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use tokio::sync::watch;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::pipeline_service::PipelineService;
use crate::application::refresh::{run_refresh_loop, REFRESH_INTERVAL};
use crate::infrastructure::chart_board::ChartBoard;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_csv_source::HttpCsvSource;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;

    // Source and renderer (infrastructure layer)
    let source = Arc::new(HttpCsvSource::new(&config.source)?);
    let board = Arc::new(ChartBoard::new());

    // Refresh cycle (application layer)
    let service = PipelineService::new(source, board.clone(), config.pipelines);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresh = tokio::spawn(run_refresh_loop(service, REFRESH_INTERVAL, shutdown_rx));

    // Build router (presentation layer)
    let state = Arc::new(AppState { board });
    let router = router(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    // Start server
    tracing::info!(%addr, "starting station-dashboard");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
            tracing::info!("shutting down");
            let _ = shutdown_tx.send(true);
        })
        .await?;

    refresh.await?;
    Ok(())
}
