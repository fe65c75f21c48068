//! Quizbot — study-question answering over configured AI chat backends.
//!
//! Startup sequence:
//! 1. Parse CLI flags, initialize logging
//! 2. Load config
//! 3. Build the provider registry (bad entries are skipped, not fatal)
//! 4. Serve `POST /query` until Ctrl+C

mod cors;
mod routes;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use quizbot_core::config::load_config;
use quizbot_providers::ProviderRegistry;
use quizbot_solver::Solver;

use state::AppState;

/// Quizbot — answers study questions via configured AI chat backends.
#[derive(Parser)]
#[command(name = "quizbot", version, about, long_about = None)]
struct Cli {
    /// Config file path (defaults to ~/.quizbot/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    let config = load_config(cli.config.as_deref());

    let registry = Arc::new(ProviderRegistry::from_entries(&config.ai_providers));
    if registry.is_empty() {
        warn!("no usable chat backends configured, every query will fail");
    } else {
        info!(backends = registry.len(), "provider registry ready");
    }

    let state = Arc::new(AppState::new(Solver::new(registry)));
    let app = routes::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, shutting down"),
        Err(e) => tracing::error!(error = %e, "failed to listen for shutdown signal"),
    }
}
