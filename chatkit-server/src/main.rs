//! ChatKit Relay Server
//!
//! Accepts chat messages on `POST /chatkit/message`, relays them to the
//! OpenAI Responses API (session → thread → stateless fallback) and returns
//! the normalized reply. `GET /health` reports configured collaborators.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod cors;
mod router;
mod server;
mod state;

#[cfg(test)]
mod test_helpers;

use chatkit_core::config::{load_config, validate_config};
use cli::Cli;
use state::AppState;

fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    info!("🚀 ChatKit relay v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(cli.config.as_deref())?;
    cli.apply(&mut config);
    validate_config(&config)?;
    tracing::debug!("Resolved config: {:?}", config);

    let state = AppState::from_config(config).await?;
    info!("✅ Application state initialized");

    let listener = server::bind_listener(&state).await?;
    let addr = listener.local_addr()?;

    info!("🌐 Server listening on http://{}", addr);
    info!("💬 Relay endpoint at http://{}/chatkit/message", addr);

    server::serve_until(listener, state, server::shutdown_signal()).await?;
    info!("👋 Server stopped");
    Ok(())
}
