//! Listener binding and the serve / drain / close lifecycle.

use std::future::Future;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::router::build_router;
use crate::state::AppState;

/// Bind `bind_address:port` from the resolved config. Host names are resolved.
pub async fn bind_listener(state: &AppState) -> Result<TcpListener> {
    let config = state.config();
    let host = config.get_bind_address();
    let listener = TcpListener::bind((host, config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, config.port))?;
    info!("🔌 Bound {}", listener.local_addr()?);
    Ok(listener)
}

/// Serve the relay until `shutdown` resolves, then close the database pool.
pub async fn serve_until<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state.clone());
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    state.shutdown().await;
    Ok(())
}

/// Ctrl-C or SIGTERM. A handler that cannot be installed is logged and never
/// fires; the other one still can.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("⚠️ Ctrl+C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            },
            Err(e) => {
                warn!("⚠️ SIGTERM handler unavailable: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("🛑 Received Ctrl+C"),
        () = terminate => info!("🛑 Received SIGTERM"),
    }

    info!("⏳ Finishing in-flight relay calls...");
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod server_tests;
