//! # Galen Server
//!
//! REST API for the pharmacy backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Galen Server                                │
//! │                                                                     │
//! │  Client ──► HTTP/JSON (3000) ──► Routes ──► Store ──► snapshot.json │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use galen_server::config::ServerConfig;
use galen_server::state::AppState;
use galen_server::{app, bootstrap_admin};
use galen_store::Store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Galen server...");

    let config = ServerConfig::load()?;
    info!(
        port = config.http_port,
        data_path = %config.data_path.display(),
        "Configuration loaded"
    );

    let store = Store::open(&config.data_path)?;
    info!(
        medicines = store.medicines().list().len(),
        sales = store.sales().list().len(),
        "Snapshot loaded"
    );

    bootstrap_admin(&store)?;

    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(AppState { store, config }))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
