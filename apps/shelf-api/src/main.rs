//! # Shelf API Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shelf API Server                                 │
//! │                                                                         │
//! │  Client ───► HTTP (8080) ───► CatalogService ───► SQLite               │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                              ReservationStore                           │
//! │                                (in memory)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};

use shelf_api::{init_tracing, router, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Shelf API server...");

    let config = ApiConfig::load().context("loading configuration")?;
    info!(
        addr = %config.bind_addr,
        db_path = %config.db_path.display(),
        max_connections = config.db_max_connections,
        run_migrations = config.db_run_migrations,
        seed_inventory = config.seed_inventory,
        "Configuration loaded"
    );

    let state = AppState::from_config(&config).await?;
    let db = state.catalog.database().clone();
    info!("Database connected");

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "Listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
