//! `Pulse` Server - Main Entry Point
//!
//! Role and permission backend for the analytics dashboard.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing::info;

use pulse_server::{api, config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulse_server=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Pulse Server"
    );

    // Load the role permission table once; it is read-only from here on
    let table = config
        .load_permission_table()
        .context("Failed to load permission table")?;
    info!(
        roles = table.len(),
        custom = config.permission_table_path.is_some(),
        "Permission table ready"
    );

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("BIND_ADDRESS must be a socket address")?;

    let state = api::AppState::new(config, table);
    let app = api::create_router(state);

    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
    }
    info!("Shutdown signal received");
}
