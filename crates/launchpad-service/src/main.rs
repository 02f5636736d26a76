//! Game Launchpad Service - HTTP API for publishing on-chain games
//!
//! This is the main entry point for the launchpad service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use launchpad_service::{create_router, AppState, ServiceConfig};
use launchpad_store::SqliteStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,launchpad=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Game Launchpad Service");

    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        database_url = %config.database_url,
        uploads_dir = %config.uploads_dir.display(),
        docs_dir = %config.docs_dir.display(),
        encryption_configured = %config.encryption_key.is_some(),
        "Service configuration loaded"
    );

    tracing::info!(url = %config.database_url, "Opening SQLite store");
    let store = Arc::new(SqliteStore::open(&config.database_url).await?);

    let state = AppState::new(store, config.clone())?;

    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
