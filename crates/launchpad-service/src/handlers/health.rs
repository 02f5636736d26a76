//! Health check handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Service banner.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Headline features.
    pub features: Vec<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`.
    pub status: String,
    /// Database reachability.
    pub database: String,
    /// Provider states.
    pub services: BTreeMap<&'static str, String>,
    /// Service version.
    pub version: String,
}

/// Service banner endpoint.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: "healthy".to_string(),
        service: "Game Launchpad".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: [
            "Game documentation assistant",
            "Dojo world deployment",
            "Multi-chain payments (Starknet, Bitcoin)",
            "Encrypted chat log",
            "Open source templates",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
    })
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match state.store.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            "unavailable"
        }
    };

    let services = BTreeMap::from([
        ("world", "active".to_string()),
        ("payments", "active".to_string()),
        ("assistant", "active".to_string()),
        ("encryption", state.providers.cipher.provider().to_string()),
    ]);

    Json(HealthResponse {
        status: if database == "connected" { "healthy" } else { "degraded" }.to_string(),
        database: database.to_string(),
        services,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
