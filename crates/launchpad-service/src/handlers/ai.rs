//! Assistant handlers: documentation, readiness analysis, asset optimization.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use launchpad_store::{assets, games};

use crate::error::ApiError;
use crate::extract::ApiQuery;
use crate::handlers::{load_game, GameQuery};
use crate::providers::{OptimizationReport, PublishingAnalysis};
use crate::state::AppState;
use crate::workflows::with_timeout;

/// Documentation generation response.
#[derive(Debug, Serialize)]
pub struct DocsResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Section names written.
    pub documents: Vec<String>,
    /// Directory the documents were written to.
    pub path: String,
}

/// Generate documentation for a game and write it under the docs directory.
pub async fn generate_docs(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<GameQuery>,
) -> Result<Json<DocsResponse>, ApiError> {
    let mut conn = state.store.acquire().await?;
    let game = load_game(&mut conn, &query.game_id).await?;
    tracing::debug!(game_id = %game.game_id, "Generating documentation");

    let docs = with_timeout(
        "assistant",
        state.provider_timeout(),
        state
            .providers
            .assistant
            .generate_documentation(&game.title, &game.description),
    )
    .await?;

    let dir = state.config.docs_dir.join(game.game_id.as_str());
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to create docs directory: {e}")))?;

    let mut documents = Vec::new();
    for (section, content) in docs.sections() {
        tokio::fs::write(dir.join(format!("{section}.md")), content)
            .await
            .map_err(|e| ApiError::Internal(format!("failed to write {section}.md: {e}")))?;
        documents.push(section.to_string());
    }

    let path = dir.to_string_lossy().into_owned();
    games::set_documentation_path(&mut conn, game.id, &path).await?;

    tracing::info!(game_id = %game.game_id, path = %path, "Documentation generated");

    Ok(Json(DocsResponse {
        message: "Documentation generated successfully".into(),
        documents,
        path,
    }))
}

/// Check a game's publishing readiness.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<GameQuery>,
) -> Result<Json<PublishingAnalysis>, ApiError> {
    let mut conn = state.store.acquire().await?;
    let game = load_game(&mut conn, &query.game_id).await?;
    let assets = assets::list_by_game(&mut conn, game.id).await?;

    let analysis = with_timeout(
        "assistant",
        state.provider_timeout(),
        state.providers.assistant.analyze(&game, &assets),
    )
    .await?;

    Ok(Json(analysis))
}

/// Optimize a game's assets and flag them as optimized.
///
/// The flag is a single statement, so no transaction is held while the
/// assistant runs.
pub async fn optimize(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<GameQuery>,
) -> Result<Json<OptimizationReport>, ApiError> {
    let mut conn = state.store.acquire().await?;
    let game = load_game(&mut conn, &query.game_id).await?;
    let game_assets = assets::list_by_game(&mut conn, game.id).await?;

    let report = with_timeout(
        "assistant",
        state.provider_timeout(),
        state.providers.assistant.optimize(&game_assets),
    )
    .await?;

    let flagged = assets::mark_optimized(&mut conn, game.id).await?;

    tracing::info!(game_id = %game.game_id, flagged, "Assets optimized");

    Ok(Json(report))
}
