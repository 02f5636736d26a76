//! Game project and asset handlers.

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Multipart, Path as UrlPath, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use launchpad_core::templates::{self, Template};
use launchpad_core::{AssetId, Game, GameAsset, GameHandle, GameStatus, NewAsset, NewGame};
use launchpad_store::{assets, games};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::handlers::{load_game, load_user, GameQuery, MessageResponse, UserQuery};
use crate::state::AppState;
use crate::workflows::with_timeout;

/// Multipart field carrying the uploaded file.
const UPLOAD_FIELD: &str = "file";

/// Template catalog response.
#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    /// Every starter template.
    pub templates: &'static [Template],
}

/// Game creation response.
#[derive(Debug, Serialize)]
pub struct CreateGameResponse {
    /// External handle.
    pub game_id: GameHandle,
    /// Stored title.
    pub title: String,
    /// The game's world.
    pub world_address: String,
    /// Always `created`.
    pub status: String,
    /// Human-readable outcome.
    pub message: String,
}

/// Game list response.
#[derive(Debug, Serialize)]
pub struct GamesResponse {
    /// Games, newest first.
    pub games: Vec<Game>,
}

/// Game statistics.
#[derive(Debug, Serialize)]
pub struct GameStatsResponse {
    /// External handle.
    pub game_id: GameHandle,
    /// Title.
    pub title: String,
    /// Lifecycle state.
    pub status: GameStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Publish time, if published.
    pub published_at: Option<DateTime<Utc>>,
    /// Number of uploaded assets.
    pub total_assets: u64,
    /// Total size of uploaded assets in bytes.
    pub total_asset_bytes: u64,
    /// World address.
    pub contract_address: Option<String>,
    /// Active players.
    pub players: u64,
    /// Revenue to date.
    pub revenue: String,
}

/// Upload response.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Name the file was uploaded under.
    pub filename: String,
    /// Size in bytes.
    pub size: u64,
    /// The recorded asset.
    pub asset: GameAsset,
}

/// Asset list response.
#[derive(Debug, Serialize)]
pub struct AssetsResponse {
    /// Assets in upload order.
    pub assets: Vec<GameAsset>,
}

/// List the starter templates.
pub async fn list_templates() -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: templates::catalog(),
    })
}

/// Create a game project in `draft`, with a fresh world.
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<UserQuery>,
    ApiJson(body): ApiJson<NewGame>,
) -> Result<Json<CreateGameResponse>, ApiError> {
    let game = body.validated()?;
    tracing::debug!(user_id = %query.user_id, title = %game.title, "Creating game");

    let mut conn = state.store.acquire().await?;
    load_user(&mut conn, query.user_id).await?;

    let world_address = with_timeout(
        "world",
        state.provider_timeout(),
        state
            .providers
            .world
            .create_world(&game.title, game.template_type),
    )
    .await?;

    let handle = GameHandle::generate();
    let created = games::insert(&mut conn, query.user_id, &handle, &game, Some(&world_address)).await?;

    tracing::info!(
        user_id = %query.user_id,
        game_id = %created.game_id,
        template = %created.template_type,
        "Game created"
    );

    Ok(Json(CreateGameResponse {
        game_id: created.game_id,
        title: created.title,
        world_address,
        status: "created".into(),
        message: "Game project created successfully".into(),
    }))
}

/// List a developer's games.
pub async fn list_games(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> Result<Json<GamesResponse>, ApiError> {
    let mut conn = state.store.acquire().await?;
    load_user(&mut conn, query.user_id).await?;

    let games = games::list_by_developer(&mut conn, query.user_id).await?;
    Ok(Json(GamesResponse { games }))
}

/// Get a game.
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    UrlPath(game_id): UrlPath<String>,
) -> Result<Json<Game>, ApiError> {
    let mut conn = state.store.acquire().await?;
    Ok(Json(load_game(&mut conn, &game_id).await?))
}

/// Get a game's statistics.
pub async fn get_game_stats(
    State(state): State<Arc<AppState>>,
    UrlPath(game_id): UrlPath<String>,
) -> Result<Json<GameStatsResponse>, ApiError> {
    let mut conn = state.store.acquire().await?;
    let game = load_game(&mut conn, &game_id).await?;
    let assets = assets::list_by_game(&mut conn, game.id).await?;

    Ok(Json(GameStatsResponse {
        game_id: game.game_id,
        title: game.title,
        status: game.status,
        created_at: game.created_at,
        published_at: game.published_at,
        total_assets: assets.len() as u64,
        total_asset_bytes: assets.iter().map(|a| a.file_size).sum(),
        contract_address: game.world_address,
        players: 0,
        revenue: "0 STRK".into(),
    }))
}

/// Delete a game and its assets.
///
/// The rows go in one transaction; the upload and documentation directories
/// are removed once it has committed.
pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    UrlPath(game_id): UrlPath<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut tx = state.store.begin().await?;
    let game = load_game(&mut tx, &game_id).await?;
    let asset_count = assets::count_by_game(&mut tx, game.id).await?;
    games::delete(&mut tx, game.id).await?;
    tx.commit().await.map_err(launchpad_store::StoreError::from)?;

    remove_dir_if_present(&state.config.uploads_dir.join(game.game_id.as_str())).await;
    remove_dir_if_present(&state.config.docs_dir.join(game.game_id.as_str())).await;

    tracing::info!(game_id = %game.game_id, asset_count, "Game deleted");

    Ok(Json(MessageResponse::new("Game deleted successfully")))
}

/// Upload a file for a game.
pub async fn upload_asset(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<GameQuery>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut conn = state.store.acquire().await?;
    let game = load_game(&mut conn, &query.game_id).await?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = sanitize_file_name(field.file_name().unwrap_or_default())?;
        let asset_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await?;
        upload = Some((file_name, asset_type, bytes));
        break;
    }
    let (file_name, asset_type, bytes) = upload
        .ok_or_else(|| ApiError::Validation(format!("missing multipart field `{UPLOAD_FIELD}`")))?;

    let dir = state.config.uploads_dir.join(game.game_id.as_str());
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to create upload directory: {e}")))?;

    // Stored names are prefixed so two uploads of the same file never share a path.
    let prefix = Uuid::new_v4().simple().to_string();
    let file_path = dir.join(format!("{}_{file_name}", &prefix[..8]));
    tokio::fs::write(&file_path, &bytes)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to write upload: {e}")))?;

    let new_asset = NewAsset {
        game: game.id,
        asset_type,
        file_name: file_name.clone(),
        file_path: file_path.to_string_lossy().into_owned(),
        file_size: bytes.len() as u64,
    };

    let asset = match assets::insert(&mut conn, &new_asset).await {
        Ok(asset) => asset,
        Err(e) => {
            remove_file_if_present(&file_path).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        game_id = %game.game_id,
        asset_id = %asset.id,
        file_name = %asset.file_name,
        size = asset.file_size,
        "Asset uploaded"
    );

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".into(),
        filename: file_name,
        size: asset.file_size,
        asset,
    }))
}

/// List a game's assets.
pub async fn list_assets(
    State(state): State<Arc<AppState>>,
    UrlPath(game_id): UrlPath<String>,
) -> Result<Json<AssetsResponse>, ApiError> {
    let mut conn = state.store.acquire().await?;
    let game = load_game(&mut conn, &game_id).await?;
    let assets = assets::list_by_game(&mut conn, game.id).await?;
    Ok(Json(AssetsResponse { assets }))
}

/// Delete one asset and its file.
pub async fn delete_asset(
    State(state): State<Arc<AppState>>,
    UrlPath((game_id, asset_id)): UrlPath<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let asset_id: AssetId = asset_id.parse()?;

    let mut conn = state.store.acquire().await?;
    let game = load_game(&mut conn, &game_id).await?;

    let asset = assets::get(&mut conn, asset_id)
        .await?
        .filter(|asset| asset.game == game.id)
        .ok_or_else(|| ApiError::NotFound(format!("asset not found: {asset_id}")))?;

    assets::delete(&mut conn, asset.id).await?;
    remove_file_if_present(Path::new(&asset.file_path)).await;

    tracing::info!(game_id = %game.game_id, asset_id = %asset.id, "Asset deleted");

    Ok(Json(MessageResponse::new("Asset deleted successfully")))
}

/// Reduce a client-supplied name to its final path component.
fn sanitize_file_name(raw: &str) -> Result<String, ApiError> {
    let name = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(ApiError::Validation("upload must have a file name".into()));
    }
    if name.chars().any(char::is_control) {
        return Err(ApiError::Validation("file name contains control characters".into()));
    }
    Ok(name.to_string())
}

async fn remove_file_if_present(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to remove file"),
    }
}

async fn remove_dir_if_present(path: &Path) {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to remove directory"),
    }
}
