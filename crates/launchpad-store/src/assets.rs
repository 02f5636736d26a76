//! The `game_assets` table.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use launchpad_core::{AssetId, GameAsset, GameKey, NewAsset};

use crate::error::{Result, StoreError};

#[derive(sqlx::FromRow)]
struct AssetRow {
    id: i64,
    game_key: i64,
    asset_type: String,
    file_name: String,
    file_path: String,
    file_size: i64,
    optimized: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<AssetRow> for GameAsset {
    type Error = StoreError;

    fn try_from(row: AssetRow) -> Result<Self> {
        Ok(Self {
            id: AssetId::new(row.id),
            game: GameKey::new(row.game_key),
            asset_type: row.asset_type,
            file_name: row.file_name,
            file_path: row.file_path,
            file_size: u64::try_from(row.file_size).map_err(StoreError::corrupt)?,
            optimized: row.optimized,
            created_at: row.created_at,
        })
    }
}

/// Record an uploaded file.
///
/// # Errors
///
/// Returns `StoreError::Conflict` if the parent game doesn't exist, or
/// `StoreError::Database` if the size doesn't fit the column.
pub async fn insert(conn: &mut SqliteConnection, asset: &NewAsset) -> Result<GameAsset> {
    let file_size = i64::try_from(asset.file_size)
        .map_err(|_| StoreError::Database(format!("file too large: {} bytes", asset.file_size)))?;

    let row: AssetRow = sqlx::query_as(
        "INSERT INTO game_assets (game_key, asset_type, file_name, file_path, file_size, optimized, created_at)
         VALUES (?, ?, ?, ?, ?, 0, ?)
         RETURNING *",
    )
    .bind(asset.game.get())
    .bind(&asset.asset_type)
    .bind(&asset.file_name)
    .bind(&asset.file_path)
    .bind(file_size)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await?;

    row.try_into()
}

/// Get an asset by row key.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub async fn get(conn: &mut SqliteConnection, id: AssetId) -> Result<Option<GameAsset>> {
    let row: Option<AssetRow> = sqlx::query_as("SELECT * FROM game_assets WHERE id = ?")
        .bind(id.get())
        .fetch_optional(&mut *conn)
        .await?;

    row.map(GameAsset::try_from).transpose()
}

/// List a game's assets in upload order.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub async fn list_by_game(conn: &mut SqliteConnection, game: GameKey) -> Result<Vec<GameAsset>> {
    let rows: Vec<AssetRow> =
        sqlx::query_as("SELECT * FROM game_assets WHERE game_key = ? ORDER BY id")
            .bind(game.get())
            .fetch_all(&mut *conn)
            .await?;

    rows.into_iter().map(GameAsset::try_from).collect()
}

/// Count a game's assets.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn count_by_game(conn: &mut SqliteConnection, game: GameKey) -> Result<u64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM game_assets WHERE game_key = ?")
        .bind(game.get())
        .fetch_one(&mut *conn)
        .await?;

    u64::try_from(count).map_err(StoreError::corrupt)
}

/// Flag every asset of a game as optimized. Returns how many rows changed.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn mark_optimized(conn: &mut SqliteConnection, game: GameKey) -> Result<u64> {
    let result = sqlx::query("UPDATE game_assets SET optimized = 1 WHERE game_key = ? AND optimized = 0")
        .bind(game.get())
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

/// Delete an asset row.
///
/// # Errors
///
/// Returns `StoreError::NotFound` if the asset doesn't exist.
pub async fn delete(conn: &mut SqliteConnection, id: AssetId) -> Result<()> {
    let result = sqlx::query("DELETE FROM game_assets WHERE id = ?")
        .bind(id.get())
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("asset", id));
    }
    Ok(())
}
