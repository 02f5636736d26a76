//! The `games` table.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use launchpad_core::{Game, GameHandle, GameKey, GameStatus, NewGame, UserId};

use crate::error::{Result, StoreError};

#[derive(sqlx::FromRow)]
struct GameRow {
    id: i64,
    game_id: String,
    title: String,
    description: String,
    template_type: String,
    developer_id: i64,
    status: String,
    world_address: Option<String>,
    documentation_path: Option<String>,
    created_at: DateTime<Utc>,
    published_at: Option<DateTime<Utc>>,
}

impl TryFrom<GameRow> for Game {
    type Error = StoreError;

    fn try_from(row: GameRow) -> Result<Self> {
        Ok(Self {
            id: GameKey::new(row.id),
            game_id: row.game_id.parse().map_err(StoreError::corrupt)?,
            title: row.title,
            description: row.description,
            template_type: row.template_type.parse().map_err(StoreError::corrupt)?,
            developer_id: UserId::new(row.developer_id),
            status: row.status.parse().map_err(StoreError::corrupt)?,
            world_address: row.world_address,
            documentation_path: row.documentation_path,
            created_at: row.created_at,
            published_at: row.published_at,
        })
    }
}

/// Insert a game in `draft`.
///
/// # Errors
///
/// Returns `StoreError::Conflict` if the handle is taken or the developer
/// doesn't exist.
pub async fn insert(
    conn: &mut SqliteConnection,
    developer: UserId,
    handle: &GameHandle,
    game: &NewGame,
    world_address: Option<&str>,
) -> Result<Game> {
    let row: GameRow = sqlx::query_as(
        "INSERT INTO games
            (game_id, title, description, template_type, developer_id, status, world_address, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING *",
    )
    .bind(handle.as_str())
    .bind(&game.title)
    .bind(&game.description)
    .bind(game.template_type.as_str())
    .bind(developer.get())
    .bind(GameStatus::Draft.as_str())
    .bind(world_address)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await?;

    row.try_into()
}

/// Get a game by row key.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub async fn get(conn: &mut SqliteConnection, id: GameKey) -> Result<Option<Game>> {
    let row: Option<GameRow> = sqlx::query_as("SELECT * FROM games WHERE id = ?")
        .bind(id.get())
        .fetch_optional(&mut *conn)
        .await?;

    row.map(Game::try_from).transpose()
}

/// Get a game by its external handle.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub async fn get_by_handle(conn: &mut SqliteConnection, handle: &GameHandle) -> Result<Option<Game>> {
    let row: Option<GameRow> = sqlx::query_as("SELECT * FROM games WHERE game_id = ?")
        .bind(handle.as_str())
        .fetch_optional(&mut *conn)
        .await?;

    row.map(Game::try_from).transpose()
}

/// List a developer's games, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub async fn list_by_developer(conn: &mut SqliteConnection, developer: UserId) -> Result<Vec<Game>> {
    let rows: Vec<GameRow> =
        sqlx::query_as("SELECT * FROM games WHERE developer_id = ? ORDER BY id DESC")
            .bind(developer.get())
            .fetch_all(&mut *conn)
            .await?;

    rows.into_iter().map(Game::try_from).collect()
}

/// Move a draft game to `published` and stamp `published_at`.
///
/// `world_address` is recorded only if the game has none yet.
///
/// The status check and the write are one statement, so two concurrent
/// publishes of the same game cannot both succeed.
///
/// # Errors
///
/// - `StoreError::NotFound` if the game doesn't exist.
/// - `StoreError::Conflict` if the game is not in `draft`.
pub async fn mark_published(
    conn: &mut SqliteConnection,
    id: GameKey,
    at: DateTime<Utc>,
    world_address: &str,
) -> Result<Game> {
    let row: Option<GameRow> = sqlx::query_as(
        "UPDATE games
         SET status = ?, published_at = ?, world_address = COALESCE(world_address, ?)
         WHERE id = ? AND status = ?
         RETURNING *",
    )
    .bind(GameStatus::Published.as_str())
    .bind(at)
    .bind(world_address)
    .bind(id.get())
    .bind(GameStatus::Draft.as_str())
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(row) => row.try_into(),
        None => match get(conn, id).await? {
            Some(game) => Err(StoreError::Conflict(format!(
                "game {} is already {}",
                game.game_id, game.status
            ))),
            None => Err(StoreError::not_found("game", id)),
        },
    }
}

/// Record where a game's generated documentation lives.
///
/// # Errors
///
/// Returns `StoreError::NotFound` if the game doesn't exist.
pub async fn set_documentation_path(conn: &mut SqliteConnection, id: GameKey, path: &str) -> Result<()> {
    let result = sqlx::query("UPDATE games SET documentation_path = ? WHERE id = ?")
        .bind(path)
        .bind(id.get())
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("game", id));
    }
    Ok(())
}

/// Delete a game. Its assets go with it.
///
/// # Errors
///
/// Returns `StoreError::NotFound` if the game doesn't exist.
pub async fn delete(conn: &mut SqliteConnection, id: GameKey) -> Result<()> {
    let result = sqlx::query("DELETE FROM games WHERE id = ?")
        .bind(id.get())
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("game", id));
    }
    Ok(())
}
