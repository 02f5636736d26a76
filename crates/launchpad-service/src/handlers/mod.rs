//! API handlers.

pub mod ai;
pub mod chat;
pub mod games;
pub mod health;
pub mod payments;
pub mod users;

use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;

use launchpad_core::{Game, GameHandle, User, UserId};
use launchpad_store::{games as game_records, users as user_records};

use crate::error::ApiError;

/// `?user_id=` query parameter.
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    /// The acting user.
    pub user_id: UserId,
}

/// `?game_id=` query parameter.
#[derive(Debug, Deserialize)]
pub struct GameQuery {
    /// External game handle.
    pub game_id: String,
}

/// Plain acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Resolve a user or fail with `not_found`.
pub(crate) async fn load_user(conn: &mut SqliteConnection, id: UserId) -> Result<User, ApiError> {
    user_records::get(conn, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user not found: {id}")))
}

/// Parse a game handle and resolve the game, or fail with `validation_error`
/// / `not_found`.
pub(crate) async fn load_game(conn: &mut SqliteConnection, raw: &str) -> Result<Game, ApiError> {
    let handle: GameHandle = raw.parse()?;
    game_records::get_by_handle(conn, &handle)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("game not found: {handle}")))
}
