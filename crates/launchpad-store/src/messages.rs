//! The `chat_messages` table.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use launchpad_core::{ChatMessage, MessageId, NewChatMessage, UserId};

use crate::error::{Result, StoreError};

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: i64,
    user_id: i64,
    message: String,
    response: String,
    encrypted: bool,
    created_at: DateTime<Utc>,
}

impl From<MessageRow> for ChatMessage {
    fn from(row: MessageRow) -> Self {
        Self {
            id: MessageId::new(row.id),
            user_id: UserId::new(row.user_id),
            message: row.message,
            response: row.response,
            encrypted: row.encrypted,
            created_at: row.created_at,
        }
    }
}

/// Log one exchange.
///
/// # Errors
///
/// Returns `StoreError::Conflict` if the user doesn't exist.
pub async fn insert(conn: &mut SqliteConnection, message: &NewChatMessage) -> Result<ChatMessage> {
    let row: MessageRow = sqlx::query_as(
        "INSERT INTO chat_messages (user_id, message, response, encrypted, created_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING *",
    )
    .bind(message.user_id.get())
    .bind(&message.message)
    .bind(&message.response)
    .bind(message.encrypted)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await?;

    Ok(row.into())
}

/// Get a message by row key.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn get(conn: &mut SqliteConnection, id: MessageId) -> Result<Option<ChatMessage>> {
    let row: Option<MessageRow> = sqlx::query_as("SELECT * FROM chat_messages WHERE id = ?")
        .bind(id.get())
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.map(ChatMessage::from))
}

/// List a user's messages in the order they were sent.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn list_by_user(conn: &mut SqliteConnection, user: UserId) -> Result<Vec<ChatMessage>> {
    let rows: Vec<MessageRow> =
        sqlx::query_as("SELECT * FROM chat_messages WHERE user_id = ? ORDER BY id")
            .bind(user.get())
            .fetch_all(&mut *conn)
            .await?;

    Ok(rows.into_iter().map(ChatMessage::from).collect())
}

/// Delete a message.
///
/// # Errors
///
/// Returns `StoreError::NotFound` if the message doesn't exist.
pub async fn delete(conn: &mut SqliteConnection, id: MessageId) -> Result<()> {
    let result = sqlx::query("DELETE FROM chat_messages WHERE id = ?")
        .bind(id.get())
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("message", id));
    }
    Ok(())
}
