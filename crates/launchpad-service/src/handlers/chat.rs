//! Chat handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use launchpad_core::{ChatMessage, MessageId, UserId};
use launchpad_store::messages;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::handlers::{load_user, MessageResponse, UserQuery};
use crate::state::AppState;
use crate::workflows::{decrypt_message, send_message, ChatRequest};

/// Chat send response.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Human-readable outcome.
    pub message: String,
    /// The reply, or a placeholder when the exchange is encrypted.
    pub response: String,
    /// Whether the exchange was stored encrypted.
    pub encrypted: bool,
    /// Cipher used for encrypted exchanges.
    pub encryption_provider: String,
    /// Stored row id.
    pub message_id: MessageId,
}

/// `GET /chat/history` query.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// The acting user.
    pub user_id: UserId,
    /// Decode encrypted rows before returning them.
    #[serde(default)]
    pub decrypt: bool,
}

/// Chat history response.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// Messages in the order they were sent.
    pub messages: Vec<ChatMessage>,
}

/// Send a message to the assistant.
pub async fn send(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<UserQuery>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    tracing::debug!(user_id = %query.user_id, encrypted = request.encrypted, "Processing chat message");

    let cipher = state.providers.cipher.as_ref();
    let mut conn = state.store.acquire().await?;
    let outcome = send_message(&mut conn, cipher, query.user_id, &request).await?;

    Ok(Json(ChatResponse {
        message: "Message sent successfully".into(),
        response: outcome.visible_reply,
        encrypted: outcome.stored.encrypted,
        encryption_provider: cipher.provider().to_string(),
        message_id: outcome.stored.id,
    }))
}

/// List the acting user's messages, optionally decrypted.
pub async fn history(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let mut conn = state.store.acquire().await?;
    load_user(&mut conn, query.user_id).await?;

    let mut messages = messages::list_by_user(&mut conn, query.user_id).await?;
    if query.decrypt {
        let cipher = state.providers.cipher.as_ref();
        messages = messages
            .into_iter()
            .map(|m| decrypt_message(cipher, m))
            .collect::<Result<_, _>>()?;
    }

    Ok(Json(HistoryResponse { messages }))
}

/// Delete a message.
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    Path(message_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id: MessageId = message_id.parse()?;

    let mut conn = state.store.acquire().await?;
    messages::delete(&mut conn, id).await?;

    tracing::info!(message_id = %id, "Chat message deleted");

    Ok(Json(MessageResponse::new("Message deleted successfully")))
}
