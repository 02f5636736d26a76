//! Logging a chat exchange.

use serde::Deserialize;
use sqlx::SqliteConnection;

use launchpad_core::{
    ChatMessage, LaunchpadError, NewChatMessage, Result, UserId, MAX_MESSAGE_LEN,
};
use launchpad_store::{messages, users};

use crate::crypto::MessageCipher;

/// What the client sees in place of an encrypted reply.
pub const ENCRYPTED_PLACEHOLDER: &str = "Encrypted response";

/// How much of the message the reply quotes.
const QUOTE_CHARS: usize = 50;

/// A chat message from a user.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// Message text.
    pub message: String,
    /// Whether to store the exchange encrypted.
    #[serde(default = "default_encrypted")]
    pub encrypted: bool,
}

fn default_encrypted() -> bool {
    true
}

/// A logged exchange.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// The stored row.
    pub stored: ChatMessage,
    /// The reply as the client should see it.
    pub visible_reply: String,
}

/// The assistant's reply to `message`.
#[must_use]
pub fn reply_to(message: &str) -> String {
    let quoted: String = message.chars().take(QUOTE_CHARS).collect();
    format!("AI Agent: I'll help you with '{quoted}...'")
}

/// Reply to a message and log the exchange, encrypted if requested.
///
/// The reply is computed from the plaintext even when the exchange is stored
/// encrypted.
///
/// # Errors
///
/// - `Validation` if the message is empty or too long.
/// - `NotFound` if the user doesn't exist.
/// - `Cipher` if encryption fails.
pub async fn send_message(
    conn: &mut SqliteConnection,
    cipher: &dyn MessageCipher,
    user_id: UserId,
    request: &ChatRequest,
) -> Result<ChatOutcome> {
    if request.message.trim().is_empty() {
        return Err(LaunchpadError::Validation("message must not be empty".into()));
    }
    if request.message.chars().count() > MAX_MESSAGE_LEN {
        return Err(LaunchpadError::Validation(format!(
            "message must be at most {MAX_MESSAGE_LEN} characters"
        )));
    }

    if users::get(conn, user_id).await?.is_none() {
        return Err(LaunchpadError::not_found("user", user_id));
    }

    let reply = reply_to(&request.message);

    let (message, response, visible_reply) = if request.encrypted {
        (
            cipher.encode(&request.message)?,
            cipher.encode(&reply)?,
            ENCRYPTED_PLACEHOLDER.to_string(),
        )
    } else {
        (request.message.clone(), reply.clone(), reply)
    };

    let stored = messages::insert(
        conn,
        &NewChatMessage {
            user_id,
            message,
            response,
            encrypted: request.encrypted,
        },
    )
    .await?;

    tracing::info!(
        user_id = %user_id,
        message_id = %stored.id,
        encrypted = stored.encrypted,
        "Chat message logged"
    );

    Ok(ChatOutcome {
        stored,
        visible_reply,
    })
}

/// Decode an encrypted row in place. Plaintext rows are returned unchanged.
///
/// # Errors
///
/// Returns `Cipher` if either text fails to decode.
pub fn decrypt_message(cipher: &dyn MessageCipher, mut message: ChatMessage) -> Result<ChatMessage> {
    if message.encrypted {
        message.message = cipher.decode(&message.message)?;
        message.response = cipher.decode(&message.response)?;
        message.encrypted = false;
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_quotes_the_first_fifty_chars() {
        let long = "x".repeat(80);
        let reply = reply_to(&long);
        assert_eq!(reply, format!("AI Agent: I'll help you with '{}...'", "x".repeat(50)));
    }

    #[test]
    fn reply_counts_characters_not_bytes() {
        let message = "é".repeat(60);
        let reply = reply_to(&message);
        assert!(reply.contains(&"é".repeat(50)));
        assert!(!reply.contains(&"é".repeat(51)));
    }

    #[test]
    fn encrypted_defaults_to_true() {
        let request: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert!(request.encrypted);
    }
}
