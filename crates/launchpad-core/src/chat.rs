//! Chat log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MessageId, UserId};

/// Maximum accepted message length in characters.
pub const MAX_MESSAGE_LEN: usize = 4000;

/// One stored exchange: the user's message and the assistant's reply.
///
/// When `encrypted` is set, both `message` and `response` hold cipher output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Row key.
    pub id: MessageId,
    /// Sender.
    pub user_id: UserId,
    /// Inbound text (or its ciphertext).
    pub message: String,
    /// Reply text (or its ciphertext).
    pub response: String,
    /// Whether the texts are ciphered.
    pub encrypted: bool,
    /// When the exchange was logged.
    pub created_at: DateTime<Utc>,
}

/// Input for logging an exchange.
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    /// Sender.
    pub user_id: UserId,
    /// Inbound text as it should be stored.
    pub message: String,
    /// Reply text as it should be stored.
    pub response: String,
    /// Whether the texts are ciphered.
    pub encrypted: bool,
}
