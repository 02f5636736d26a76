//! Error types for the launchpad.

use crate::ids::IdError;

/// Result type for launchpad operations.
pub type Result<T> = std::result::Result<T, LaunchpadError>;

/// Errors that can occur in launchpad operations.
#[derive(Debug, thiserror::Error)]
pub enum LaunchpadError {
    /// A referenced user, game, asset, transaction or message does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record that was looked up.
        entity: &'static str,
        /// The identifier that was not found.
        id: String,
    },

    /// A unique value is already taken, or the record is in the wrong state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The payment provider rejected or failed the settlement.
    #[error("payment failed: {0}")]
    PaymentFailed(String),

    /// The message cipher could not encode or decode a payload.
    #[error("cipher error: {0}")]
    Cipher(String),

    /// The request is malformed.
    #[error("validation error: {0}")]
    Validation(String),

    /// A non-payment external provider failed or timed out.
    #[error("external service error: {service} - {message}")]
    Provider {
        /// The provider that failed.
        service: String,
        /// Error message.
        message: String,
    },

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Filesystem error while persisting uploads or documentation.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LaunchpadError {
    /// Shorthand for [`LaunchpadError::NotFound`].
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<IdError> for LaunchpadError {
    fn from(err: IdError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// A string did not name any variant of a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    /// What was being parsed, e.g. "payment method".
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl UnknownVariant {
    /// Build an error for `value` not being a valid `kind`.
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl From<UnknownVariant> for LaunchpadError {
    fn from(err: UnknownVariant) -> Self {
        Self::Validation(err.to_string())
    }
}
