//! Error types for launchpad storage.

use launchpad_core::LaunchpadError;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// A stored value could not be mapped back to a domain type.
    #[error("corrupt row: {0}")]
    Corrupt(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record.
        entity: &'static str,
        /// The identifier that was not found.
        id: String,
    },

    /// A uniqueness, reference or state constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl StoreError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub(crate) fn corrupt(err: impl ToString) -> Self {
        Self::Corrupt(err.to_string())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Conflict(unique_conflict_message(db.message()))
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                Self::Conflict("record is still referenced by other records".into())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Database(format!("migration failed: {err}"))
    }
}

impl From<StoreError> for LaunchpadError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => Self::NotFound { entity, id },
            StoreError::Conflict(msg) => Self::Conflict(msg),
            StoreError::Database(msg) | StoreError::Corrupt(msg) => Self::Storage(msg),
        }
    }
}

/// Turn `UNIQUE constraint failed: users.email` into `email already taken`.
fn unique_conflict_message(message: &str) -> String {
    message
        .rsplit_once('.')
        .map(|(_, column)| column.trim())
        .filter(|column| !column.is_empty() && !column.contains(' '))
        .map_or_else(
            || "duplicate value".to_string(),
            |column| format!("{column} already taken"),
        )
}
