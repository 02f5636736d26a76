//! Identifier types for the launchpad.
//!
//! Every table has a surrogate integer primary key, wrapped here in a distinct
//! newtype per entity so a `GameKey` can never be passed where a `UserId` is
//! expected. Games and transactions additionally carry an externally visible
//! handle that is safe to hand out in URLs.
//!
//! # Macro-based ID Types
//!
//! The `row_id_type!` macro reduces boilerplate for the surrogate keys,
//! ensuring consistent serialization, parsing, and display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Macro to define an integer surrogate-key type with standard trait implementations.
///
/// This macro generates a newtype wrapper around `i64` with implementations for:
/// - `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `Serialize`, `Deserialize` (as a plain JSON number)
/// - `FromStr`, `Display`, `Debug`
/// - `From<i64>`, `Into<i64>`
///
/// # Example
///
/// ```ignore
/// row_id_type!(WidgetId, "A widget row key.");
/// let id = WidgetId::new(7);
/// let parsed: WidgetId = "7".parse().unwrap();
/// ```
macro_rules! row_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw row key.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Return the raw row key.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>()
                    .map(Self)
                    .map_err(|_| IdError::InvalidRowId(s.to_string()))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

row_id_type!(UserId, "Surrogate key of a row in the `users` table.");
row_id_type!(GameKey, "Surrogate key of a row in the `games` table.\n\nNever exposed in URLs; use [`GameHandle`] for that.");
row_id_type!(AssetId, "Surrogate key of a row in the `game_assets` table.");
row_id_type!(TransactionKey, "Surrogate key of a row in the `transactions` table.");
row_id_type!(MessageId, "Surrogate key of a row in the `chat_messages` table.");

/// Prefix of every game handle.
const GAME_HANDLE_PREFIX: &str = "game_";

/// Number of hex characters after the game handle prefix.
const GAME_HANDLE_HEX_LEN: usize = 12;

/// Prefix of every transaction handle.
const TRANSACTION_HANDLE_PREFIX: &str = "tx_";

/// The external handle of a game, e.g. `game_3f9a0c1d2e4b`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameHandle(String);

impl GameHandle {
    /// Generate a fresh random handle.
    #[must_use]
    pub fn generate() -> Self {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("{GAME_HANDLE_PREFIX}{}", &hex[..GAME_HANDLE_HEX_LEN]))
    }

    /// Borrow the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for GameHandle {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s.strip_prefix(GAME_HANDLE_PREFIX).is_some_and(|rest| {
            rest.len() == GAME_HANDLE_HEX_LEN
                && rest.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        });

        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(IdError::InvalidGameHandle(s.to_string()))
        }
    }
}

impl fmt::Debug for GameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameHandle({})", self.0)
    }
}

impl fmt::Display for GameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for GameHandle {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GameHandle> for String {
    fn from(handle: GameHandle) -> Self {
        handle.0
    }
}

/// The external handle of a payment transaction, `tx_` followed by a ULID.
///
/// ULIDs are time-ordered, so handles sort chronologically.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionHandle(Ulid);

impl TransactionHandle {
    /// Generate a new handle with the current timestamp.
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    /// Return the underlying ULID.
    #[must_use]
    pub const fn as_ulid(&self) -> &Ulid {
        &self.0
    }
}

impl FromStr for TransactionHandle {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(TRANSACTION_HANDLE_PREFIX)
            .and_then(|rest| Ulid::from_string(rest).ok())
            .map(Self)
            .ok_or_else(|| IdError::InvalidTransactionHandle(s.to_string()))
    }
}

impl fmt::Debug for TransactionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionHandle({self})")
    }
}

impl fmt::Display for TransactionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TRANSACTION_HANDLE_PREFIX}{}", self.0)
    }
}

impl TryFrom<String> for TransactionHandle {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TransactionHandle> for String {
    fn from(handle: TransactionHandle) -> Self {
        handle.to_string()
    }
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not an integer row key.
    #[error("invalid row id: {0}")]
    InvalidRowId(String),

    /// The input is not a well-formed game handle.
    #[error("invalid game handle: {0}")]
    InvalidGameHandle(String),

    /// The input is not a well-formed transaction handle.
    #[error("invalid transaction handle: {0}")]
    InvalidTransactionHandle(String),
}
