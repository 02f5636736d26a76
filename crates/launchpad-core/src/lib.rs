//! Core types for the game launchpad backend.
//!
//! This crate provides the foundational types used throughout the launchpad:
//!
//! - **Identifiers**: `UserId`, `GameKey`, `GameHandle`, `TransactionHandle`, ...
//! - **Users**: `User`, `NewUser`, `UserUpdate`
//! - **Games**: `Game`, `GameAsset`, `TemplateType`, `GameStatus`, `DeployedContracts`
//! - **Payments**: `PaymentMethod`, `Currency`, `Amount`, `PaymentTransaction`
//! - **Chat**: `ChatMessage`
//! - **Templates**: the static starter template catalog
//!
//! Every enumerated column (template type, status, payment method, currency)
//! is a closed Rust enum. Unknown strings are rejected at the HTTP boundary by
//! serde and at the storage boundary by `FromStr`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod chat;
pub mod error;
pub mod game;
pub mod ids;
pub mod payment;
pub mod templates;
pub mod user;

pub use chat::{ChatMessage, NewChatMessage, MAX_MESSAGE_LEN};
pub use error::{LaunchpadError, Result, UnknownVariant};
pub use game::{
    DeployedContracts, Game, GameAsset, GameStatus, NewAsset, NewGame, TemplateType,
};
pub use ids::{AssetId, GameHandle, GameKey, IdError, MessageId, TransactionHandle, TransactionKey, UserId};
pub use payment::{
    Amount, Currency, NewTransaction, PaymentMethod, PaymentMethodInfo, PaymentTransaction,
    TransactionStatus,
};
pub use templates::{Template, TEMPLATE_LICENSE};
pub use user::{NewUser, User, UserUpdate};
