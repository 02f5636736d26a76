//! `SQLite` storage layer for the game launchpad.
//!
//! This crate persists users, games, assets, payment transactions and chat
//! messages in a single relational database with foreign keys enforced.
//!
//! # Architecture
//!
//! Each table has a module of free functions that take a
//! `&mut SqliteConnection`. Callers pass either a pooled connection or an open
//! [`StoreTx`], so a multi-step workflow can run every write inside one
//! transaction and commit once at the end:
//!
//! - `users`: developers, unique on username and email
//! - `games`: projects, unique on the external `game_...` handle
//! - `assets`: uploaded files, deleted with their game
//! - `transactions`: the append-only payment ledger
//! - `messages`: chat exchanges
//!
//! # Example
//!
//! ```no_run
//! use launchpad_core::NewUser;
//! use launchpad_store::{users, SqliteStore};
//!
//! # async fn run() -> launchpad_store::Result<()> {
//! let store = SqliteStore::open("sqlite://launchpad.db").await?;
//!
//! let mut tx = store.begin().await?;
//! let user = users::insert(
//!     &mut tx,
//!     &NewUser {
//!         username: "alice".into(),
//!         email: "alice@example.com".into(),
//!         wallet_address: None,
//!     },
//! )
//! .await?;
//! tx.commit().await?;
//!
//! let mut conn = store.acquire().await?;
//! assert!(users::get(&mut conn, user.id).await?.is_some());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod assets;
pub mod error;
pub mod games;
pub mod messages;
pub mod schema;
pub mod sqlite;
pub mod transactions;
pub mod users;

pub use error::{Result, StoreError};
pub use sqlite::{SqliteStore, StoreTx};
