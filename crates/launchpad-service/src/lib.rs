//! Game Launchpad HTTP API Service.
//!
//! This crate provides the HTTP API for the launchpad, including:
//!
//! - Developer registration and profiles
//! - Game projects, templates and asset uploads
//! - Publishing: contract deployment plus fee settlement
//! - Assistant chat with optional at-rest encryption
//! - Documentation, readiness analysis and asset optimization
//!
//! # Identity
//!
//! There is no authentication layer. Endpoints acting on behalf of a user
//! take a `user_id` query parameter.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Catalog handlers are async for routing

pub mod config;
pub mod crypto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod providers;
pub mod routes;
pub mod state;
pub mod workflows;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use providers::Providers;
pub use routes::create_router;
pub use state::AppState;
