//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{ai, chat, games, health, payments, users};
use crate::state::AppState;

/// Maximum concurrent requests for endpoints that call out to providers.
const PROVIDER_MAX_CONCURRENT_REQUESTS: usize = 20;

/// Maximum concurrent requests for general API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /` - Service info
/// - `GET /health` - Health check
///
/// ## Users
/// - `POST /users/register` - Register a developer
/// - `GET /users/me` - Get a profile
/// - `PUT /users/me` - Update username or wallet
///
/// ## Games
/// - `GET /games/templates` - Starter templates
/// - `POST /games/create` - Create a game project
/// - `GET /games` - List a developer's games
/// - `POST /games/upload` - Upload an asset (multipart)
/// - `GET /games/:game_id` - Get a game
/// - `DELETE /games/:game_id` - Delete a game and its assets
/// - `GET /games/:game_id/stats` - Game statistics
/// - `GET /games/:game_id/assets` - List assets
/// - `DELETE /games/:game_id/assets/:asset_id` - Delete an asset
///
/// ## Payments
/// - `GET /payments/methods` - Accepted payment methods
/// - `POST /payments/publish` - Publish a game (deploy + settle)
/// - `GET /payments/history` - Payment history
/// - `GET /payments/:transaction_id` - One ledger entry
///
/// ## Chat
/// - `POST /chat/send` - Send a message
/// - `GET /chat/history` - Message history
/// - `DELETE /chat/:message_id` - Delete a message
///
/// ## Assistant
/// - `POST /ai/generate-docs` - Generate documentation
/// - `POST /ai/analyze` - Publishing readiness
/// - `POST /ai/optimize` - Optimize assets
pub fn create_router(state: AppState) -> Router {
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    // Publishing and the assistant wait on external services, so they get a
    // tighter limit of their own.
    let provider_routes = Router::new()
        .route("/payments/publish", post(payments::publish))
        .route("/ai/generate-docs", post(ai::generate_docs))
        .route("/ai/analyze", post(ai::analyze))
        .route("/ai/optimize", post(ai::optimize))
        .layer(ConcurrencyLimitLayer::new(PROVIDER_MAX_CONCURRENT_REQUESTS));

    let api_routes = Router::new()
        // Users
        .route("/users/register", post(users::register_user))
        .route("/users/me", get(users::get_current_user).put(users::update_user))
        // Games
        .route("/games", get(games::list_games))
        .route("/games/templates", get(games::list_templates))
        .route("/games/create", post(games::create_game))
        .route("/games/upload", post(games::upload_asset))
        .route("/games/:game_id", get(games::get_game).delete(games::delete_game))
        .route("/games/:game_id/stats", get(games::get_game_stats))
        .route("/games/:game_id/assets", get(games::list_assets))
        .route("/games/:game_id/assets/:asset_id", delete(games::delete_asset))
        // Payments
        .route("/payments/methods", get(payments::list_methods))
        .route("/payments/history", get(payments::payment_history))
        .route("/payments/:transaction_id", get(payments::get_transaction))
        // Chat
        .route("/chat/send", post(chat::send))
        .route("/chat/history", get(chat::history))
        .route("/chat/:message_id", delete(chat::delete_message))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .merge(api_routes)
        .merge(provider_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
