//! Developer account handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use launchpad_core::{NewUser, User, UserId, UserUpdate};
use launchpad_store::users;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::handlers::{load_user, UserQuery};
use crate::state::AppState;

/// Registration response.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// New user's id.
    pub user_id: UserId,
    /// Stored username.
    pub username: String,
    /// Human-readable outcome.
    pub message: String,
}

/// Profile update response.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    /// Human-readable outcome.
    pub message: String,
    /// The profile after the update.
    pub user: User,
}

/// `PUT /users/me` query: the acting user plus the fields to change.
#[derive(Debug, Deserialize)]
pub struct UpdateUserQuery {
    /// The acting user.
    pub user_id: UserId,
    /// New username.
    #[serde(default)]
    pub username: Option<String>,
    /// New wallet address.
    #[serde(default)]
    pub wallet_address: Option<String>,
}

/// Register a new developer.
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<NewUser>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let user = body.validated()?;
    tracing::debug!(username = %user.username, "Registering user");

    let mut conn = state.store.acquire().await?;

    if users::get_by_email(&mut conn, &user.email).await?.is_some() {
        return Err(ApiError::Conflict("email already taken".into()));
    }

    let created = users::insert(&mut conn, &user).await?;

    tracing::info!(user_id = %created.id, username = %created.username, "User registered");

    Ok(Json(RegisterResponse {
        user_id: created.id,
        username: created.username,
        message: "User registered successfully".into(),
    }))
}

/// Get the acting user's profile.
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> Result<Json<User>, ApiError> {
    let mut conn = state.store.acquire().await?;
    let user = load_user(&mut conn, query.user_id).await?;
    Ok(Json(user))
}

/// Update the acting user's username and/or wallet address.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<UpdateUserQuery>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let update = UserUpdate {
        username: query.username,
        wallet_address: query.wallet_address,
    }
    .validated()?;

    let mut conn = state.store.acquire().await?;

    let user = if update.is_empty() {
        load_user(&mut conn, query.user_id).await?
    } else {
        let user = users::update(&mut conn, query.user_id, &update).await?;
        tracing::info!(user_id = %user.id, "User updated");
        user
    };

    Ok(Json(UpdateResponse {
        message: "User updated successfully".into(),
        user,
    }))
}
