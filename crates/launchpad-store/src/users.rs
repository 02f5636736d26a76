//! The `users` table.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use launchpad_core::{NewUser, User, UserId, UserUpdate};

use crate::error::{Result, StoreError};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    wallet_address: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            username: row.username,
            email: row.email,
            wallet_address: row.wallet_address,
            created_at: row.created_at,
        }
    }
}

/// Insert a user.
///
/// # Errors
///
/// Returns `StoreError::Conflict` if the username or email is taken.
pub async fn insert(conn: &mut SqliteConnection, user: &NewUser) -> Result<User> {
    let row: UserRow = sqlx::query_as(
        "INSERT INTO users (username, email, wallet_address, created_at)
         VALUES (?, ?, ?, ?)
         RETURNING *",
    )
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.wallet_address)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await?;

    Ok(row.into())
}

/// Get a user by row key.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn get(conn: &mut SqliteConnection, id: UserId) -> Result<Option<User>> {
    let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(id.get())
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.map(User::from))
}

/// Get a user by email.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn get_by_email(conn: &mut SqliteConnection, email: &str) -> Result<Option<User>> {
    let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.map(User::from))
}

/// Apply a partial profile update and return the new row.
///
/// # Errors
///
/// - `StoreError::NotFound` if the user doesn't exist.
/// - `StoreError::Conflict` if the new username is taken.
pub async fn update(conn: &mut SqliteConnection, id: UserId, update: &UserUpdate) -> Result<User> {
    let row: Option<UserRow> = sqlx::query_as(
        "UPDATE users
         SET username = COALESCE(?, username),
             wallet_address = COALESCE(?, wallet_address)
         WHERE id = ?
         RETURNING *",
    )
    .bind(&update.username)
    .bind(&update.wallet_address)
    .bind(id.get())
    .fetch_optional(&mut *conn)
    .await?;

    row.map(User::from)
        .ok_or_else(|| StoreError::not_found("user", id))
}

/// Delete a user.
///
/// # Errors
///
/// - `StoreError::NotFound` if the user doesn't exist.
/// - `StoreError::Conflict` while games, transactions or messages still reference the user.
pub async fn delete(conn: &mut SqliteConnection, id: UserId) -> Result<()> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id.get())
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("user", id));
    }
    Ok(())
}
