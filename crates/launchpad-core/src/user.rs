//! Developer accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LaunchpadError, Result};
use crate::UserId;

/// Maximum username length in characters.
pub const MAX_USERNAME_LEN: usize = 64;

/// A registered developer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Row key.
    pub id: UserId,
    /// Unique display name.
    pub username: String,
    /// Unique contact email.
    pub email: String,
    /// Wallet used as the sender for publishing fees.
    pub wallet_address: Option<String>,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

/// Input for registering a user.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    /// Requested username.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Optional wallet address.
    #[serde(default)]
    pub wallet_address: Option<String>,
}

impl NewUser {
    /// Trim and check the registration fields.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::Validation`] for an empty or overlong username,
    /// a malformed email, or a blank wallet address.
    pub fn validated(self) -> Result<Self> {
        Ok(Self {
            username: validate_username(&self.username)?,
            email: validate_email(&self.email)?,
            wallet_address: self
                .wallet_address
                .as_deref()
                .map(validate_wallet)
                .transpose()?,
        })
    }
}

/// Partial profile update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    /// New username.
    #[serde(default)]
    pub username: Option<String>,
    /// New wallet address.
    #[serde(default)]
    pub wallet_address: Option<String>,
}

impl UserUpdate {
    /// Trim and check whichever fields are present.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::Validation`] if a present field is malformed.
    pub fn validated(self) -> Result<Self> {
        Ok(Self {
            username: self.username.as_deref().map(validate_username).transpose()?,
            wallet_address: self
                .wallet_address
                .as_deref()
                .map(validate_wallet)
                .transpose()?,
        })
    }

    /// Whether the update would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.wallet_address.is_none()
    }
}

fn validate_username(raw: &str) -> Result<String> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(LaunchpadError::Validation("username must not be empty".into()));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(LaunchpadError::Validation(format!(
            "username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    Ok(username.to_string())
}

fn validate_email(raw: &str) -> Result<String> {
    let email = raw.trim();
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty() && !domain.contains('@'));

    if well_formed && !email.contains(char::is_whitespace) {
        Ok(email.to_lowercase())
    } else {
        Err(LaunchpadError::Validation(format!("invalid email: {email}")))
    }
}

fn validate_wallet(raw: &str) -> Result<String> {
    let wallet = raw.trim();
    if wallet.is_empty() {
        return Err(LaunchpadError::Validation(
            "wallet address must not be blank".into(),
        ));
    }
    Ok(wallet.to_string())
}
