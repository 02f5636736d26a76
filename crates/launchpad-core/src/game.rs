//! Game projects, their assets, and deployed contracts.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LaunchpadError, Result, UnknownVariant};
use crate::{AssetId, GameHandle, GameKey, UserId};

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Starter template a game is created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    /// Turn-based RPG.
    Rpg,
    /// 2D platformer.
    Platformer,
    /// Deck-building card battler.
    #[serde(rename = "card")]
    CardBattle,
    /// Real-time strategy.
    Strategy,
    /// Match-3 and puzzle mechanics.
    Puzzle,
    /// Online multiplayer starter.
    Multiplayer,
}

impl TemplateType {
    /// All template types, in catalog order.
    pub const ALL: [Self; 6] = [
        Self::Rpg,
        Self::Platformer,
        Self::CardBattle,
        Self::Strategy,
        Self::Puzzle,
        Self::Multiplayer,
    ];

    /// The stored and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rpg => "rpg",
            Self::Platformer => "platformer",
            Self::CardBattle => "card",
            Self::Strategy => "strategy",
            Self::Puzzle => "puzzle",
            Self::Multiplayer => "multiplayer",
        }
    }
}

impl FromStr for TemplateType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("template type", s))
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publication state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Created, not yet published.
    Draft,
    /// Paid for and deployed.
    Published,
    /// Serving players.
    Live,
}

impl GameStatus {
    /// The stored and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Live => "live",
        }
    }
}

impl FromStr for GameStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "live" => Ok(Self::Live),
            other => Err(UnknownVariant::new("game status", other)),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A game project owned by a developer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Row key.
    pub id: GameKey,
    /// External handle.
    pub game_id: GameHandle,
    /// Display title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Starter template.
    pub template_type: TemplateType,
    /// Owning developer.
    pub developer_id: UserId,
    /// Publication state.
    pub status: GameStatus,
    /// Address of the game's world, assigned at creation.
    pub world_address: Option<String>,
    /// Directory holding generated documentation.
    pub documentation_path: Option<String>,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// Set exactly when `status` is not `Draft`.
    pub published_at: Option<DateTime<Utc>>,
}

impl Game {
    /// Whether the publish workflow may run on this game.
    #[must_use]
    pub fn is_publishable(&self) -> bool {
        self.status == GameStatus::Draft
    }
}

/// Input for creating a game project.
#[derive(Debug, Clone, Deserialize)]
pub struct NewGame {
    /// Display title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Starter template.
    pub template_type: TemplateType,
}

impl NewGame {
    /// Trim and check the project fields.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::Validation`] for an empty or overlong title.
    pub fn validated(self) -> Result<Self> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(LaunchpadError::Validation("title must not be empty".into()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(LaunchpadError::Validation(format!(
                "title must be at most {MAX_TITLE_LEN} characters"
            )));
        }
        Ok(Self {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            template_type: self.template_type,
        })
    }
}

/// A file uploaded for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameAsset {
    /// Row key.
    pub id: AssetId,
    /// Parent game.
    pub game: GameKey,
    /// MIME type reported at upload.
    pub asset_type: String,
    /// Original file name.
    pub file_name: String,
    /// Where the bytes were written.
    pub file_path: String,
    /// Size in bytes.
    pub file_size: u64,
    /// Whether the optimizer has processed this asset.
    pub optimized: bool,
    /// Upload time.
    pub created_at: DateTime<Utc>,
}

/// Input for recording an uploaded asset.
#[derive(Debug, Clone)]
pub struct NewAsset {
    /// Parent game.
    pub game: GameKey,
    /// MIME type reported at upload.
    pub asset_type: String,
    /// Original file name.
    pub file_name: String,
    /// Where the bytes were written.
    pub file_path: String,
    /// Size in bytes.
    pub file_size: u64,
}

/// Contract addresses produced by a deployment, one per role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedContracts {
    /// The game's world.
    pub world: String,
    /// Game rules.
    pub game_logic: String,
    /// Player accounts.
    pub player_registry: String,
    /// In-game payments.
    pub payment_handler: String,
}

impl DeployedContracts {
    /// Iterate over `(role, address)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("world", self.world.as_str()),
            ("game_logic", self.game_logic.as_str()),
            ("player_registry", self.player_registry.as_str()),
            ("payment_handler", self.payment_handler.as_str()),
        ]
        .into_iter()
    }
}
