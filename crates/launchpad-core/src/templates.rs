//! The open-source starter template catalog.
//!
//! The catalog is static: one entry per [`TemplateType`], in the same order
//! as [`TemplateType::ALL`].

use serde::Serialize;

use crate::TemplateType;

/// License every starter template is published under.
pub const TEMPLATE_LICENSE: &str = "MIT";

/// A starter template developers can build a game from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    /// Template identifier.
    pub id: TemplateType,
    /// Display name.
    pub name: &'static str,
    /// One-line summary.
    pub description: &'static str,
    /// Source repository.
    pub repository: &'static str,
    /// SPDX license identifier.
    pub license: &'static str,
    /// Headline features.
    pub features: &'static [&'static str],
}

static CATALOG: [Template; 6] = [
    Template {
        id: TemplateType::Rpg,
        name: "RPG Starter",
        description: "Turn-based RPG with Dojo state management",
        repository: "https://github.com/dojoengine/dojo-rpg-starter",
        license: TEMPLATE_LICENSE,
        features: &["Turn-based combat", "Character progression", "Inventory system"],
    },
    Template {
        id: TemplateType::Platformer,
        name: "2D Platformer",
        description: "Physics-based platformer template",
        repository: "https://github.com/dojoengine/dojo-platformer",
        license: TEMPLATE_LICENSE,
        features: &["Physics engine", "Level editor", "Collectibles"],
    },
    Template {
        id: TemplateType::CardBattle,
        name: "Card Battle",
        description: "Deck-building card game framework",
        repository: "https://github.com/dojoengine/dojo-card-battle",
        license: TEMPLATE_LICENSE,
        features: &["Deck builder", "PvP battles", "Card crafting"],
    },
    Template {
        id: TemplateType::Strategy,
        name: "Strategy Base",
        description: "Real-time strategy game template",
        repository: "https://github.com/dojoengine/dojo-strategy",
        license: TEMPLATE_LICENSE,
        features: &["Resource management", "Unit control", "Base building"],
    },
    Template {
        id: TemplateType::Puzzle,
        name: "Puzzle Kit",
        description: "Match-3 and puzzle mechanics",
        repository: "https://github.com/dojoengine/dojo-puzzle",
        license: TEMPLATE_LICENSE,
        features: &["Match-3 engine", "Power-ups", "Level progression"],
    },
    Template {
        id: TemplateType::Multiplayer,
        name: "Multiplayer Starter",
        description: "Online multiplayer with Dojo",
        repository: "https://github.com/dojoengine/dojo-multiplayer",
        license: TEMPLATE_LICENSE,
        features: &["Real-time sync", "Matchmaking", "Leaderboards"],
    },
];

/// All templates, in catalog order.
#[must_use]
pub fn catalog() -> &'static [Template] {
    &CATALOG
}

/// Look up the template for a type.
#[must_use]
pub fn template(kind: TemplateType) -> &'static Template {
    // CATALOG has one entry per variant, in TemplateType::ALL order.
    let index = TemplateType::ALL
        .iter()
        .position(|t| *t == kind)
        .unwrap_or_default();
    &CATALOG[index]
}
