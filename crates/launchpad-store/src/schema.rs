//! Database schema definitions.
//!
//! The DDL lives in `migrations/`; this module names the tables so the store
//! can check that a database it opens has the expected layout.

/// Table names for the `SQLite` database.
pub mod table {
    /// Registered developers, keyed by `id`, unique on `username` and `email`.
    pub const USERS: &str = "users";

    /// Game projects, unique on the external `game_id` handle.
    pub const GAMES: &str = "games";

    /// Uploaded files, cascading from `games`.
    pub const GAME_ASSETS: &str = "game_assets";

    /// Append-only payment ledger, unique on `transaction_id`.
    pub const TRANSACTIONS: &str = "transactions";

    /// Chat exchanges.
    pub const CHAT_MESSAGES: &str = "chat_messages";
}

/// Returns all table names the migrations create.
#[must_use]
pub fn all_tables() -> Vec<&'static str> {
    vec![
        table::USERS,
        table::GAMES,
        table::GAME_ASSETS,
        table::TRANSACTIONS,
        table::CHAT_MESSAGES,
    ]
}
