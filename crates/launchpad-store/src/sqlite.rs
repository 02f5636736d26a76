//! `SQLite` connection pool and scoped transactions.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;

use crate::error::{Result, StoreError};
use crate::schema::all_tables;

/// How long a writer waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool size for file-backed databases.
const MAX_CONNECTIONS: u32 = 8;

/// A scoped unit of work. Dropping it without [`sqlx::Transaction::commit`]
/// rolls every write back.
pub type StoreTx = sqlx::Transaction<'static, Sqlite>;

/// SQLite-backed record store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at a `sqlite:` URL and apply migrations.
    ///
    /// In-memory URLs get a single-connection pool so every caller sees the
    /// same database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the database cannot be opened,
    /// or a migration fails.
    pub async fn open(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?;
        if database_url.contains(":memory:") {
            Self::connect(options, 1).await
        } else {
            Self::connect(options, MAX_CONNECTIONS).await
        }
    }

    /// Open (creating if needed) the database file at `path` and apply migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or a migration fails.
    pub async fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let options = SqliteConnectOptions::new().filename(path);
        Self::connect(options, MAX_CONNECTIONS).await
    }

    async fn connect(options: SqliteConnectOptions, max_connections: u32) -> Result<Self> {
        let options = options
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        // A single-connection pool must never recycle its connection: for an
        // in-memory database that would drop every table.
        let keep_alive = max_connections == 1;
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout((!keep_alive).then_some(Duration::from_secs(600)))
            .max_lifetime((!keep_alive).then_some(Duration::from_secs(1800)))
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let store = Self { pool };
        store.verify_schema().await?;

        tracing::debug!(max_connections, "Record store ready");
        Ok(store)
    }

    /// Check that every expected table exists.
    async fn verify_schema(&self) -> Result<()> {
        let present: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table'")
                .fetch_all(&self.pool)
                .await?;

        if let Some(missing) = all_tables()
            .into_iter()
            .find(|table| !present.iter().any(|p| p == table))
        {
            return Err(StoreError::Database(format!("table missing after migration: {missing}")));
        }
        Ok(())
    }

    /// Begin a write transaction with `BEGIN IMMEDIATE`.
    ///
    /// The write lock is taken up front, so a transaction that reads before
    /// it writes cannot hit `SQLITE_BUSY_SNAPSHOT` when another writer commits
    /// in between. Other writers wait on it for at most the busy timeout;
    /// keep provider calls outside the transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection can be acquired or the write lock is
    /// not granted within the busy timeout.
    pub async fn begin(&self) -> Result<StoreTx> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    /// Acquire a plain connection for reads and single-statement writes.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection can be acquired.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }

    /// Round-trip a trivial query.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_creates_all_tables() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open_path(dir.path().join("launchpad.db"))
            .await
            .unwrap();

        store.verify_schema().await.unwrap();
        store.ping().await.unwrap();
    }

    #[tokio::test]
    async fn reopening_an_existing_database_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launchpad.db");

        let first = SqliteStore::open_path(&path).await.unwrap();
        first.close().await;

        let second = SqliteStore::open_path(&path).await.unwrap();
        second.ping().await.unwrap();
    }

    #[tokio::test]
    async fn in_memory_url_is_supported() {
        let store = SqliteStore::open("sqlite::memory:").await.unwrap();
        store.ping().await.unwrap();
    }
}
