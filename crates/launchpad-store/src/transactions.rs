//! The `transactions` table: an append-only payment ledger.
//!
//! There is deliberately no update function. A database trigger rejects any
//! `UPDATE` on the table as well.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use launchpad_core::{
    NewTransaction, PaymentTransaction, TransactionHandle, TransactionKey, UserId,
};

use crate::error::{Result, StoreError};

#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    transaction_id: String,
    user_id: i64,
    payment_method: String,
    amount: String,
    currency: String,
    status: String,
    blockchain_tx_hash: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for PaymentTransaction {
    type Error = StoreError;

    fn try_from(row: TransactionRow) -> Result<Self> {
        Ok(Self {
            id: TransactionKey::new(row.id),
            transaction_id: row.transaction_id.parse().map_err(StoreError::corrupt)?,
            user_id: UserId::new(row.user_id),
            payment_method: row.payment_method.parse().map_err(StoreError::corrupt)?,
            amount: row.amount.parse().map_err(StoreError::corrupt)?,
            currency: row.currency.parse().map_err(StoreError::corrupt)?,
            status: row.status.parse().map_err(StoreError::corrupt)?,
            blockchain_tx_hash: row.blockchain_tx_hash,
            created_at: row.created_at,
        })
    }
}

/// Append a ledger entry. The currency is derived from the payment method.
///
/// # Errors
///
/// Returns `StoreError::Conflict` if the handle is taken or the user doesn't exist.
pub async fn insert(
    conn: &mut SqliteConnection,
    handle: TransactionHandle,
    tx: &NewTransaction,
) -> Result<PaymentTransaction> {
    let row: TransactionRow = sqlx::query_as(
        "INSERT INTO transactions
            (transaction_id, user_id, payment_method, amount, currency, status, blockchain_tx_hash, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING *",
    )
    .bind(handle.to_string())
    .bind(tx.user_id.get())
    .bind(tx.payment_method.as_str())
    .bind(tx.amount.as_str())
    .bind(tx.payment_method.currency().as_str())
    .bind(tx.status.as_str())
    .bind(&tx.blockchain_tx_hash)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await?;

    row.try_into()
}

/// Get a ledger entry by its external handle.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub async fn get_by_handle(
    conn: &mut SqliteConnection,
    handle: &TransactionHandle,
) -> Result<Option<PaymentTransaction>> {
    let row: Option<TransactionRow> =
        sqlx::query_as("SELECT * FROM transactions WHERE transaction_id = ?")
            .bind(handle.to_string())
            .fetch_optional(&mut *conn)
            .await?;

    row.map(PaymentTransaction::try_from).transpose()
}

/// List a user's ledger entries, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub async fn list_by_user(conn: &mut SqliteConnection, user: UserId) -> Result<Vec<PaymentTransaction>> {
    let rows: Vec<TransactionRow> =
        sqlx::query_as("SELECT * FROM transactions WHERE user_id = ? ORDER BY id DESC")
            .bind(user.get())
            .fetch_all(&mut *conn)
            .await?;

    rows.into_iter().map(PaymentTransaction::try_from).collect()
}

/// Purge a ledger entry. Administrative use only; nothing in the HTTP API calls this.
///
/// # Errors
///
/// Returns `StoreError::NotFound` if the entry doesn't exist.
pub async fn delete(conn: &mut SqliteConnection, id: TransactionKey) -> Result<()> {
    let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
        .bind(id.get())
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("transaction", id));
    }
    Ok(())
}
