//! Publishing a game: deploy its contracts, settle the fee, go live.
//!
//! The game is resolved on a plain connection and both provider calls run
//! with no transaction open. Only once they have succeeded does the workflow
//! open a write transaction for the status change, the world address and the
//! ledger row, committing all three together. The `draft` compare-and-set in
//! [`games::mark_published`] rejects a game that was published or deleted
//! while the providers ran.

use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;

use launchpad_core::{
    Amount, DeployedContracts, Game, GameHandle, LaunchpadError, NewTransaction, PaymentMethod,
    PaymentTransaction, Result, TransactionHandle, TransactionStatus,
};
use launchpad_store::{games, transactions, users, SqliteStore, StoreError};

use crate::providers::Providers;
use crate::workflows::with_timeout;

/// Platforms a published game is distributed to.
pub const PLATFORMS: [&str; 3] = ["iOS", "Android", "Web"];

/// A publish request.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishRequest {
    /// Game to publish.
    pub game_id: GameHandle,
    /// Rail the fee is paid through.
    pub payment_method: PaymentMethod,
    /// Fee amount, in the rail's currency.
    pub payment_amount: Amount,
}

/// Everything a publish needs besides the store connection.
#[derive(Clone, Copy)]
pub struct PublishContext<'a> {
    /// Provider adapters.
    pub providers: &'a Providers,
    /// Fee recipient on Starknet.
    pub platform_strk_address: &'a str,
    /// Fee recipient on Bitcoin.
    pub platform_btc_address: &'a str,
    /// Upper bound for each provider call.
    pub provider_timeout: Duration,
}

/// A successful publish.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    /// The game, now `published`.
    pub game: Game,
    /// Contracts deployed for it.
    pub contracts: DeployedContracts,
    /// Reference returned by the payment rail.
    pub settlement_reference: String,
    /// The ledger entry recording the fee.
    pub transaction: PaymentTransaction,
}

/// Publish a draft game.
///
/// # Errors
///
/// - `NotFound` if the game or its developer doesn't exist.
/// - `Conflict` if the game is not in `draft`.
/// - `Provider` if contract deployment fails or times out.
/// - `PaymentFailed` if settlement fails or times out.
pub async fn publish_game(
    store: &SqliteStore,
    ctx: PublishContext<'_>,
    request: &PublishRequest,
) -> Result<PublishOutcome> {
    let (game, developer) = {
        let mut conn = store.acquire().await?;
        let game = games::get_by_handle(&mut conn, &request.game_id)
            .await?
            .ok_or_else(|| LaunchpadError::not_found("game", &request.game_id))?;
        let developer = users::get(&mut conn, game.developer_id)
            .await?
            .ok_or_else(|| LaunchpadError::not_found("user", game.developer_id))?;
        (game, developer)
    };

    if !game.is_publishable() {
        return Err(LaunchpadError::Conflict(format!(
            "game {} is already {}",
            game.game_id, game.status
        )));
    }

    let world_address = match &game.world_address {
        Some(address) => address.clone(),
        None => {
            with_timeout(
                "world",
                ctx.provider_timeout,
                ctx.providers
                    .world
                    .create_world(&game.title, game.template_type),
            )
            .await?
        }
    };

    let contracts = with_timeout(
        "world",
        ctx.provider_timeout,
        ctx.providers
            .world
            .deploy_contracts(&game.game_id, &world_address),
    )
    .await
    .map_err(|e| as_provider_error("world", e))?;

    let sender = developer.wallet_address.as_deref().unwrap_or_default();
    let settlement = match request.payment_method {
        PaymentMethod::ChipiPay => {
            ctx.providers.payments.settle_ledger_payment(
                sender,
                ctx.platform_strk_address,
                &request.payment_amount,
            )
        }
        rail @ (PaymentMethod::Xverse | PaymentMethod::Vesu) => {
            ctx.providers.payments.settle_alternate_rail(
                rail,
                sender,
                ctx.platform_btc_address,
                &request.payment_amount,
            )
        }
    };
    let settlement_reference = with_timeout("payments", ctx.provider_timeout, settlement)
        .await
        .map_err(as_payment_failure)?;

    let mut tx = store.begin().await?;

    let game = games::mark_published(&mut tx, game.id, Utc::now(), &world_address)
        .await
        .inspect_err(|e| {
            tracing::error!(
                game_id = %request.game_id,
                settlement_reference = %settlement_reference,
                error = %e,
                "Fee settled but game could not be marked published"
            );
        })?;

    let transaction = transactions::insert(
        &mut tx,
        TransactionHandle::generate(),
        &NewTransaction {
            user_id: developer.id,
            payment_method: request.payment_method,
            amount: request.payment_amount.clone(),
            status: TransactionStatus::Completed,
            blockchain_tx_hash: Some(settlement_reference.clone()),
        },
    )
    .await?;

    tx.commit().await.map_err(StoreError::from)?;

    tracing::info!(
        game_id = %game.game_id,
        user_id = %developer.id,
        transaction_id = %transaction.transaction_id,
        payment_method = %request.payment_method,
        amount = %request.payment_amount,
        "Game published"
    );

    Ok(PublishOutcome {
        game,
        contracts,
        settlement_reference,
        transaction,
    })
}

fn as_provider_error(service: &str, err: LaunchpadError) -> LaunchpadError {
    match err {
        LaunchpadError::Provider { .. } => err,
        other => LaunchpadError::Provider {
            service: service.to_string(),
            message: other.to_string(),
        },
    }
}

fn as_payment_failure(err: LaunchpadError) -> LaunchpadError {
    match err {
        LaunchpadError::PaymentFailed(_) => err,
        LaunchpadError::Provider { message, .. } => LaunchpadError::PaymentFailed(message),
        other => LaunchpadError::PaymentFailed(other.to_string()),
    }
}
