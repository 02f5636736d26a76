//! Payment and publishing handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use launchpad_core::{
    DeployedContracts, GameHandle, PaymentMethodInfo, PaymentTransaction, TransactionHandle,
};
use launchpad_store::transactions;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::handlers::{load_user, UserQuery};
use crate::state::AppState;
use crate::workflows::publish::PLATFORMS;
use crate::workflows::{publish_game, PublishContext, PublishRequest};

/// Payment catalog response.
#[derive(Debug, Serialize)]
pub struct MethodsResponse {
    /// Accepted methods.
    pub methods: Vec<PaymentMethodInfo>,
}

/// Publish response.
#[derive(Debug, Serialize)]
pub struct PublishResponse {
    /// Human-readable outcome.
    pub message: String,
    /// The published game.
    pub game_id: GameHandle,
    /// Deployed contract addresses.
    pub contracts: DeployedContracts,
    /// Settlement reference from the payment rail.
    pub transaction_hash: String,
    /// Ledger entry handle.
    pub transaction_id: TransactionHandle,
    /// Always `live`.
    pub status: String,
    /// Distribution platforms.
    pub platforms: Vec<String>,
}

/// Payment history response.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// Ledger entries, newest first.
    pub transactions: Vec<PaymentTransaction>,
}

/// List the accepted payment methods.
pub async fn list_methods(State(state): State<Arc<AppState>>) -> Json<MethodsResponse> {
    Json(MethodsResponse {
        methods: state.providers.payments.list_methods(),
    })
}

/// Publish a game: deploy contracts, settle the fee, record the transaction.
pub async fn publish(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<PublishRequest>,
) -> Result<Json<PublishResponse>, ApiError> {
    tracing::debug!(
        game_id = %request.game_id,
        payment_method = %request.payment_method,
        "Publishing game"
    );

    let ctx = PublishContext {
        providers: &state.providers,
        platform_strk_address: &state.config.platform_strk_address,
        platform_btc_address: &state.config.platform_btc_address,
        provider_timeout: state.provider_timeout(),
    };

    let outcome = publish_game(&state.store, ctx, &request)
        .await
        .inspect_err(|e| tracing::warn!(game_id = %request.game_id, error = %e, "Publish failed"))?;

    Ok(Json(PublishResponse {
        message: "Game published successfully".into(),
        game_id: outcome.game.game_id,
        contracts: outcome.contracts,
        transaction_hash: outcome.settlement_reference,
        transaction_id: outcome.transaction.transaction_id,
        status: "live".into(),
        platforms: PLATFORMS.into_iter().map(String::from).collect(),
    }))
}

/// List the acting user's payment history.
pub async fn payment_history(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let mut conn = state.store.acquire().await?;
    load_user(&mut conn, query.user_id).await?;

    let transactions = transactions::list_by_user(&mut conn, query.user_id).await?;
    Ok(Json(HistoryResponse { transactions }))
}

/// Get one ledger entry.
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(transaction_id): Path<String>,
) -> Result<Json<PaymentTransaction>, ApiError> {
    let handle: TransactionHandle = transaction_id.parse()?;

    let mut conn = state.store.acquire().await?;
    let transaction = transactions::get_by_handle(&mut conn, &handle)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("transaction not found: {handle}")))?;

    Ok(Json(transaction))
}
