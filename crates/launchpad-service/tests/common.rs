//! Common test utilities for launchpad integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use launchpad_core::{Amount, LaunchpadError, PaymentMethod, Result};
use launchpad_service::crypto::AesGcmCipher;
use launchpad_service::providers::{PaymentProvider, Providers, StubPaymentProvider};
use launchpad_service::{create_router, AppState, ServiceConfig};
use launchpad_store::SqliteStore;

/// Base64 of 32 bytes of `0x07`.
pub const TEST_ENCRYPTION_KEY: &str = "BwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwc=";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Temporary directory for the database and files (kept alive for test duration).
    pub _temp_dir: TempDir,
    /// Where uploads are written.
    pub uploads_dir: PathBuf,
    /// Where generated documentation is written.
    pub docs_dir: PathBuf,
}

impl TestHarness {
    /// Create a new test harness with a fresh database and the stub providers.
    pub async fn new() -> Self {
        Self::build(|cipher| Providers::stubs(cipher)).await
    }

    /// Create a harness whose payment provider rejects every settlement.
    pub async fn with_failing_payments() -> Self {
        Self::build(|cipher| Providers {
            payments: Arc::new(RejectingPayments),
            ..Providers::stubs(cipher)
        })
        .await
    }

    /// Create a harness whose payments settle after `delay`.
    pub async fn with_slow_payments(delay: Duration) -> Self {
        Self::build(|cipher| Providers {
            payments: Arc::new(SlowPayments(delay)),
            ..Providers::stubs(cipher)
        })
        .await
    }

    async fn build(providers: impl FnOnce(Arc<AesGcmCipher>) -> Providers) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = SqliteStore::open_path(temp_dir.path().join("launchpad.db"))
            .await
            .expect("Failed to open store");

        let uploads_dir = temp_dir.path().join("uploads");
        let docs_dir = temp_dir.path().join("docs");

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            database_url: "sqlite::memory:".into(),
            uploads_dir: uploads_dir.clone(),
            docs_dir: docs_dir.clone(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
            provider_timeout_seconds: 5,
            platform_strk_address: "0x_platform_address".into(),
            platform_btc_address: "platform_btc_address".into(),
            encryption_key: Some(TEST_ENCRYPTION_KEY.into()),
        };

        let cipher = Arc::new(
            AesGcmCipher::from_base64(TEST_ENCRYPTION_KEY).expect("Failed to build cipher"),
        );
        let state = AppState::with_providers(Arc::new(store), config, providers(cipher));
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            _temp_dir: temp_dir,
            uploads_dir,
            docs_dir,
        }
    }

    /// Register a user and return their id.
    pub async fn register_user(&self, username: &str, email: &str) -> i64 {
        let response = self
            .server
            .post("/users/register")
            .json(&json!({ "username": username, "email": email }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        body["user_id"].as_i64().expect("user_id is a number")
    }

    /// Create a game for `user_id` and return its handle.
    pub async fn create_game(&self, user_id: i64, title: &str, template: &str) -> String {
        let response = self
            .server
            .post("/games/create")
            .add_query_param("user_id", user_id)
            .json(&json!({
                "title": title,
                "description": format!("{title} on-chain"),
                "template_type": template,
            }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        body["game_id"].as_str().expect("game_id is a string").to_string()
    }
}

/// Payment provider whose every rail declines.
struct RejectingPayments;

#[async_trait]
impl PaymentProvider for RejectingPayments {
    async fn settle_ledger_payment(&self, _from: &str, _to: &str, _amount: &Amount) -> Result<String> {
        Err(LaunchpadError::PaymentFailed("insufficient balance".into()))
    }

    async fn settle_alternate_rail(
        &self,
        _rail: PaymentMethod,
        _from: &str,
        _to: &str,
        _amount: &Amount,
    ) -> Result<String> {
        Err(LaunchpadError::PaymentFailed("rail unavailable".into()))
    }
}

/// Stub payment provider that takes `.0` to settle.
struct SlowPayments(Duration);

#[async_trait]
impl PaymentProvider for SlowPayments {
    async fn settle_ledger_payment(&self, from: &str, to: &str, amount: &Amount) -> Result<String> {
        tokio::time::sleep(self.0).await;
        StubPaymentProvider.settle_ledger_payment(from, to, amount).await
    }

    async fn settle_alternate_rail(
        &self,
        rail: PaymentMethod,
        from: &str,
        to: &str,
        amount: &Amount,
    ) -> Result<String> {
        tokio::time::sleep(self.0).await;
        StubPaymentProvider
            .settle_alternate_rail(rail, from, to, amount)
            .await
    }
}
