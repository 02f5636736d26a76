//! Application state.

use std::sync::Arc;
use std::time::Duration;

use launchpad_core::Result;
use launchpad_store::SqliteStore;

use crate::config::ServiceConfig;
use crate::crypto::{generate_key, AesGcmCipher, MessageCipher};
use crate::providers::Providers;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The record store.
    pub store: Arc<SqliteStore>,

    /// Service configuration.
    pub config: ServiceConfig,

    /// External service adapters.
    pub providers: Providers,
}

impl AppState {
    /// Create the application state with the in-process providers.
    ///
    /// # Errors
    ///
    /// Returns a cipher error if the configured encryption key is malformed.
    pub fn new(store: Arc<SqliteStore>, config: ServiceConfig) -> Result<Self> {
        let cipher: Arc<dyn MessageCipher> = match &config.encryption_key {
            Some(key) => {
                let cipher = AesGcmCipher::from_base64(key)?;
                tracing::info!("Message cipher configured");
                Arc::new(cipher)
            }
            None => {
                tracing::warn!(
                    "ENCRYPTION_KEY not configured - using an ephemeral key, \
                     encrypted chat history will not survive a restart"
                );
                Arc::new(AesGcmCipher::new(&generate_key()?)?)
            }
        };

        Ok(Self::with_providers(store, config, Providers::stubs(cipher)))
    }

    /// Create the application state with explicit providers.
    #[must_use]
    pub fn with_providers(store: Arc<SqliteStore>, config: ServiceConfig, providers: Providers) -> Self {
        Self {
            store,
            config,
            providers,
        }
    }

    /// Upper bound for a single provider call.
    #[must_use]
    pub fn provider_timeout(&self) -> Duration {
        self.config.provider_timeout()
    }
}
