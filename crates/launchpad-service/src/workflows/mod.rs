//! Multi-step operations over the record store and the provider adapters.

pub mod chat;
pub mod publish;

use std::future::Future;
use std::time::Duration;

use launchpad_core::{LaunchpadError, Result};

pub use chat::{decrypt_message, send_message, ChatOutcome, ChatRequest};
pub use publish::{publish_game, PublishContext, PublishOutcome, PublishRequest};

/// Run a provider call with an upper bound. Timing out is a `Provider` error.
pub(crate) async fn with_timeout<T>(
    service: &str,
    limit: Duration,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
        tracing::warn!(service = %service, timeout_secs = limit.as_secs(), "Provider call timed out");
        Err(LaunchpadError::Provider {
            service: service.to_string(),
            message: format!("timed out after {}s", limit.as_secs()),
        })
    })
}
