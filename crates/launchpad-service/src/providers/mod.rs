//! External service adapters.
//!
//! Each adapter sits behind a trait so workflows can be driven by the
//! in-process stubs in production and by failing doubles in tests.

pub mod assistant;
pub mod payment;
pub mod world;

use std::sync::Arc;

pub use assistant::{CannedAssistant, Documentation, GameAssistant, OptimizationReport, PublishingAnalysis};
pub use payment::{PaymentProvider, StubPaymentProvider, PAYMENT_METHODS};
pub use world::{StubWorldProvider, WorldProvider};

use crate::crypto::MessageCipher;

/// The adapters a request can reach, injected through the application state.
#[derive(Clone)]
pub struct Providers {
    /// World creation and contract deployment.
    pub world: Arc<dyn WorldProvider>,
    /// Payment settlement.
    pub payments: Arc<dyn PaymentProvider>,
    /// Chat message cipher.
    pub cipher: Arc<dyn MessageCipher>,
    /// Documentation and release assistant.
    pub assistant: Arc<dyn GameAssistant>,
}

impl Providers {
    /// The in-process stubs, with the given cipher.
    #[must_use]
    pub fn stubs(cipher: Arc<dyn MessageCipher>) -> Self {
        Self {
            world: Arc::new(StubWorldProvider),
            payments: Arc::new(StubPaymentProvider),
            cipher,
            assistant: Arc::new(CannedAssistant),
        }
    }
}
