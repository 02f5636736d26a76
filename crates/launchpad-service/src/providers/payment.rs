//! Payment rails.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use launchpad_core::{Amount, Currency, LaunchpadError, PaymentMethod, PaymentMethodInfo, Result};

/// The payment methods the platform accepts, in display order.
pub static PAYMENT_METHODS: [PaymentMethodInfo; 3] = [
    PaymentMethodInfo {
        id: PaymentMethod::ChipiPay,
        name: "Chipi Pay",
        chain: "Starknet",
        currency: Currency::Strk,
        fee: "0.02%",
        settlement: "Instant",
    },
    PaymentMethodInfo {
        id: PaymentMethod::Xverse,
        name: "Xverse",
        chain: "Bitcoin",
        currency: Currency::Btc,
        fee: "0.05%",
        settlement: "~10 minutes",
    },
    PaymentMethodInfo {
        id: PaymentMethod::Vesu,
        name: "Vesu",
        chain: "Bitcoin",
        currency: Currency::Btc,
        fee: "0.03%",
        settlement: "~10 minutes",
    },
];

/// Settles publishing fees.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Settle a STRK payment on the Starknet ledger. Returns the settlement reference.
    async fn settle_ledger_payment(&self, from: &str, to: &str, amount: &Amount) -> Result<String>;

    /// Settle a BTC payment through `rail`. Returns the settlement reference.
    async fn settle_alternate_rail(
        &self,
        rail: PaymentMethod,
        from: &str,
        to: &str,
        amount: &Amount,
    ) -> Result<String>;

    /// The methods this provider can settle.
    fn list_methods(&self) -> Vec<PaymentMethodInfo> {
        PAYMENT_METHODS.to_vec()
    }
}

/// Deterministic in-process payment provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubPaymentProvider;

#[async_trait]
impl PaymentProvider for StubPaymentProvider {
    async fn settle_ledger_payment(&self, from: &str, to: &str, amount: &Amount) -> Result<String> {
        let digest = Sha256::new()
            .chain_update(from.as_bytes())
            .chain_update(to.as_bytes())
            .chain_update(amount.as_str().as_bytes())
            .finalize();
        let reference = format!("0x{}", hex::encode(digest));

        tracing::info!(amount = %amount, reference = %reference, "Starknet payment settled");
        Ok(reference)
    }

    async fn settle_alternate_rail(
        &self,
        rail: PaymentMethod,
        _from: &str,
        _to: &str,
        amount: &Amount,
    ) -> Result<String> {
        if rail.currency() != Currency::Btc {
            return Err(LaunchpadError::PaymentFailed(format!(
                "{rail} is not a Bitcoin rail"
            )));
        }

        let id = Uuid::new_v4().simple().to_string();
        let reference = format!("{}_{}", rail.as_str(), &id[..16]);

        tracing::info!(rail = %rail, amount = %amount, reference = %reference, "Bitcoin payment settled");
        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn ledger_reference_is_sha256_of_inputs() {
        let provider = StubPaymentProvider;
        let first = provider
            .settle_ledger_payment("0xalice", "0x_platform_address", &amount("10"))
            .await
            .unwrap();
        let again = provider
            .settle_ledger_payment("0xalice", "0x_platform_address", &amount("10"))
            .await
            .unwrap();

        assert_eq!(first, again);
        assert_eq!(first.len(), 2 + 64);
        assert!(first.starts_with("0x"));
    }

    #[tokio::test]
    async fn alternate_rail_reference_is_prefixed() {
        let provider = StubPaymentProvider;
        let reference = provider
            .settle_alternate_rail(PaymentMethod::Vesu, "bc1q", "platform_btc_address", &amount("0.001"))
            .await
            .unwrap();

        let suffix = reference.strip_prefix("vesu_").unwrap();
        assert_eq!(suffix.len(), 16);
        assert!(suffix.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn ledger_method_is_not_an_alternate_rail() {
        let err = StubPaymentProvider
            .settle_alternate_rail(PaymentMethod::ChipiPay, "a", "b", &amount("1"))
            .await
            .unwrap_err();
        assert!(matches!(err, LaunchpadError::PaymentFailed(_)));
    }

    #[test]
    fn catalog_currency_matches_method() {
        let methods = StubPaymentProvider.list_methods();
        assert_eq!(methods.len(), 3);
        for info in methods {
            assert_eq!(info.currency, info.id.currency());
        }
    }
}
