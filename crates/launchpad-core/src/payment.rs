//! Payment methods, amounts and the transaction ledger.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LaunchpadError, Result, UnknownVariant};
use crate::{TransactionHandle, TransactionKey, UserId};

/// Maximum number of fractional digits accepted in an [`Amount`].
pub const MAX_AMOUNT_DECIMALS: usize = 18;

/// Settlement rail chosen by the developer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Starknet ledger payment, settled in STRK.
    ChipiPay,
    /// Bitcoin wallet rail.
    Xverse,
    /// Bitcoin lending rail.
    Vesu,
}

impl PaymentMethod {
    /// All methods, in catalog order.
    pub const ALL: [Self; 3] = [Self::ChipiPay, Self::Xverse, Self::Vesu];

    /// The stored and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChipiPay => "chipi_pay",
            Self::Xverse => "xverse",
            Self::Vesu => "vesu",
        }
    }

    /// The currency this method settles in.
    #[must_use]
    pub const fn currency(self) -> Currency {
        match self {
            Self::ChipiPay => Currency::Strk,
            Self::Xverse | Self::Vesu => Currency::Btc,
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("payment method", s))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Starknet token.
    #[serde(rename = "STRK")]
    Strk,
    /// Bitcoin.
    #[serde(rename = "BTC")]
    Btc,
}

impl Currency {
    /// The stored and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strk => "STRK",
            Self::Btc => "BTC",
        }
    }
}

impl FromStr for Currency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "STRK" => Ok(Self::Strk),
            "BTC" => Ok(Self::Btc),
            other => Err(UnknownVariant::new("currency", other)),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Submitted, awaiting confirmation.
    Pending,
    /// Settled.
    Completed,
    /// Rejected by the rail.
    Failed,
}

impl TransactionStatus {
    /// The stored and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(UnknownVariant::new("transaction status", other)),
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A strictly positive decimal amount, kept in its textual form.
///
/// Amounts are never converted to floating point: the rails and the ledger
/// both receive the exact string the developer submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(String);

impl Amount {
    /// Borrow the decimal text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Amount {
    type Err = LaunchpadError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let invalid = || LaunchpadError::Validation(format!("invalid amount: {s:?}"));

        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (text, None),
        };

        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || fraction.is_some_and(|f| !all_digits(f)) {
            return Err(invalid());
        }
        if fraction.is_some_and(|f| f.len() > MAX_AMOUNT_DECIMALS) {
            return Err(LaunchpadError::Validation(format!(
                "amount has more than {MAX_AMOUNT_DECIMALS} decimal places"
            )));
        }

        let is_zero = text.bytes().all(|b| b == b'0' || b == b'.');
        if is_zero {
            return Err(LaunchpadError::Validation("amount must be positive".into()));
        }

        Ok(Self(text.to_string()))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Amount {
    type Error = LaunchpadError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// An entry in the append-only payment ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTransaction {
    /// Row key.
    pub id: TransactionKey,
    /// External handle.
    pub transaction_id: TransactionHandle,
    /// Paying user.
    pub user_id: UserId,
    /// Rail used.
    pub payment_method: PaymentMethod,
    /// Amount paid.
    pub amount: Amount,
    /// Always `payment_method.currency()`.
    pub currency: Currency,
    /// Settlement state.
    pub status: TransactionStatus,
    /// Reference returned by the rail.
    pub blockchain_tx_hash: Option<String>,
    /// When the row was recorded.
    pub created_at: DateTime<Utc>,
}

/// Input for recording a ledger entry.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// Paying user.
    pub user_id: UserId,
    /// Rail used.
    pub payment_method: PaymentMethod,
    /// Amount paid.
    pub amount: Amount,
    /// Settlement state.
    pub status: TransactionStatus,
    /// Reference returned by the rail.
    pub blockchain_tx_hash: Option<String>,
}

/// A catalog entry describing one payment rail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentMethodInfo {
    /// Method identifier.
    pub id: PaymentMethod,
    /// Display name.
    pub name: &'static str,
    /// Settlement chain.
    pub chain: &'static str,
    /// Settlement currency.
    pub currency: Currency,
    /// Fee, as a percentage string.
    pub fee: &'static str,
    /// Typical settlement latency.
    pub settlement: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_follows_method() {
        assert_eq!(PaymentMethod::ChipiPay.currency(), Currency::Strk);
        assert_eq!(PaymentMethod::Xverse.currency(), Currency::Btc);
        assert_eq!(PaymentMethod::Vesu.currency(), Currency::Btc);
    }

    #[test]
    fn method_wire_names() {
        assert_eq!(
            serde_json::from_str::<PaymentMethod>("\"chipi_pay\"").unwrap(),
            PaymentMethod::ChipiPay
        );
        assert!(serde_json::from_str::<PaymentMethod>("\"paypal\"").is_err());
        assert_eq!(serde_json::to_string(&Currency::Btc).unwrap(), "\"BTC\"");
    }

    #[test]
    fn amount_accepts_positive_decimals() {
        for ok in ["10", "0.5", "1.25", " 7 ", "000.001"] {
            assert!(ok.parse::<Amount>().is_ok(), "{ok} should parse");
        }
        assert_eq!("  3.5 ".parse::<Amount>().unwrap().as_str(), "3.5");
    }

    #[test]
    fn amount_rejects_malformed_or_zero() {
        for bad in ["", "0", "0.00", "-1", "1.", ".5", "1e3", "abc", "1.2.3", "NaN"] {
            assert!(bad.parse::<Amount>().is_err(), "{bad} should be rejected");
        }
        let too_precise = format!("1.{}", "1".repeat(MAX_AMOUNT_DECIMALS + 1));
        assert!(too_precise.parse::<Amount>().is_err());
    }

    #[test]
    fn amount_deserializes_with_validation() {
        assert!(serde_json::from_str::<Amount>("\"10\"").is_ok());
        assert!(serde_json::from_str::<Amount>("\"-10\"").is_err());
    }
}
