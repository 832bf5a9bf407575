//! Ledger types and error definitions.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// Re-export NetworkConfig from config module to avoid duplication
pub use crate::config::schema::NetworkConfig;
use crate::config::schema::FeeConfig;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// LCD connection or request failed.
    #[error("LCD error: {0}")]
    Rpc(String),

    /// LCD request timed out.
    #[error("LCD timeout after {0} seconds")]
    Timeout(u64),

    /// The ledger has no record (yet) for the requested item.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The transaction was rejected before it reached the ledger.
    #[error("Transaction rejected: {0}")]
    Submission(String),

    /// A response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Transaction hash is empty or malformed.
    #[error("Invalid transaction hash: {0:?}")]
    InvalidHash(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: String, actual: String },

    /// Remote signer misconfigured or unreachable.
    #[error("Signer error: {0}")]
    Signer(String),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Transaction hash returned by the ledger on submission.
///
/// Always non-empty, so a poller can never start without one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    pub fn new(hash: impl Into<String>) -> LedgerResult<Self> {
        let hash = hash.into();
        let trimmed = hash.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(LedgerError::InvalidHash(hash));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TxHash {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TxHash::new(raw).map_err(serde::de::Error::custom)
    }
}

/// A single denomination amount, e.g. `10uusd`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    #[serde(with = "string_u128")]
    pub amount: u128,
}

impl Coin {
    pub fn new(amount: u128, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| format!("coin '{}' has no denomination", s))?;
        let (amount, denom) = s.split_at(split);
        if amount.is_empty() {
            return Err(format!("coin '{}' has no amount", s));
        }
        if !denom.chars().all(|c| c.is_ascii_alphanumeric() || c == '/') {
            return Err(format!("coin '{}' has an invalid denomination", s));
        }
        let amount = amount
            .parse::<u128>()
            .map_err(|e| format!("coin '{}': {}", s, e))?;
        Ok(Coin::new(amount, denom))
    }
}

/// Fee attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    pub gas_limit: u64,
    pub amount: Vec<Coin>,
}

impl From<&FeeConfig> for Fee {
    fn from(config: &FeeConfig) -> Self {
        Self {
            gas_limit: config.gas_limit,
            amount: vec![Coin::new(u128::from(config.amount), config.denom.clone())],
        }
    }
}

/// A `MsgExecuteContract` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteContractMsg {
    pub sender: String,
    pub contract: String,
    pub msg: serde_json::Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub funds: Vec<Coin>,
}

/// Everything the signer needs to sign and broadcast a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxRequest {
    /// Signer identity (account address).
    pub sender: String,
    pub fee: Fee,
    /// Messages, executed in order.
    pub msgs: Vec<ExecuteContractMsg>,
}

/// The ledger's record of an included transaction (LCD `tx_response`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub txhash: String,
    #[serde(with = "string_u64")]
    pub height: u64,
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub codespace: String,
    #[serde(default)]
    pub raw_log: String,
    #[serde(default, with = "string_u64")]
    pub gas_wanted: u64,
    #[serde(default, with = "string_u64")]
    pub gas_used: u64,
    #[serde(default)]
    pub timestamp: String,
    /// Remaining response fields (`logs`, `events`, `data`, `tx`, ...), kept as returned.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Confirmation {
    /// Whether the transaction executed without error.
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// One-line description of a failed execution; `None` on success.
    pub fn failure_summary(&self) -> Option<String> {
        if self.is_success() {
            return None;
        }
        let codespace = if self.codespace.is_empty() {
            String::new()
        } else {
            format!(" ({})", self.codespace)
        };
        Some(format!(
            "Transaction {} failed with code {}{}: {}",
            self.txhash, self.code, codespace, self.raw_log
        ))
    }
}

/// Cosmos encodes large integers as JSON strings; accept both forms.
macro_rules! string_int {
    ($module:ident, $ty:ty) => {
        pub(crate) mod $module {
            use serde::{Deserialize, Deserializer, Serializer};

            #[derive(Deserialize)]
            #[serde(untagged)]
            enum Repr {
                Str(String),
                Num(u64),
            }

            pub fn serialize<S: Serializer>(value: &$ty, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&value.to_string())
            }

            pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<$ty, D::Error> {
                match Repr::deserialize(deserializer)? {
                    Repr::Str(s) => s.parse().map_err(serde::de::Error::custom),
                    Repr::Num(n) => Ok(<$ty>::from(n)),
                }
            }
        }
    };
}

string_int!(string_u64, u64);
string_int!(string_u128, u128);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_hash_rejects_empty() {
        assert!(TxHash::new("").is_err());
        assert!(TxHash::new("   ").is_err());
        assert!(TxHash::new("AB CD").is_err());
        assert_eq!(TxHash::new(" ABC123 ").unwrap().as_str(), "ABC123");
    }

    #[test]
    fn test_coin_parsing() {
        let coin: Coin = "10uusd".parse().unwrap();
        assert_eq!(coin, Coin::new(10, "uusd"));
        assert_eq!(coin.to_string(), "10uusd");

        let ibc: Coin = "5ibc/27394FB0".parse().unwrap();
        assert_eq!(ibc.denom, "ibc/27394FB0");

        assert!("uusd".parse::<Coin>().is_err());
        assert!("100".parse::<Coin>().is_err());
        assert!("10 uusd".parse::<Coin>().is_err());
    }

    #[test]
    fn test_coin_amount_is_string_encoded() {
        let json = serde_json::to_value(Coin::new(10, "uusd")).unwrap();
        assert_eq!(json, serde_json::json!({ "denom": "uusd", "amount": "10" }));
    }

    #[test]
    fn test_confirmation_from_lcd_json() {
        let body = serde_json::json!({
            "height": "7391623",
            "txhash": "ABC123",
            "codespace": "",
            "code": 0,
            "raw_log": "[]",
            "gas_wanted": "200000",
            "gas_used": "151234",
            "timestamp": "2022-04-01T10:00:00Z",
            "logs": []
        });
        let confirmation: Confirmation = serde_json::from_value(body).unwrap();
        assert_eq!(confirmation.height, 7_391_623);
        assert_eq!(confirmation.gas_used, 151_234);
        assert!(confirmation.is_success());
        assert_eq!(confirmation.failure_summary(), None);
    }

    #[test]
    fn test_confirmation_keeps_unmodelled_fields() {
        let body = serde_json::json!({
            "height": "7391623",
            "txhash": "ABC",
            "code": 0,
            "data": "0A2A0A28",
            "info": "",
            "logs": [{
                "msg_index": 0,
                "events": [{
                    "type": "wasm",
                    "attributes": [{ "key": "action", "value": "fund_collateral" }]
                }]
            }],
            "events": [{ "type": "message", "attributes": [] }],
            "tx": { "@type": "/cosmos.tx.v1beta1.Tx" }
        });
        let confirmation: Confirmation = serde_json::from_value(body).unwrap();
        assert_eq!(confirmation.txhash, "ABC");
        assert!(!confirmation.extra.contains_key("txhash"));

        let out = serde_json::to_value(&confirmation).unwrap();
        assert_eq!(out["logs"][0]["events"][0]["attributes"][0]["value"], "fund_collateral");
        assert_eq!(out["events"][0]["type"], "message");
        assert_eq!(out["data"], "0A2A0A28");
        assert_eq!(out["tx"]["@type"], "/cosmos.tx.v1beta1.Tx");
        assert_eq!(out["height"], "7391623");
    }

    #[test]
    fn test_failed_confirmation() {
        let body = serde_json::json!({
            "height": 10,
            "txhash": "DEF456",
            "code": 5,
            "codespace": "wasm",
            "raw_log": "Unauthorized"
        });
        let confirmation: Confirmation = serde_json::from_value(body).unwrap();
        assert!(!confirmation.is_success());
        assert_eq!(confirmation.gas_wanted, 0);
        assert_eq!(
            confirmation.failure_summary().as_deref(),
            Some("Transaction DEF456 failed with code 5 (wasm): Unauthorized")
        );
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::Timeout(10);
        assert_eq!(err.to_string(), "LCD timeout after 10 seconds");

        let err = LedgerError::ChainMismatch {
            expected: "columbus-5".into(),
            actual: "bombay-12".into(),
        };
        assert!(err.to_string().contains("bombay-12"));
    }
}
