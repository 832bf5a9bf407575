//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the desk.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DeskConfig {
    /// Ledger LCD endpoints.
    pub network: NetworkConfig,

    /// The option contract to talk to.
    pub contract: ContractConfig,

    /// Account and wallet bridge used to sign.
    pub wallet: WalletConfig,

    /// Fee attached to every transaction.
    pub fee: FeeConfig,

    /// Confirmation polling timings.
    pub polling: PollingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Ledger connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// LCD REST endpoint URL.
    pub lcd_url: String,

    /// Failover LCD endpoint URLs.
    pub failover_urls: Vec<String>,

    /// Chain ID (e.g., "columbus-5" for mainnet, "localterra" for LocalTerra).
    pub chain_id: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            lcd_url: "https://lcd.terra.dev".to_string(),
            failover_urls: Vec::new(),
            chain_id: "columbus-5".to_string(),
            request_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ContractConfig {
    /// Address of the option contract.
    pub address: String,
}

/// Wallet configuration. Credentials never live here.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Account address that signs transactions.
    pub address: String,

    /// Base URL of the wallet bridge.
    pub signer_url: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            signer_url: "http://127.0.0.1:8710".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeeConfig {
    pub gas_limit: u64,
    pub amount: u64,
    pub denom: String,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            gas_limit: 200_000,
            amount: 10_000,
            denom: "uluna".to_string(),
        }
    }
}

/// Confirmation polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    /// How long to poll at the fast interval, in seconds.
    pub short_poll_window_secs: u64,

    /// Give up after this many seconds.
    pub overall_timeout_secs: u64,

    /// Delay between attempts inside the short-poll window.
    pub fast_interval_ms: u64,

    /// Delay between attempts after the short-poll window.
    pub slow_interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            short_poll_window_secs: 60,
            overall_timeout_secs: 3600,
            fast_interval_ms: 500,
            slow_interval_ms: 10_000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeskConfig::default();
        assert_eq!(config.polling.short_poll_window_secs, 60);
        assert_eq!(config.polling.overall_timeout_secs, 3600);
        assert_eq!(config.fee.gas_limit, 200_000);
        assert_eq!(config.fee.denom, "uluna");
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: DeskConfig = toml::from_str(
            r#"
            [network]
            chain_id = "localterra"

            [polling]
            short_poll_window_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.network.chain_id, "localterra");
        assert_eq!(config.network.lcd_url, "https://lcd.terra.dev");
        assert_eq!(config.polling.short_poll_window_secs, 5);
        assert_eq!(config.polling.slow_interval_ms, 10_000);
    }
}
