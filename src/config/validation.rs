//! Configuration validation.
//!
//! Serde handles syntax; this checks values. All problems are reported at
//! once rather than stopping at the first.

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::DeskConfig;

/// Upper bound for both poll windows (one week).
pub const MAX_POLL_WINDOW_SECS: u64 = 7 * 24 * 60 * 60;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate `config`, returning every error found.
pub fn validate_config(config: &DeskConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "network.lcd_url", &config.network.lcd_url);
    for url in &config.network.failover_urls {
        check_url(&mut errors, "network.failover_urls", url);
    }
    if config.network.chain_id.trim().is_empty() {
        errors.push(ValidationError::new("network.chain_id", "must not be empty"));
    }
    if config.network.request_timeout_secs == 0 {
        errors.push(ValidationError::new("network.request_timeout_secs", "must be greater than 0"));
    }

    check_url(&mut errors, "wallet.signer_url", &config.wallet.signer_url);

    if config.fee.gas_limit == 0 {
        errors.push(ValidationError::new("fee.gas_limit", "must be greater than 0"));
    }
    if config.fee.denom.trim().is_empty() {
        errors.push(ValidationError::new("fee.denom", "must not be empty"));
    }

    let polling = &config.polling;
    if polling.overall_timeout_secs == 0 {
        errors.push(ValidationError::new("polling.overall_timeout_secs", "must be greater than 0"));
    }
    if polling.overall_timeout_secs < polling.short_poll_window_secs {
        errors.push(ValidationError::new(
            "polling.overall_timeout_secs",
            format!(
                "must not be shorter than short_poll_window_secs ({})",
                polling.short_poll_window_secs
            ),
        ));
    }
    if polling.short_poll_window_secs > MAX_POLL_WINDOW_SECS {
        errors.push(ValidationError::new(
            "polling.short_poll_window_secs",
            format!("must not exceed {}", MAX_POLL_WINDOW_SECS),
        ));
    }
    if polling.overall_timeout_secs > MAX_POLL_WINDOW_SECS {
        errors.push(ValidationError::new(
            "polling.overall_timeout_secs",
            format!("must not exceed {}", MAX_POLL_WINDOW_SECS),
        ));
    }
    if polling.fast_interval_ms == 0 {
        errors.push(ValidationError::new("polling.fast_interval_ms", "must be greater than 0"));
    }
    if polling.slow_interval_ms == 0 {
        errors.push(ValidationError::new("polling.slow_interval_ms", "must be greater than 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("'{}': {}", value, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&DeskConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_short_window_is_allowed() {
        let mut config = DeskConfig::default();
        config.polling.short_poll_window_secs = 0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = DeskConfig::default();
        config.network.lcd_url = "lcd.terra.dev".to_string();
        config.network.chain_id = " ".to_string();
        config.fee.gas_limit = 0;
        config.polling.short_poll_window_secs = 120;
        config.polling.overall_timeout_secs = 60;
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "localhost".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "network.lcd_url",
                "network.chain_id",
                "fee.gas_limit",
                "polling.overall_timeout_secs",
                "observability.metrics_address",
            ]
        );
    }

    #[test]
    fn test_rejects_oversized_poll_windows() {
        let mut config = DeskConfig::default();
        config.polling.overall_timeout_secs = i64::MAX as u64;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            format!("polling.overall_timeout_secs: must not exceed {}", MAX_POLL_WINDOW_SECS)
        );

        config.polling.short_poll_window_secs = MAX_POLL_WINDOW_SECS + 1;
        let fields: Vec<_> = validate_config(&config)
            .unwrap_err()
            .iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["polling.short_poll_window_secs", "polling.overall_timeout_secs"]);

        config.polling.short_poll_window_secs = 60;
        config.polling.overall_timeout_secs = MAX_POLL_WINDOW_SECS;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = DeskConfig::default();
        config.wallet.signer_url = "ftp://bridge".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].to_string(), "wallet.signer_url: unsupported scheme 'ftp'");
    }
}
