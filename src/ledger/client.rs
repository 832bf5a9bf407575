//! LCD (REST gateway) client with timeout and failover handling.
//!
//! # Responsibilities
//! - Connect to the primary LCD endpoint and any failovers
//! - Query transactions by hash and contract state
//! - Handle timeouts and network errors gracefully
//! - Provide health check for ledger connectivity

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

use crate::ledger::ports::{ContractQuery, TxQuery};
use crate::ledger::types::{Confirmation, LedgerError, LedgerResult, NetworkConfig, TxHash};
use crate::observability::metrics;

#[derive(Deserialize)]
struct GetTxResponse {
    tx_response: Confirmation,
}

#[derive(Deserialize)]
struct SmartQueryResponse {
    data: serde_json::Value,
}

#[derive(Deserialize)]
struct NodeInfoResponse {
    default_node_info: DefaultNodeInfo,
}

#[derive(Deserialize)]
struct DefaultNodeInfo {
    network: String,
}

/// LCD client wrapper with failover support.
#[derive(Clone)]
pub struct LcdClient {
    /// Endpoints in priority order (primary + failovers).
    endpoints: Vec<Url>,
    http: reqwest::Client,
    config: NetworkConfig,
    timeout_duration: Duration,
}

impl LcdClient {
    /// Create a new LCD client.
    ///
    /// Fails only if the primary URL is invalid; connectivity is not checked
    /// here (see [`LcdClient::verify_chain_id`]).
    pub fn new(config: NetworkConfig) -> LedgerResult<Self> {
        let timeout_duration = Duration::from_secs(config.request_timeout_secs);
        let mut endpoints = Vec::new();

        let primary: Url = config.lcd_url.parse().map_err(|e| {
            LedgerError::Rpc(format!("Invalid LCD URL '{}': {}", config.lcd_url, e))
        })?;
        endpoints.push(primary);

        for url_str in &config.failover_urls {
            match url_str.parse() {
                Ok(url) => endpoints.push(url),
                Err(_) => tracing::warn!(url = %url_str, "Ignoring invalid failover LCD URL"),
            }
        }

        tracing::debug!(
            lcd_url = %config.lcd_url,
            chain_id = %config.chain_id,
            endpoints = endpoints.len(),
            "LCD client initialized"
        );

        Ok(Self {
            endpoints,
            http: reqwest::Client::new(),
            config,
            timeout_duration,
        })
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> LedgerResult<()> {
        let info: NodeInfoResponse = self
            .get_json(&["cosmos", "base", "tendermint", "v1beta1", "node_info"])
            .await?;
        let actual = info.default_node_info.network;
        if actual != self.config.chain_id {
            return Err(LedgerError::ChainMismatch {
                expected: self.config.chain_id.clone(),
                actual,
            });
        }
        Ok(())
    }

    /// Check the ledger is reachable and on the expected chain, recording
    /// the result as a health metric.
    pub async fn check_health(&self) -> LedgerResult<()> {
        let result = self.verify_chain_id().await;
        metrics::record_lcd_health(&self.config.lcd_url, result.is_ok());
        result
    }

    /// Get the configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// GET a JSON document, falling through to the next endpoint on
    /// transport errors. An HTTP error status from a reachable endpoint is
    /// returned as-is.
    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> LedgerResult<T> {
        for (i, base) in self.endpoints.iter().enumerate() {
            let url = endpoint_url(base, segments)?;
            match timeout(self.timeout_duration, self.http.get(url).send()).await {
                Ok(Ok(response)) => return decode(response).await,
                Ok(Err(e)) => {
                    tracing::warn!(endpoint_idx = i, error = %e, "LCD error, trying next endpoint");
                }
                Err(_) => {
                    tracing::warn!(endpoint_idx = i, "LCD timeout, trying next endpoint");
                }
            }
        }
        Err(LedgerError::Rpc("All LCD endpoints failed".to_string()))
    }
}

#[async_trait]
impl TxQuery for LcdClient {
    async fn tx_info(&self, hash: &TxHash) -> LedgerResult<Confirmation> {
        let response: GetTxResponse = self
            .get_json(&["cosmos", "tx", "v1beta1", "txs", hash.as_str()])
            .await?;
        Ok(response.tx_response)
    }
}

#[async_trait]
impl ContractQuery for LcdClient {
    async fn query_contract(
        &self,
        contract: &str,
        query: &serde_json::Value,
    ) -> LedgerResult<serde_json::Value> {
        let encoded = encode_query(query)?;
        let response: SmartQueryResponse = self
            .get_json(&["cosmwasm", "wasm", "v1", "contract", contract, "smart", encoded.as_str()])
            .await?;
        Ok(response.data)
    }
}

impl std::fmt::Debug for LcdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LcdClient")
            .field("lcd_url", &self.config.lcd_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.request_timeout_secs)
            .finish()
    }
}

/// Append path segments to `base`, percent-encoding each one.
fn endpoint_url(base: &Url, segments: &[&str]) -> LedgerResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| LedgerError::Rpc(format!("LCD URL '{}' cannot be a base", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn encode_query(query: &serde_json::Value) -> LedgerResult<String> {
    let raw = serde_json::to_vec(query).map_err(|e| LedgerError::Decode(e.to_string()))?;
    Ok(BASE64.encode(raw))
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> LedgerResult<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| LedgerError::Decode(e.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    // Cosmos SDK answers unknown hashes with 404 on newer nodes and a
    // "not found" 400 on older ones.
    if status == StatusCode::NOT_FOUND
        || (status == StatusCode::BAD_REQUEST && body.contains("not found"))
    {
        return Err(LedgerError::NotFound(body));
    }
    Err(LedgerError::Rpc(format!("LCD returned {}: {}", status, body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> NetworkConfig {
        NetworkConfig {
            // Nothing listens on port 1.
            lcd_url: "http://127.0.0.1:1".to_string(),
            failover_urls: Vec::new(),
            chain_id: "localterra".to_string(),
            request_timeout_secs: 2,
        }
    }

    #[test]
    fn test_client_creation() {
        assert!(LcdClient::new(test_config()).is_ok());

        let mut config = test_config();
        config.lcd_url = "not a url".to_string();
        assert!(LcdClient::new(config).is_err());
    }

    #[test]
    fn test_invalid_failover_is_skipped() {
        let mut config = test_config();
        config.failover_urls.push("::nope::".to_string());
        config.failover_urls.push("http://127.0.0.1:2".to_string());
        let client = LcdClient::new(config).unwrap();
        assert_eq!(client.endpoints.len(), 2);
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let base: Url = "https://example.com/lcd/".parse().unwrap();
        let url = endpoint_url(&base, &["cosmos", "tx", "v1beta1", "txs", "ABC"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/lcd/cosmos/tx/v1beta1/txs/ABC");

        let bare: Url = "http://127.0.0.1:1317".parse().unwrap();
        let url = endpoint_url(&bare, &["a", "b"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:1317/a/b");
    }

    #[test]
    fn test_smart_query_is_escaped() {
        let base: Url = "http://127.0.0.1:1317".parse().unwrap();
        let encoded = encode_query(&serde_json::json!({ "get_option_contract": {} })).unwrap();
        assert_eq!(encoded, "eyJnZXRfb3B0aW9uX2NvbnRyYWN0Ijp7fX0=");

        // A '/' in base64 output must not split the path.
        let url = endpoint_url(&base, &["smart", "ab/c="]).unwrap();
        assert_eq!(url.path(), "/smart/ab%2Fc=");
    }

    #[tokio::test]
    async fn test_lcd_failover() {
        let mut config = test_config();
        config.failover_urls.push("http://127.0.0.1:2".to_string());
        let client = LcdClient::new(config).unwrap();

        let hash = TxHash::new("ABC123").unwrap();
        let result = client.tx_info(&hash).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("All LCD endpoints failed"));
    }
}
