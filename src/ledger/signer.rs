//! Remote signer (wallet bridge) client.
//!
//! # Security
//! - The bearer token is read ONLY from the environment
//! - The token is never logged or serialized
//! - Keys never leave the bridge; this side only sees transaction hashes

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

use crate::ledger::ports::TxSubmitter;
use crate::ledger::types::{LedgerError, LedgerResult, TxHash, TxRequest};

/// Environment variable holding the bridge's bearer token.
pub const SIGNER_TOKEN_ENV_VAR: &str = "OPTION_DESK_SIGNER_TOKEN";

#[derive(Serialize)]
struct PostBody<'a> {
    chain_id: &'a str,
    #[serde(flatten)]
    request: &'a TxRequest,
}

#[derive(Deserialize)]
struct PostResponse {
    result: PostResult,
}

#[derive(Deserialize)]
struct PostResult {
    txhash: TxHash,
}

/// Submits transactions through a wallet bridge that signs and broadcasts
/// on the account owner's behalf.
#[derive(Clone)]
pub struct RemoteSigner {
    post_url: Url,
    chain_id: String,
    token: Option<String>,
    http: reqwest::Client,
    timeout_duration: Duration,
}

impl RemoteSigner {
    /// Create a signer for the bridge at `signer_url`.
    pub fn new(
        signer_url: &str,
        chain_id: impl Into<String>,
        timeout_secs: u64,
        token: Option<String>,
    ) -> LedgerResult<Self> {
        let base: Url = signer_url
            .parse()
            .map_err(|e| LedgerError::Signer(format!("Invalid signer URL '{}': {}", signer_url, e)))?;
        let mut post_url = base.clone();
        post_url
            .path_segments_mut()
            .map_err(|_| LedgerError::Signer(format!("Signer URL '{}' cannot be a base", base)))?
            .pop_if_empty()
            .extend(["tx", "post"]);

        Ok(Self {
            post_url,
            chain_id: chain_id.into(),
            token,
            http: reqwest::Client::new(),
            timeout_duration: Duration::from_secs(timeout_secs),
        })
    }

    /// Create a signer, taking the bearer token from `OPTION_DESK_SIGNER_TOKEN`
    /// if it is set.
    pub fn from_env(signer_url: &str, chain_id: impl Into<String>, timeout_secs: u64) -> LedgerResult<Self> {
        let token = std::env::var(SIGNER_TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty());
        if token.is_none() {
            tracing::debug!("{} not set, posting without authorization", SIGNER_TOKEN_ENV_VAR);
        }
        Self::new(signer_url, chain_id, timeout_secs, token)
    }
}

#[async_trait]
impl TxSubmitter for RemoteSigner {
    async fn post(&self, request: &TxRequest) -> LedgerResult<TxHash> {
        let body = PostBody {
            chain_id: &self.chain_id,
            request,
        };
        let mut builder = self.http.post(self.post_url.clone()).json(&body);
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| LedgerError::Signer("Signer token is not a valid header value".to_string()))?;
            builder = builder.header(AUTHORIZATION, value);
        }

        let response = match timeout(self.timeout_duration, builder.send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(LedgerError::Signer(e.to_string())),
            Err(_) => return Err(LedgerError::Timeout(self.timeout_duration.as_secs())),
        };

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LedgerError::Submission(format!("signer returned {}: {}", status, text)));
        }

        let posted: PostResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::Decode(e.to_string()))?;

        tracing::info!(
            tx_hash = %posted.result.txhash,
            sender = %request.sender,
            msgs = request.msgs.len(),
            "Transaction broadcast"
        );
        Ok(posted.result.txhash)
    }
}

impl std::fmt::Debug for RemoteSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSigner")
            .field("post_url", &self.post_url.as_str())
            .field("chain_id", &self.chain_id)
            .field("authorized", &self.token.is_some())
            .finish()
    }
}
