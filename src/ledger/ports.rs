//! Capabilities the rest of the crate needs from the ledger.
//!
//! Implemented by [`LcdClient`](crate::ledger::LcdClient) and
//! [`RemoteSigner`](crate::ledger::RemoteSigner); tests substitute in-memory
//! fakes.

use async_trait::async_trait;

use crate::ledger::types::{Confirmation, LedgerResult, TxHash, TxRequest};

/// Submit-transaction capability.
#[async_trait]
pub trait TxSubmitter: Send + Sync {
    /// Sign and broadcast `request`. Returns as soon as the ledger has
    /// accepted the transaction, before it is included in a block.
    async fn post(&self, request: &TxRequest) -> LedgerResult<TxHash>;
}

/// Query-transaction capability.
#[async_trait]
pub trait TxQuery: Send + Sync {
    /// Fetch the confirmation for `hash`. Fails while the transaction is
    /// not yet indexed.
    async fn tx_info(&self, hash: &TxHash) -> LedgerResult<Confirmation>;
}

/// Query-contract-state capability.
#[async_trait]
pub trait ContractQuery: Send + Sync {
    /// Run a smart query against `contract` and return the raw `data` payload.
    async fn query_contract(
        &self,
        contract: &str,
        query: &serde_json::Value,
    ) -> LedgerResult<serde_json::Value>;
}
