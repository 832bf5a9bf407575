//! Ledger integration subsystem.
//!
//! # Data Flow
//! ```text
//! TxRequest (sender, fee, contract messages)
//!     → signer.rs (wallet bridge signs + broadcasts, returns TxHash)
//!     → client.rs (LCD queries: tx by hash, contract smart query)
//! ```
//!
//! # Security Constraints
//! - Signer credentials ONLY from environment variables
//! - Never log credentials
//! - All LCD and signer calls have configurable timeouts

pub mod client;
pub mod ports;
pub mod signer;
pub mod types;

pub use client::LcdClient;
pub use ports::{ContractQuery, TxQuery, TxSubmitter};
pub use signer::RemoteSigner;
pub use types::{
    Coin, Confirmation, ExecuteContractMsg, Fee, LedgerError, LedgerResult, TxHash, TxRequest,
};
