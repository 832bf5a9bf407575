//! Option Desk Library
//!
//! Submits calls to a CosmWasm option contract and waits for their
//! confirmation on the ledger.

pub mod config;
pub mod confirmation;
pub mod contract;
pub mod ledger;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::schema::DeskConfig;
pub use confirmation::{ConfirmationPoller, PollError, TxExecutor};
pub use contract::OptionContract;
pub use lifecycle::Shutdown;
