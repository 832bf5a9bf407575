//! Option contract integration.
//!
//! # Data Flow
//! ```text
//! CLI action
//!     → client.rs (ExecuteMsg + funds → TxRequest)
//!     → confirmation::TxExecutor (submit, wait)
//!     → Confirmation
//!
//! status
//!     → client.rs (QueryMsg::GetOptionContract → OptionState)
//! ```

pub mod client;
pub mod msg;

pub use client::{ContractError, ContractResult, OptionContract};
pub use msg::{ExecuteMsg, OptionState, OptionStatus, QueryMsg, UnderwriteOptionRequest};
