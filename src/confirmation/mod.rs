//! Transaction confirmation subsystem.
//!
//! # Data Flow
//! ```text
//! TxRequest
//!     → executor.rs (submit once via TxSubmitter, get TxHash)
//!     → poller.rs   (query TxQuery on the two-phase schedule)
//!     → Confirmation | PollError::Timeout
//! ```
//!
//! # Design Decisions
//! - Two terminal outcomes only; intermediate query errors are absorbed
//! - No shared state between pollers, any number may run at once
//! - Cancellation is left to the caller (drop the future)

pub mod executor;
pub mod poller;

pub use executor::{ExecuteError, TxExecutor};
pub use poller::{ConfirmationPoller, PollError};
