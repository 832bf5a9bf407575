//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Transaction submitted:
//!     → backoff.rs (two-phase poll schedule: fast, slow, timed out)
//!     → confirmation poller sleeps per phase between LCD queries
//! ```
//!
//! # Design Decisions
//! - Polling is bounded by time, not by attempt count
//! - Every LCD call also carries its own request timeout

pub mod backoff;

pub use backoff::{Deadlines, PollPhase, PollSchedule};
