//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! ledger, confirmation, contract produce:
//!     → logging.rs (structured tracing events to stderr)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → terminal / log aggregation
//!     → metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Logs go to stderr so command output on stdout stays machine-readable
//! - Transaction hash is a field on every poll event

pub mod logging;
pub mod metrics;
