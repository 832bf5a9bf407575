//! Transaction confirmation poller.
//!
//! # States
//! - FastPoll: before the interval boundary, retry every `fast_interval`
//! - SlowPoll: before the final boundary, retry every `slow_interval`
//! - Confirmed: the ledger returned a confirmation (terminal)
//! - TimedOut: final boundary passed without one (terminal)
//!
//! # State Transitions
//! ```text
//! FastPoll → Confirmed: fetch succeeds
//! FastPoll → SlowPoll:  interval boundary passed
//! SlowPoll → Confirmed: fetch succeeds
//! SlowPoll → TimedOut:  final boundary passed
//! ```
//!
//! Fetch errors of any kind count as "not confirmed yet"; only the final
//! boundary ends the loop without a confirmation.

use thiserror::Error;
use tokio::time::{sleep, Instant};

use crate::ledger::{Confirmation, TxHash, TxQuery};
use crate::observability::metrics;
use crate::resilience::backoff::{PollPhase, PollSchedule};

/// Terminal failure of a poll.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    /// No confirmation before the final boundary. The transaction may still
    /// land; the hash is all the caller needs to check on it.
    #[error("Transaction queued. To verify the status, please check the transaction hash: {tx_hash}")]
    Timeout { tx_hash: TxHash },
}

/// Waits for a transaction's confirmation on the ledger.
#[derive(Debug, Clone)]
pub struct ConfirmationPoller<Q> {
    query: Q,
    schedule: PollSchedule,
}

impl<Q: TxQuery> ConfirmationPoller<Q> {
    pub fn new(query: Q, schedule: PollSchedule) -> Self {
        Self { query, schedule }
    }

    pub fn schedule(&self) -> &PollSchedule {
        &self.schedule
    }

    /// Poll until `tx_hash` is confirmed or the overall timeout passes.
    ///
    /// Boundaries are fixed when this is called. The returned confirmation
    /// is exactly what the ledger reported, including failed execution.
    pub async fn wait(&self, tx_hash: &TxHash) -> Result<Confirmation, PollError> {
        let started = Instant::now();
        let deadlines = self.schedule.start(started);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match self.query.tx_info(tx_hash).await {
                Ok(confirmation) => {
                    let waited = started.elapsed();
                    tracing::info!(
                        tx_hash = %tx_hash,
                        attempt,
                        height = confirmation.height,
                        code = confirmation.code,
                        waited_ms = waited.as_millis() as u64,
                        "Transaction confirmed"
                    );
                    metrics::record_confirmation("confirmed", waited);
                    return Ok(confirmation);
                }
                Err(e) => {
                    tracing::debug!(tx_hash = %tx_hash, attempt, error = %e, "Transaction not confirmed yet");
                }
            }

            let phase = deadlines.phase_at(Instant::now());
            metrics::record_poll_attempt(phase);
            match self.schedule.delay(phase) {
                Some(delay) => {
                    tracing::trace!(tx_hash = %tx_hash, phase = phase.as_str(), delay_ms = delay.as_millis() as u64, "Waiting");
                    sleep(delay).await;
                }
                None => {
                    tracing::warn!(tx_hash = %tx_hash, attempt, "Gave up waiting for confirmation");
                    metrics::record_confirmation("timed_out", started.elapsed());
                    return Err(PollError::Timeout {
                        tx_hash: tx_hash.clone(),
                    });
                }
            }
        }
    }
}
