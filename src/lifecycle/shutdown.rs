//! Cancellation of an in-flight command.
//!
//! The CLI runs each command through [`Shutdown::run_until_triggered`]. An
//! interrupt drops the command's future at its next suspension point, which
//! for a confirmation wait is the poll delay or the pending LCD request.

use std::future::Future;
use tokio::sync::broadcast;

/// Cancellation switch shared by the signal handler and the running command.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Cancel whatever is running under this switch. Idempotent.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Drive `fut` until it finishes or shutdown is triggered.
    ///
    /// On shutdown the future is dropped, not interrupted: whatever it
    /// already sent to the network stays sent. Returns `None` in that case.
    pub async fn run_until_triggered<F: Future>(&self, fut: F) -> Option<F::Output> {
        let mut rx = self.tx.subscribe();
        tokio::select! {
            output = fut => Some(output),
            _ = rx.recv() => None,
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
