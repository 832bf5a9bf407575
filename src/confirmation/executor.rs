//! Submit-then-confirm execution of a transaction.

use thiserror::Error;

use crate::confirmation::poller::{ConfirmationPoller, PollError};
use crate::ledger::{Confirmation, LedgerError, TxQuery, TxRequest, TxSubmitter};
use crate::resilience::backoff::PollSchedule;

/// Why a transaction did not yield a confirmation.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// The signer or ledger refused the transaction outright.
    #[error(transparent)]
    Submission(LedgerError),

    /// The transaction was accepted but never showed up in time.
    #[error(transparent)]
    Poll(#[from] PollError),
}

/// Submits a transaction once and waits for its confirmation.
///
/// Both capabilities are passed in explicitly; nothing is read from ambient
/// state.
#[derive(Debug, Clone)]
pub struct TxExecutor<S, Q> {
    submitter: S,
    poller: ConfirmationPoller<Q>,
}

impl<S: TxSubmitter, Q: TxQuery> TxExecutor<S, Q> {
    pub fn new(submitter: S, query: Q, schedule: PollSchedule) -> Self {
        Self {
            submitter,
            poller: ConfirmationPoller::new(query, schedule),
        }
    }

    pub fn poller(&self) -> &ConfirmationPoller<Q> {
        &self.poller
    }

    /// Post `request` and wait for it to be confirmed.
    pub async fn execute(&self, request: &TxRequest) -> Result<Confirmation, ExecuteError> {
        let tx_hash = self
            .submitter
            .post(request)
            .await
            .map_err(ExecuteError::Submission)?;

        tracing::info!(tx_hash = %tx_hash, "Waiting for confirmation");
        Ok(self.poller.wait(&tx_hash).await?)
    }
}
