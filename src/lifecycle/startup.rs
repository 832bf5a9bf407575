//! Startup wiring.
//!
//! Builds the ledger clients and the contract facade from a validated
//! configuration, in dependency order. Any error here is fatal.

use thiserror::Error;

use crate::config::DeskConfig;
use crate::confirmation::ConfirmationPoller;
use crate::contract::OptionContract;
use crate::ledger::{Fee, LcdClient, LedgerError, RemoteSigner};
use crate::resilience::backoff::PollSchedule;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("{0} is not configured")]
    Missing(&'static str),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Poller for hashes submitted elsewhere (e.g. a tx that timed out earlier).
pub fn build_poller(config: &DeskConfig) -> Result<ConfirmationPoller<LcdClient>, StartupError> {
    let lcd = LcdClient::new(config.network.clone())?;
    Ok(ConfirmationPoller::new(lcd, PollSchedule::from(&config.polling)))
}

/// Contract facade for read-only use; no signer is required.
pub fn build_reader(config: &DeskConfig) -> Result<OptionContract<RemoteSigner, LcdClient>, StartupError> {
    build(config, false)
}

/// Contract facade able to submit transactions.
pub fn build_contract(config: &DeskConfig) -> Result<OptionContract<RemoteSigner, LcdClient>, StartupError> {
    build(config, true)
}

fn build(
    config: &DeskConfig,
    needs_wallet: bool,
) -> Result<OptionContract<RemoteSigner, LcdClient>, StartupError> {
    if config.contract.address.trim().is_empty() {
        return Err(StartupError::Missing("contract.address"));
    }
    if needs_wallet && config.wallet.address.trim().is_empty() {
        return Err(StartupError::Missing("wallet.address"));
    }

    let lcd = LcdClient::new(config.network.clone())?;
    let signer = RemoteSigner::from_env(
        &config.wallet.signer_url,
        config.network.chain_id.clone(),
        config.network.request_timeout_secs,
    )?;

    tracing::debug!(
        contract = %config.contract.address,
        sender = %config.wallet.address,
        chain_id = %config.network.chain_id,
        "Contract client ready"
    );

    Ok(OptionContract::new(
        config.contract.address.clone(),
        config.wallet.address.clone(),
        Fee::from(&config.fee),
        signer,
        lcd,
        PollSchedule::from(&config.polling),
    ))
}
