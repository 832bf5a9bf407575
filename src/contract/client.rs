//! Typed facade over the option contract.

use thiserror::Error;

use crate::confirmation::{ExecuteError, TxExecutor};
use crate::contract::msg::{ConfigResponse, ExecuteMsg, OptionState, QueryMsg};
use crate::ledger::{
    Coin, Confirmation, ContractQuery, ExecuteContractMsg, Fee, LedgerError, TxQuery, TxRequest,
    TxSubmitter,
};
use crate::resilience::backoff::PollSchedule;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("Contract query failed: {0}")]
    Query(#[from] LedgerError),

    #[error("Unexpected contract response: {0}")]
    Response(#[from] serde_json::Error),
}

pub type ContractResult<T> = Result<T, ContractError>;

/// One option contract, one signing account.
#[derive(Debug, Clone)]
pub struct OptionContract<S, Q> {
    address: String,
    sender: String,
    fee: Fee,
    ledger: Q,
    executor: TxExecutor<S, Q>,
}

impl<S, Q> OptionContract<S, Q>
where
    S: TxSubmitter,
    Q: TxQuery + ContractQuery + Clone,
{
    pub fn new(
        address: impl Into<String>,
        sender: impl Into<String>,
        fee: Fee,
        signer: S,
        ledger: Q,
        schedule: PollSchedule,
    ) -> Self {
        Self {
            address: address.into(),
            sender: sender.into(),
            fee,
            executor: TxExecutor::new(signer, ledger.clone(), schedule),
            ledger,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn executor(&self) -> &TxExecutor<S, Q> {
        &self.executor
    }

    /// Current contract state.
    pub async fn state(&self) -> ContractResult<OptionState> {
        let query = serde_json::to_value(QueryMsg::GetOptionContract {})?;
        let data = self.ledger.query_contract(&self.address, &query).await?;
        let response: ConfigResponse = serde_json::from_value(data)?;
        Ok(response.state)
    }

    pub async fn fund_collateral(&self, funds: Vec<Coin>) -> ContractResult<Confirmation> {
        self.exec(ExecuteMsg::FundCollateral {}, funds).await
    }

    pub async fn fund_premium(&self, funds: Vec<Coin>) -> ContractResult<Confirmation> {
        self.exec(ExecuteMsg::FundPremium {}, funds).await
    }

    /// Accept the option's current terms, attaching `funds` as the asset.
    pub async fn underwrite(&self, funds: Vec<Coin>) -> ContractResult<Confirmation> {
        let state = self.state().await?;
        let msg = ExecuteMsg::UnderwriteOption {
            underwrite_option_req: state.underwrite_request(),
        };
        self.exec(msg, funds).await
    }

    pub async fn execute_option(&self, funds: Vec<Coin>) -> ContractResult<Confirmation> {
        self.exec(ExecuteMsg::ExecuteOption {}, funds).await
    }

    pub async fn withdraw_expired(&self) -> ContractResult<Confirmation> {
        self.exec(ExecuteMsg::WithdrawExpiredOption {}, Vec::new()).await
    }

    pub async fn withdraw_unlocked(&self) -> ContractResult<Confirmation> {
        self.exec(ExecuteMsg::WithdrawUnlockedOption {}, Vec::new()).await
    }

    pub async fn transfer(&self, recipient: impl Into<String>) -> ContractResult<Confirmation> {
        let msg = ExecuteMsg::TransferOption {
            recipient: recipient.into(),
        };
        self.exec(msg, Vec::new()).await
    }

    /// Build the single-message transaction for `msg`.
    pub fn request(&self, msg: &ExecuteMsg, funds: Vec<Coin>) -> ContractResult<TxRequest> {
        Ok(TxRequest {
            sender: self.sender.clone(),
            fee: self.fee.clone(),
            msgs: vec![ExecuteContractMsg {
                sender: self.sender.clone(),
                contract: self.address.clone(),
                msg: serde_json::to_value(msg)?,
                funds,
            }],
        })
    }

    async fn exec(&self, msg: ExecuteMsg, funds: Vec<Coin>) -> ContractResult<Confirmation> {
        tracing::info!(
            action = msg.action(),
            contract = %self.address,
            funds = ?funds.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "Submitting contract call"
        );
        let request = self.request(&msg, funds)?;
        Ok(self.executor.execute(&request).await?)
    }
}
