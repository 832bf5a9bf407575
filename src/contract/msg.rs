//! Option contract messages and state.

use serde::{Deserialize, Serialize};

use crate::ledger::Coin;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    TransferOption { recipient: String },
    FundCollateral {},
    FundPremium {},
    UnderwriteOption { underwrite_option_req: UnderwriteOptionRequest },
    ExecuteOption {},
    WithdrawExpiredOption {},
    WithdrawUnlockedOption {},
}

impl ExecuteMsg {
    /// Wire name of the action, for logs.
    pub fn action(&self) -> &'static str {
        match self {
            ExecuteMsg::TransferOption { .. } => "transfer_option",
            ExecuteMsg::FundCollateral {} => "fund_collateral",
            ExecuteMsg::FundPremium {} => "fund_premium",
            ExecuteMsg::UnderwriteOption { .. } => "underwrite_option",
            ExecuteMsg::ExecuteOption {} => "execute_option",
            ExecuteMsg::WithdrawExpiredOption {} => "withdraw_expired_option",
            ExecuteMsg::WithdrawUnlockedOption {} => "withdraw_unlocked_option",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    GetOptionContract {},
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ConfigResponse {
    pub state: OptionState,
}

/// Terms an underwriter agrees to; must match the contract's exactly.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UnderwriteOptionRequest {
    pub asset: Vec<Coin>,
    pub collateral: Vec<Coin>,
    pub premium: Vec<Coin>,
    pub expires: u64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionStatus {
    Created,
    Funded,
    Locked,
    Executed,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OptionState {
    pub option_status: OptionStatus,
    pub creator: String,
    pub holder: String,
    pub underwriter: Option<String>,
    pub asset: Vec<Coin>,
    pub collateral: Vec<Coin>,
    pub premium: Vec<Coin>,
    /// Block height after which the option expires.
    pub expires: u64,
}

impl OptionState {
    /// The request an underwriter must send to accept these terms.
    pub fn underwrite_request(&self) -> UnderwriteOptionRequest {
        UnderwriteOptionRequest {
            asset: self.asset.clone(),
            collateral: self.collateral.clone(),
            premium: self.premium.clone(),
            expires: self.expires,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_each_action_has_its_own_payload() {
        let cases = [
            (ExecuteMsg::FundCollateral {}, json!({ "fund_collateral": {} })),
            (ExecuteMsg::FundPremium {}, json!({ "fund_premium": {} })),
            (ExecuteMsg::ExecuteOption {}, json!({ "execute_option": {} })),
            (ExecuteMsg::WithdrawExpiredOption {}, json!({ "withdraw_expired_option": {} })),
            (ExecuteMsg::WithdrawUnlockedOption {}, json!({ "withdraw_unlocked_option": {} })),
            (
                ExecuteMsg::TransferOption { recipient: "terra1bob".into() },
                json!({ "transfer_option": { "recipient": "terra1bob" } }),
            ),
        ];
        for (msg, expected) in cases {
            let value = serde_json::to_value(&msg).unwrap();
            assert_eq!(value, expected);
            assert!(value.get(msg.action()).is_some());
        }
    }

    #[test]
    fn test_underwrite_payload() {
        let msg = ExecuteMsg::UnderwriteOption {
            underwrite_option_req: UnderwriteOptionRequest {
                asset: vec![Coin::new(100, "uluna")],
                collateral: vec![Coin::new(50, "uusd")],
                premium: vec![Coin::new(5, "uusd")],
                expires: 9_000_000,
            },
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["underwrite_option"]["underwrite_option_req"]["expires"], 9_000_000);
        assert_eq!(value["underwrite_option"]["underwrite_option_req"]["asset"][0]["amount"], "100");
    }

    #[test]
    fn test_query_payload() {
        let value = serde_json::to_value(QueryMsg::GetOptionContract {}).unwrap();
        assert_eq!(value, json!({ "get_option_contract": {} }));
    }

    #[test]
    fn test_state_from_contract() {
        let response: ConfigResponse = serde_json::from_value(json!({
            "state": {
                "option_status": "FUNDED",
                "creator": "terra1alice",
                "holder": "terra1alice",
                "underwriter": null,
                "asset": [{ "denom": "uluna", "amount": "100" }],
                "collateral": [{ "denom": "uusd", "amount": "50" }],
                "premium": [{ "denom": "uusd", "amount": "5" }],
                "expires": 9000000
            }
        }))
        .unwrap();
        let state = response.state;
        assert_eq!(state.option_status, OptionStatus::Funded);
        assert!(state.underwriter.is_none());
        assert_eq!(state.underwrite_request().premium, vec![Coin::new(5, "uusd")]);
    }
}
