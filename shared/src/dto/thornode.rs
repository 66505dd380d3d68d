use serde::{Deserialize, Serialize};

use crate::utils::{amount_str, opt_amount_str};

/// Per-chain vault and fee metadata from `GET /thorchain/inbound_addresses`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InboundAddress {
    pub chain: String,
    #[serde(default)]
    pub pub_key: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub router: Option<String>,
    #[serde(default)]
    pub halted: bool,
    #[serde(default)]
    pub global_trading_paused: bool,
    #[serde(default)]
    pub chain_trading_paused: bool,
    #[serde(default)]
    pub chain_lp_actions_paused: bool,
    #[serde(with = "amount_str", default)]
    pub gas_rate: u128,
    #[serde(default)]
    pub gas_rate_units: String,
    #[serde(with = "amount_str", default)]
    pub outbound_tx_size: u128,
    /// Outbound fee in the chain's gas asset, 1e8 base units
    #[serde(with = "amount_str", default)]
    pub outbound_fee: u128,
    #[serde(with = "amount_str", default)]
    pub dust_threshold: u128,
}

impl InboundAddress {
    /// Whether liquidity can currently be added to or withdrawn from this chain.
    pub fn accepts_lp_actions(&self) -> bool {
        !self.halted && !self.chain_lp_actions_paused
    }
}

/// Subset of `GET /thorchain/network`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkInfo {
    /// RUNE-denominated outbound fee for native RUNE, 1e8 base units
    #[serde(with = "amount_str")]
    pub native_outbound_fee_rune: u128,
    #[serde(with = "amount_str", default)]
    pub native_tx_fee_rune: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct InboundObserved {
    #[serde(default)]
    pub started: Option<bool>,
    #[serde(with = "opt_amount_str", default)]
    pub pre_confirmation_count: Option<u128>,
    #[serde(with = "opt_amount_str", default)]
    pub final_count: Option<u128>,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct InboundConfirmationCounted {
    #[serde(with = "opt_amount_str", default)]
    pub counting_start_height: Option<u128>,
    #[serde(default)]
    pub chain: Option<String>,
    #[serde(with = "opt_amount_str", default)]
    pub external_observed_height: Option<u128>,
    #[serde(with = "opt_amount_str", default)]
    pub external_confirmation_delay_height: Option<u128>,
    #[serde(with = "opt_amount_str", default)]
    pub remaining_confirmation_seconds: Option<u128>,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StageCompleted {
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StreamingProgress {
    #[serde(with = "amount_str", default)]
    pub interval: u128,
    #[serde(with = "amount_str", default)]
    pub quantity: u128,
    #[serde(with = "amount_str", default)]
    pub count: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SwapStatus {
    pub pending: bool,
    #[serde(default)]
    pub streaming: Option<StreamingProgress>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OutboundDelay {
    #[serde(with = "opt_amount_str", default)]
    pub remaining_delay_blocks: Option<u128>,
    #[serde(with = "opt_amount_str", default)]
    pub remaining_delay_seconds: Option<u128>,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OutboundSigned {
    #[serde(with = "opt_amount_str", default)]
    pub scheduled_outbound_height: Option<u128>,
    #[serde(with = "opt_amount_str", default)]
    pub blocks_since_scheduled: Option<u128>,
    pub completed: bool,
}

/// The seven lifecycle phases of a cross-chain transaction. Stages that have
/// not been reached (or do not apply, e.g. no outbound on a deposit) are absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TxStages {
    pub inbound_observed: InboundObserved,
    #[serde(default)]
    pub inbound_confirmation_counted: Option<InboundConfirmationCounted>,
    #[serde(default)]
    pub inbound_finalised: Option<StageCompleted>,
    #[serde(default)]
    pub swap_status: Option<SwapStatus>,
    #[serde(default)]
    pub swap_finalised: Option<StageCompleted>,
    #[serde(default)]
    pub outbound_delay: Option<OutboundDelay>,
    #[serde(default)]
    pub outbound_signed: Option<OutboundSigned>,
}

impl TxStages {
    /// True once the inbound is finalised and every later stage that is
    /// present has completed.
    pub fn is_complete(&self) -> bool {
        let inbound_final = self
            .inbound_finalised
            .as_ref()
            .map(|s| s.completed)
            .unwrap_or(false);

        inbound_final
            && self.swap_status.as_ref().map_or(true, |s| !s.pending)
            && self.swap_finalised.as_ref().map_or(true, |s| s.completed)
            && self.outbound_delay.as_ref().map_or(true, |s| s.completed)
            && self.outbound_signed.as_ref().map_or(true, |s| s.completed)
    }

    /// Names of the stages that have been reported complete, in lifecycle order.
    pub fn completed_stages(&self) -> Vec<&'static str> {
        let mut done = Vec::new();
        if self.inbound_observed.completed {
            done.push("inbound_observed");
        }
        if self.inbound_confirmation_counted.as_ref().is_some_and(|s| s.completed) {
            done.push("inbound_confirmation_counted");
        }
        if self.inbound_finalised.as_ref().is_some_and(|s| s.completed) {
            done.push("inbound_finalised");
        }
        if self.swap_status.as_ref().is_some_and(|s| !s.pending) {
            done.push("swap_status");
        }
        if self.swap_finalised.as_ref().is_some_and(|s| s.completed) {
            done.push("swap_finalised");
        }
        if self.outbound_delay.as_ref().is_some_and(|s| s.completed) {
            done.push("outbound_delay");
        }
        if self.outbound_signed.as_ref().is_some_and(|s| s.completed) {
            done.push("outbound_signed");
        }
        done
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ObservedTx {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub chain: String,
    #[serde(default)]
    pub from_address: String,
    #[serde(default)]
    pub to_address: String,
    #[serde(default)]
    pub memo: String,
}

/// Response of `GET /thorchain/tx/status/{hash}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TxStatusResponse {
    #[serde(default)]
    pub tx: Option<ObservedTx>,
    pub stages: TxStages,
}
