use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::{amount_str, decimal_str};

/// Pool as reported by `GET /v2/pools` and `GET /v2/pool/{asset}`.
///
/// Immutable once fetched; a refresh replaces the whole list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PoolDetail {
    /// Asset identifier, e.g. `BTC.BTC` or `ETH.USDC-0XA0B8...`
    pub asset: String,
    /// Asset-side depth in 1e8 base units
    #[serde(with = "amount_str")]
    pub asset_depth: u128,
    /// RUNE-side depth in 1e8 base units
    #[serde(with = "amount_str")]
    pub rune_depth: u128,
    /// Price of one asset unit in RUNE
    #[serde(with = "decimal_str", default)]
    pub asset_price: f64,
    #[serde(rename = "assetPriceUSD", with = "decimal_str", default)]
    pub asset_price_usd: f64,
    #[serde(with = "decimal_str", default)]
    pub annual_percentage_rate: f64,
    #[serde(rename = "poolAPY", with = "decimal_str", default)]
    pub pool_apy: f64,
    /// `available`, `staged` or `suspended`
    pub status: String,
    #[serde(with = "amount_str", default)]
    pub liquidity_units: u128,
    #[serde(with = "amount_str", default)]
    pub volume24h: u128,
}

impl PoolDetail {
    pub fn is_available(&self) -> bool {
        self.status.eq_ignore_ascii_case("available")
    }
}

/// One pool membership of an address, from `GET /v2/member/{address}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemberPool {
    pub pool: String,
    #[serde(default)]
    pub rune_address: String,
    #[serde(default)]
    pub asset_address: String,
    #[serde(with = "amount_str")]
    pub liquidity_units: u128,
    #[serde(with = "amount_str", default)]
    pub rune_added: u128,
    #[serde(with = "amount_str", default)]
    pub asset_added: u128,
    #[serde(with = "amount_str", default)]
    pub rune_withdrawn: u128,
    #[serde(with = "amount_str", default)]
    pub asset_withdrawn: u128,
    #[serde(with = "amount_str", default)]
    pub rune_pending: u128,
    #[serde(with = "amount_str", default)]
    pub asset_pending: u128,
    /// Unix seconds
    #[serde(with = "amount_str", default)]
    pub date_first_added: u128,
    /// Unix seconds
    #[serde(with = "amount_str", default)]
    pub date_last_added: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MemberDetails {
    #[serde(default)]
    pub pools: Vec<MemberPool>,
}

/// Aggregate statistics from `GET /v2/stats`. Only the fields the dashboard reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    #[serde(rename = "runePriceUSD", with = "decimal_str")]
    pub rune_price_usd: f64,
    #[serde(with = "amount_str", default)]
    pub rune_depth: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coin {
    pub asset: String,
    #[serde(with = "amount_str")]
    pub amount: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActionTransaction {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub coins: Vec<Coin>,
    #[serde(rename = "txID", default)]
    pub tx_id: String,
}

/// A protocol action (deposit, withdraw, swap, ...) from `GET /v2/actions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Action {
    /// Unix nanoseconds
    #[serde(with = "amount_str")]
    pub date: u128,
    #[serde(with = "amount_str", default)]
    pub height: u128,
    #[serde(rename = "in", default)]
    pub inbound: Vec<ActionTransaction>,
    #[serde(rename = "out", default)]
    pub outbound: Vec<ActionTransaction>,
    #[serde(default)]
    pub pools: Vec<String>,
    /// `success`, `pending` or `refund`
    pub status: String,
    #[serde(rename = "type")]
    pub action_type: String,
}

impl Action {
    pub fn is_pending(&self) -> bool {
        self.status == "pending"
    }

    /// Action timestamp; `None` when the nanosecond value overflows `i64`.
    pub fn date_utc(&self) -> Option<DateTime<Utc>> {
        let nanos = i64::try_from(self.date).ok()?;
        Some(DateTime::from_timestamp_nanos(nanos))
    }

    /// First inbound transaction id, which is how the node's status endpoint keys it.
    pub fn inbound_tx_id(&self) -> Option<&str> {
        self.inbound
            .iter()
            .map(|tx| tx.tx_id.as_str())
            .find(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ActionsResponse {
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(with = "amount_str", default)]
    pub count: u128,
}
