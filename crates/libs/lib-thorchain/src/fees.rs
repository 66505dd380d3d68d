//! # Withdraw Fee Calculator
//!
//! Pure conversions between pool sides and the USD estimate of what a
//! withdrawal costs in outbound fees. Nothing here performs I/O; callers fetch
//! pools, inbound addresses and prices first (see `quote_withdraw_cost` in the
//! dashboard crate).
//!
//! All amounts are integer base units (1e8). Conversion through a pool uses the
//! constant-product price `value_in_rune = amount * rune_depth / asset_depth`.

use lib_core::{AppError, Asset, Result};
use serde::{Deserialize, Serialize};
use shared::dto::midgard::PoolDetail;
use shared::dto::thornode::InboundAddress;
use shared::utils::base_to_units;
use std::fmt;
use std::str::FromStr;

use crate::thornode::inbound_for_chain;

/// Which side(s) of the pool a withdrawal pays out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WithdrawType {
    /// Both sides, symmetrically
    #[default]
    Split,
    AllRune,
    AllAsset,
}

impl fmt::Display for WithdrawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WithdrawType::Split => "SPLIT",
            WithdrawType::AllRune => "ALL_RUNE",
            WithdrawType::AllAsset => "ALL_ASSET",
        })
    }
}

impl FromStr for WithdrawType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "SPLIT" => Ok(WithdrawType::Split),
            "ALL_RUNE" | "RUNE" => Ok(WithdrawType::AllRune),
            "ALL_ASSET" | "ASSET" => Ok(WithdrawType::AllAsset),
            _ => Err(AppError::InvalidInput(format!("Unknown withdraw type: {}", s))),
        }
    }
}

/// `amount` of the pool's asset expressed in RUNE.
pub fn get_value_of_asset_in_rune(amount: u128, pool: &PoolDetail) -> Result<u128> {
    convert(amount, pool.rune_depth, pool.asset_depth, &pool.asset)
}

/// `amount` of RUNE expressed in the pool's asset.
pub fn get_value_of_rune_in_asset(amount: u128, pool: &PoolDetail) -> Result<u128> {
    convert(amount, pool.asset_depth, pool.rune_depth, &pool.asset)
}

fn convert(amount: u128, numerator: u128, denominator: u128, pool: &str) -> Result<u128> {
    if denominator == 0 {
        return Err(AppError::InvalidInput(format!("Pool {} has zero depth", pool)));
    }
    amount
        .checked_mul(numerator)
        .map(|product| product / denominator)
        .ok_or_else(|| AppError::InvalidInput(format!("Amount overflows pool {} conversion", pool)))
}

/// Everything [`estimate_withdraw_fee_usd`] needs.
///
/// `gas_asset_pool` and `native_outbound_fee_rune_in_base` are optional so a
/// caller can pass whatever it has fetched so far; the estimate fails while
/// either is missing.
#[derive(Debug, Clone, Copy)]
pub struct WithdrawFeeInputs<'a> {
    pub pool: &'a PoolDetail,
    pub rune_price_usd: f64,
    pub withdraw_type: WithdrawType,
    /// Pool of the gas asset on the withdrawn asset's chain
    pub gas_asset_pool: Option<&'a PoolDetail>,
    /// RUNE outbound fee in 1e8 base units
    pub native_outbound_fee_rune_in_base: Option<u128>,
    pub inbound_addresses: &'a [InboundAddress],
}

/// USD cost of each side of a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WithdrawFeeBreakdown {
    /// Outbound fee on the asset's chain, priced in USD
    pub asset_side_usd: f64,
    /// Native RUNE outbound fee, priced in USD
    pub rune_side_usd: f64,
}

impl WithdrawFeeBreakdown {
    pub fn total_for(&self, withdraw_type: WithdrawType) -> f64 {
        match withdraw_type {
            WithdrawType::AllRune => self.rune_side_usd,
            WithdrawType::AllAsset => self.asset_side_usd,
            WithdrawType::Split => self.asset_side_usd + self.rune_side_usd,
        }
    }
}

/// Both fee components, independent of the withdraw type.
pub fn withdraw_fee_breakdown(inputs: &WithdrawFeeInputs<'_>) -> Result<WithdrawFeeBreakdown> {
    let gas_asset_pool = inputs
        .gas_asset_pool
        .ok_or_else(|| AppError::MissingInput("gas asset pool".to_string()))?;
    let native_outbound_fee = inputs
        .native_outbound_fee_rune_in_base
        .ok_or_else(|| AppError::MissingInput("native outbound fee".to_string()))?;

    let asset: Asset = inputs.pool.asset.parse()?;
    let inbound = inbound_for_chain(inputs.inbound_addresses, asset.chain).ok_or_else(|| {
        AppError::NotFound(format!("No inbound address for chain {}", asset.chain))
    })?;

    let outbound_fee_in_rune = get_value_of_asset_in_rune(inbound.outbound_fee, gas_asset_pool)?;

    Ok(WithdrawFeeBreakdown {
        asset_side_usd: base_to_units(outbound_fee_in_rune) * inputs.rune_price_usd,
        rune_side_usd: base_to_units(native_outbound_fee) * inputs.rune_price_usd,
    })
}

/// Estimated USD cost of withdrawing from `inputs.pool`.
pub fn estimate_withdraw_fee_usd(inputs: &WithdrawFeeInputs<'_>) -> Result<f64> {
    let breakdown = withdraw_fee_breakdown(inputs)?;
    Ok(breakdown.total_for(inputs.withdraw_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pool(asset: &str, rune_depth: u128, asset_depth: u128) -> PoolDetail {
        serde_json::from_value(json!({
            "asset": asset,
            "assetDepth": asset_depth.to_string(),
            "runeDepth": rune_depth.to_string(),
            "status": "available",
        }))
        .unwrap()
    }

    fn inbound(chain: &str, outbound_fee: u128) -> InboundAddress {
        serde_json::from_value(json!({
            "chain": chain,
            "outbound_fee": outbound_fee.to_string(),
        }))
        .unwrap()
    }

    #[test]
    fn test_value_of_asset_in_rune() {
        let p = pool("BTC.BTC", 1000, 10);
        assert_eq!(get_value_of_asset_in_rune(5, &p).unwrap(), 500);
        assert_eq!(get_value_of_rune_in_asset(500, &p).unwrap(), 5);
    }

    #[test]
    fn test_zero_depth_is_rejected() {
        let p = pool("BTC.BTC", 1000, 0);
        assert!(matches!(
            get_value_of_asset_in_rune(5, &p),
            Err(AppError::InvalidInput(_))
        ));
    }

    fn fixture() -> (PoolDetail, PoolDetail, Vec<InboundAddress>) {
        // 1 ETH = 2000 RUNE; USDC pool on ETH
        let usdc = pool("ETH.USDC-0XA0B86991C6218B36C1D19D4A2E9EB0CE3606EB48", 500_000, 1_000_000);
        let eth = pool("ETH.ETH", 200_000_000_000, 100_000_000);
        let inbound = vec![inbound("BTC", 1_000), inbound("ETH", 50_000)];
        (usdc, eth, inbound)
    }

    fn inputs<'a>(
        usdc: &'a PoolDetail,
        eth: &'a PoolDetail,
        inbound: &'a [InboundAddress],
        withdraw_type: WithdrawType,
    ) -> WithdrawFeeInputs<'a> {
        WithdrawFeeInputs {
            pool: usdc,
            rune_price_usd: 2.0,
            withdraw_type,
            gas_asset_pool: Some(eth),
            native_outbound_fee_rune_in_base: Some(2_000_000),
            inbound_addresses: inbound,
        }
    }

    #[test]
    fn test_fee_components() {
        let (usdc, eth, inbound) = fixture();

        let breakdown =
            withdraw_fee_breakdown(&inputs(&usdc, &eth, &inbound, WithdrawType::Split)).unwrap();
        // 50_000 base ETH = 0.0005 ETH = 1 RUNE = $2
        assert!((breakdown.asset_side_usd - 2.0).abs() < 1e-9);
        // 0.02 RUNE = $0.04
        assert!((breakdown.rune_side_usd - 0.04).abs() < 1e-9);
    }

    #[test]
    fn test_split_is_sum_of_sides() {
        let (usdc, eth, inbound) = fixture();
        let fee = |t| estimate_withdraw_fee_usd(&inputs(&usdc, &eth, &inbound, t)).unwrap();

        let split = fee(WithdrawType::Split);
        let all_rune = fee(WithdrawType::AllRune);
        let all_asset = fee(WithdrawType::AllAsset);
        assert!((split - (all_rune + all_asset)).abs() < 1e-9);
        assert!(all_rune < all_asset);
    }

    #[test]
    fn test_missing_gas_pool_fails_before_parsing() {
        let (_, eth, inbound) = fixture();
        let broken = pool("not an asset", 1, 1);
        let mut req = inputs(&broken, &eth, &inbound, WithdrawType::Split);
        req.gas_asset_pool = None;
        assert!(matches!(
            estimate_withdraw_fee_usd(&req),
            Err(AppError::MissingInput(_))
        ));

        let mut req = inputs(&broken, &eth, &inbound, WithdrawType::Split);
        req.native_outbound_fee_rune_in_base = None;
        assert!(matches!(
            estimate_withdraw_fee_usd(&req),
            Err(AppError::MissingInput(_))
        ));
    }

    #[test]
    fn test_unparseable_asset() {
        let (_, eth, inbound) = fixture();
        let broken = pool("USDC", 1, 1);
        let req = inputs(&broken, &eth, &inbound, WithdrawType::AllAsset);
        assert!(matches!(
            estimate_withdraw_fee_usd(&req),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_no_inbound_for_chain() {
        let (_, eth, inbound) = fixture();
        let avax = pool("AVAX.AVAX", 10, 10);
        let req = inputs(&avax, &eth, &inbound, WithdrawType::AllRune);
        assert!(matches!(
            estimate_withdraw_fee_usd(&req),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_withdraw_type_parsing() {
        assert_eq!("all_rune".parse::<WithdrawType>().unwrap(), WithdrawType::AllRune);
        assert_eq!("ALL-ASSET".parse::<WithdrawType>().unwrap(), WithdrawType::AllAsset);
        assert_eq!(WithdrawType::Split.to_string(), "SPLIT");
        assert!("half".parse::<WithdrawType>().is_err());
    }
}
