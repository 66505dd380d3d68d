//! Withdraw cost quoting: fetch every fee input fresh, then run the fee
//! calculator.

use lib_core::{AppError, Asset, Result};
use lib_thorchain::fees::{withdraw_fee_breakdown, WithdrawFeeBreakdown, WithdrawFeeInputs, WithdrawType};
use lib_thorchain::inbound_for_chain;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{instrument, warn};

use crate::core::IndexerService;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithdrawQuote {
    pub pool: String,
    pub withdraw_type: WithdrawType,
    pub rune_price_usd: f64,
    pub breakdown: WithdrawFeeBreakdown,
    pub total_usd: f64,
    /// The chain is halted or has liquidity actions paused
    pub lp_paused: bool,
}

#[instrument(skip(indexer, cancel))]
pub async fn quote_withdraw_cost(
    indexer: &dyn IndexerService,
    asset: &str,
    withdraw_type: WithdrawType,
    cancel: &CancellationToken,
) -> Result<WithdrawQuote> {
    let parsed: Asset = asset.parse()?;

    let (pools, inbound_addresses, rune_price_usd, native_fee) = tokio::try_join!(
        indexer.pools(cancel),
        indexer.inbound_addresses(cancel),
        indexer.rune_price_usd(cancel),
        indexer.native_outbound_fee(cancel),
    )?;

    let pool = pools
        .iter()
        .find(|p| p.asset.eq_ignore_ascii_case(asset))
        .ok_or_else(|| AppError::NotFound(format!("Pool {}", asset)))?;
    let gas_asset = parsed.chain.gas_asset();
    let gas_asset_pool = pools.iter().find(|p| p.asset.eq_ignore_ascii_case(gas_asset));

    let inputs = WithdrawFeeInputs {
        pool,
        rune_price_usd,
        withdraw_type,
        gas_asset_pool,
        native_outbound_fee_rune_in_base: Some(native_fee),
        inbound_addresses: &inbound_addresses,
    };
    let breakdown = withdraw_fee_breakdown(&inputs)?;

    let lp_paused = inbound_for_chain(&inbound_addresses, parsed.chain)
        .is_some_and(|entry| !entry.accepts_lp_actions());
    if lp_paused {
        warn!(chain = %parsed.chain, "Liquidity actions are paused; withdrawal would not be processed");
    }

    Ok(WithdrawQuote {
        pool: pool.asset.clone(),
        withdraw_type,
        rune_price_usd,
        total_usd: breakdown.total_for(withdraw_type),
        breakdown,
        lp_paused,
    })
}
