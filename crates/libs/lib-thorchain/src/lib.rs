//! # THORChain Library
//!
//! HTTP and JSON-RPC clients for the services behind the dashboard (Midgard
//! indexer, Thornode, per-chain JSON-RPC providers and the GraphQL balance
//! aggregator) plus the withdraw fee calculator.
//!
//! Every network call takes a [`tokio_util::sync::CancellationToken`] and
//! issues exactly one request; retrying is left to the caller.

pub mod balances;
pub mod client;
pub mod fees;
pub mod http;
pub mod infura;
pub mod midgard;
pub mod thornode;

#[cfg(test)]
mod tests;

pub use balances::BalanceClient;
pub use client::{ThorchainClients, ThorchainClientsBuilder};
pub use fees::{
    estimate_withdraw_fee_usd, get_value_of_asset_in_rune, get_value_of_rune_in_asset,
    withdraw_fee_breakdown, WithdrawFeeBreakdown, WithdrawFeeInputs, WithdrawType,
};
pub use http::{fetch_json, post_json, with_cancel};
pub use infura::InfuraClient;
pub use midgard::{ActionsQuery, MidgardClient};
pub use thornode::{inbound_for_chain, ThornodeClient};
