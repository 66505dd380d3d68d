//! # JSON-RPC Client
//!
//! Generic `{jsonrpc, id, method, params}` calls against per-chain provider
//! URLs (Infura or any compatible node), plus the few EVM reads the dashboard
//! needs for wallet balances.
//!
//! A chain with no configured endpoint fails with [`AppError::Config`] before
//! any request is issued.

use lib_core::{AppError, Chain, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use shared::dto::rpc::{JsonRpcRequest, JsonRpcResponse};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::http::post_json;

/// `balanceOf(address)` selector.
pub const ERC20_BALANCE_OF_SELECTOR: &str = "0x70a08231";

#[derive(Clone)]
pub struct InfuraClient {
    pub(crate) http: Client,
    endpoints: BTreeMap<Chain, String>,
    next_id: Arc<AtomicU64>,
}

impl InfuraClient {
    pub fn new(http: Client, endpoints: BTreeMap<Chain, String>) -> Self {
        Self {
            http,
            endpoints,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn has_endpoint(&self, chain: Chain) -> bool {
        self.endpoints.contains_key(&chain)
    }

    pub fn configured_chains(&self) -> impl Iterator<Item = Chain> + '_ {
        self.endpoints.keys().copied()
    }

    /// Issue one JSON-RPC call and decode its `result`.
    #[instrument(skip(self, chain, params, cancel), fields(chain = %chain))]
    pub async fn infura_request<T: DeserializeOwned>(
        &self,
        chain: Chain,
        method: &str,
        params: Value,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let url = self.endpoints.get(&chain).ok_or_else(|| {
            AppError::Config(format!("No RPC endpoint configured for {}", chain))
        })?;

        let request = JsonRpcRequest::new(self.next_id.fetch_add(1, Ordering::Relaxed), method, params);
        let response: JsonRpcResponse = post_json(&self.http, url, &request, cancel).await?;

        if let Some(error) = response.error {
            tracing::warn!(code = error.code, message = %error.message, "JSON-RPC error");
            return Err(AppError::Rpc(error.message));
        }

        let result = response
            .result
            .ok_or_else(|| AppError::Decoding(format!("{} returned no result", method)))?;
        Ok(serde_json::from_value(result)?)
    }

    /// Native balance (wei) via `eth_getBalance`.
    pub async fn get_native_balance(
        &self,
        chain: Chain,
        address: &str,
        cancel: &CancellationToken,
    ) -> Result<u128> {
        let hex: String = self
            .infura_request(chain, "eth_getBalance", json!([address, "latest"]), cancel)
            .await?;
        parse_hex_quantity(&hex)
    }

    /// ERC-20 balance via `eth_call` to `balanceOf(owner)`.
    pub async fn get_erc20_balance(
        &self,
        chain: Chain,
        token: &str,
        owner: &str,
        cancel: &CancellationToken,
    ) -> Result<u128> {
        let data = encode_balance_of(owner)?;
        let hex: String = self
            .infura_request(
                chain,
                "eth_call",
                json!([{ "to": token, "data": data }, "latest"]),
                cancel,
            )
            .await?;
        parse_hex_quantity(&hex)
    }

    /// Current gas price (wei) via `eth_gasPrice`.
    pub async fn get_gas_price(&self, chain: Chain, cancel: &CancellationToken) -> Result<u128> {
        let hex: String = self
            .infura_request(chain, "eth_gasPrice", json!([]), cancel)
            .await?;
        parse_hex_quantity(&hex)
    }
}

/// Decode a `0x`-prefixed hex quantity. `eth_call` returns a 32-byte word, so
/// leading zeros beyond `u128` range are accepted as long as the value fits.
pub fn parse_hex_quantity(hex: &str) -> Result<u128> {
    let digits = hex
        .strip_prefix("0x")
        .ok_or_else(|| AppError::Decoding(format!("Expected 0x-prefixed quantity, got {:?}", hex)))?;
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(0);
    }
    u128::from_str_radix(significant, 16)
        .map_err(|e| AppError::Decoding(format!("Invalid hex quantity {:?}: {}", hex, e)))
}

fn encode_balance_of(owner: &str) -> Result<String> {
    let addr = owner
        .strip_prefix("0x")
        .filter(|a| a.len() == 40 && a.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| AppError::InvalidInput(format!("Not an EVM address: {}", owner)))?;
    Ok(format!(
        "{}{:0>64}",
        ERC20_BALANCE_OF_SELECTOR,
        addr.to_ascii_lowercase()
    ))
}
