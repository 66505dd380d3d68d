//! # Thornode Client
//!
//! Inbound vault metadata, network fee parameters and the staged status of
//! individual transactions.

use lib_core::{Chain, Result};
use reqwest::Client;
use shared::dto::thornode::{InboundAddress, NetworkInfo, TxStatusResponse};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::http::fetch_json;

#[derive(Clone)]
pub struct ThornodeClient {
    pub(crate) http: Client,
    pub(crate) base_url: String,
}

impl ThornodeClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self, cancel))]
    pub async fn get_inbound_addresses(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<InboundAddress>> {
        let url = format!("{}/thorchain/inbound_addresses", self.base_url);
        let inbound: Vec<InboundAddress> = fetch_json(&self.http, &url, cancel).await?;
        debug!(chains = inbound.len(), "Inbound addresses fetched");
        Ok(inbound)
    }

    /// Outbound fee charged on native RUNE, in 1e8 base units.
    #[instrument(skip(self, cancel))]
    pub async fn get_native_outbound_fee(&self, cancel: &CancellationToken) -> Result<u128> {
        let url = format!("{}/thorchain/network", self.base_url);
        let network: NetworkInfo = fetch_json(&self.http, &url, cancel).await?;
        Ok(network.native_outbound_fee_rune)
    }

    /// Staged status of a transaction, keyed by its inbound hash.
    #[instrument(skip(self, cancel))]
    pub async fn get_tx_status(
        &self,
        tx_hash: &str,
        cancel: &CancellationToken,
    ) -> Result<TxStatusResponse> {
        let hash = tx_hash.trim_start_matches("0x").to_ascii_uppercase();
        let url = format!("{}/thorchain/tx/status/{}", self.base_url, hash);
        let status: TxStatusResponse = fetch_json(&self.http, &url, cancel).await?;
        debug!(
            complete = status.stages.is_complete(),
            stages = ?status.stages.completed_stages(),
            "Transaction status fetched"
        );
        Ok(status)
    }
}

/// Inbound entry for `chain`, if the node lists one.
pub fn inbound_for_chain(inbound: &[InboundAddress], chain: Chain) -> Option<&InboundAddress> {
    inbound
        .iter()
        .find(|entry| entry.chain.eq_ignore_ascii_case(chain.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(chain: &str) -> InboundAddress {
        serde_json::from_value(serde_json::json!({ "chain": chain, "outbound_fee": "1000" })).unwrap()
    }

    #[test]
    fn test_inbound_for_chain_matches_case_insensitively() {
        let inbound = vec![entry("BTC"), entry("eth")];
        assert_eq!(inbound_for_chain(&inbound, Chain::Eth).map(|e| e.outbound_fee), Some(1000));
        assert!(inbound_for_chain(&inbound, Chain::Avax).is_none());
    }
}
