//! # Balance Aggregator Client
//!
//! One GraphQL query per `(chain, address)` returning every token balance the
//! aggregator knows for that address.

use lib_core::{AppError, Chain, Result};
use reqwest::Client;
use serde_json::json;
use shared::dto::rpc::{BalanceEntry, GraphQlRequest, GraphQlResponse};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::http::post_json;

#[derive(Clone)]
pub struct BalanceClient {
    pub(crate) http: Client,
    url: Option<String>,
}

impl BalanceClient {
    pub fn new(http: Client, url: Option<String>) -> Self {
        Self { http, url }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Balances of `address` on `chain`.
    ///
    /// A response `errors` array becomes [`AppError::Rpc`]; a response without
    /// `data.<chain>.balances` becomes [`AppError::NotFound`].
    #[instrument(skip(self, chain, cancel), fields(chain = %chain))]
    pub async fn get_balance_per_chain_and_address(
        &self,
        chain: Chain,
        address: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<BalanceEntry>> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| AppError::Config("BALANCES_GRAPHQL_URL is not set".to_string()))?;

        let request = balance_query(chain, address);
        let response: GraphQlResponse = post_json(&self.http, url, &request, cancel).await?;

        if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
            let message = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(AppError::Rpc(message));
        }

        let balances = response
            .data
            .as_ref()
            .and_then(|data| data.get(chain.graphql_name()))
            .and_then(|entry| entry.get("balances"))
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("No balances for {} in response", chain.graphql_name()))
            })?;

        let entries: Vec<BalanceEntry> = serde_json::from_value(balances)?;
        debug!(count = entries.len(), "Balances fetched");
        Ok(entries)
    }
}

fn balance_query(chain: Chain, address: &str) -> GraphQlRequest {
    let name = chain.graphql_name();
    GraphQlRequest {
        query: format!(
            "query GetBalances($address: String!) {{ {name}(address: $address) {{ balances {{ asset {{ contract symbol decimals }} amount {{ value }} }} }} }}"
        ),
        variables: json!({ "address": address }),
    }
}
