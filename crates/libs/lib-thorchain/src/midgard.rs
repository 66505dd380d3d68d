//! # Midgard Indexer Client
//!
//! Read-only access to pool lists, member positions, protocol actions and
//! aggregate stats.

use lib_core::{AppError, Result};
use reqwest::{Client, Url};
use shared::dto::midgard::{ActionsResponse, MemberDetails, MemberPool, PoolDetail, StatsData};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::http::fetch_json;

/// Action types the dashboard lists by default.
pub const LIQUIDITY_ACTION_TYPES: &str = "addLiquidity,withdraw";

/// Query for `GET /v2/actions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionsQuery {
    pub address: String,
    /// Comma-separated action types, e.g. `addLiquidity,withdraw`
    pub action_types: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl ActionsQuery {
    pub fn for_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            action_types: Some(LIQUIDITY_ACTION_TYPES.to_string()),
            limit: 50,
            offset: 0,
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("address", self.address.clone()),
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ];
        if let Some(types) = &self.action_types {
            params.push(("type", types.clone()));
        }
        params
    }
}

#[derive(Clone)]
pub struct MidgardClient {
    pub(crate) http: Client,
    pub(crate) base_url: String,
}

impl MidgardClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `base_url` plus percent-encoded path segments and query pairs.
    fn endpoint(&self, segments: &[&str], params: &[(&str, String)]) -> Result<String> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::Config(format!("Invalid MIDGARD_URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Config("MIDGARD_URL cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend(segments);
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url.into())
    }

    /// Fetch every pool, optionally filtered by status (`available`, `staged`, `suspended`).
    #[instrument(skip(self, cancel))]
    pub async fn get_pools(
        &self,
        status: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Vec<PoolDetail>> {
        let params: Vec<(&str, String)> = status
            .map(|status| ("status", status.to_string()))
            .into_iter()
            .collect();
        let url = self.endpoint(&["v2", "pools"], &params)?;
        let pools: Vec<PoolDetail> = fetch_json(&self.http, &url, cancel).await?;
        debug!(count = pools.len(), "Pools fetched");
        Ok(pools)
    }

    #[instrument(skip(self, cancel))]
    pub async fn get_pool(&self, asset: &str, cancel: &CancellationToken) -> Result<PoolDetail> {
        let url = self.endpoint(&["v2", "pool", asset], &[])?;
        fetch_json(&self.http, &url, cancel).await
    }

    /// Liquidity memberships of `address`. Midgard answers 404 for an address
    /// that never provided liquidity, which is reported as an empty list.
    #[instrument(skip(self, cancel))]
    pub async fn get_member(
        &self,
        address: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<MemberPool>> {
        let url = self.endpoint(&["v2", "member", address], &[])?;
        match fetch_json::<MemberDetails>(&self.http, &url, cancel).await {
            Ok(details) => Ok(details.pools),
            Err(AppError::Http { status: 404, .. }) => {
                debug!("No memberships for address");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, cancel), fields(address = %query.address))]
    pub async fn get_actions(
        &self,
        query: &ActionsQuery,
        cancel: &CancellationToken,
    ) -> Result<ActionsResponse> {
        let url = self.endpoint(&["v2", "actions"], &query.params())?;
        fetch_json(&self.http, &url, cancel).await
    }

    /// Current RUNE price in USD.
    #[instrument(skip(self, cancel))]
    pub async fn get_rune_price_usd(&self, cancel: &CancellationToken) -> Result<f64> {
        let url = self.endpoint(&["v2", "stats"], &[])?;
        let stats: StatsData = fetch_json(&self.http, &url, cancel).await?;
        if !stats.rune_price_usd.is_finite() || stats.rune_price_usd <= 0.0 {
            return Err(AppError::Decoding(format!(
                "Invalid RUNE price: {}",
                stats.rune_price_usd
            )));
        }
        Ok(stats.rune_price_usd)
    }
}
