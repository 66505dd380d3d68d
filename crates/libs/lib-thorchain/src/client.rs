//! # Client Bundle
//!
//! All protocol clients share one `reqwest::Client` (connection pool and
//! timeout). Build them together with [`ThorchainClientsBuilder`] or straight
//! from the loaded [`Config`].

use lib_core::config::{DEFAULT_MIDGARD_URL, DEFAULT_THORNODE_URL};
use lib_core::{AppError, Chain, Config, Result};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::balances::BalanceClient;
use crate::infura::InfuraClient;
use crate::midgard::MidgardClient;
use crate::thornode::ThornodeClient;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builder for configuring [`ThorchainClients`].
#[derive(Debug, Clone)]
pub struct ThorchainClientsBuilder {
    timeout: Option<Duration>,
    midgard_url: Option<String>,
    thornode_url: Option<String>,
    balances_url: Option<String>,
    rpc_urls: BTreeMap<Chain, String>,
}

impl Default for ThorchainClientsBuilder {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            midgard_url: Some(DEFAULT_MIDGARD_URL.to_string()),
            thornode_url: Some(DEFAULT_THORNODE_URL.to_string()),
            balances_url: None,
            rpc_urls: BTreeMap::new(),
        }
    }
}

impl ThorchainClientsBuilder {
    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn midgard_url(mut self, url: impl Into<String>) -> Self {
        self.midgard_url = Some(url.into());
        self
    }

    pub fn thornode_url(mut self, url: impl Into<String>) -> Self {
        self.thornode_url = Some(url.into());
        self
    }

    pub fn balances_url(mut self, url: impl Into<String>) -> Self {
        self.balances_url = Some(url.into());
        self
    }

    /// Register the JSON-RPC endpoint for `chain`, replacing any previous one.
    pub fn rpc_url(mut self, chain: Chain, url: impl Into<String>) -> Self {
        self.rpc_urls.insert(chain, url.into());
        self
    }

    pub fn build(self) -> Result<ThorchainClients> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(ThorchainClients {
            midgard: MidgardClient::new(
                http.clone(),
                self.midgard_url
                    .unwrap_or_else(|| DEFAULT_MIDGARD_URL.to_string()),
            ),
            thornode: ThornodeClient::new(
                http.clone(),
                self.thornode_url
                    .unwrap_or_else(|| DEFAULT_THORNODE_URL.to_string()),
            ),
            infura: InfuraClient::new(http.clone(), self.rpc_urls),
            balances: BalanceClient::new(http, self.balances_url),
        })
    }
}

/// Every external service the dashboard talks to.
#[derive(Clone)]
pub struct ThorchainClients {
    pub midgard: MidgardClient,
    pub thornode: ThornodeClient,
    pub infura: InfuraClient,
    pub balances: BalanceClient,
}

impl ThorchainClients {
    pub fn builder() -> ThorchainClientsBuilder {
        ThorchainClientsBuilder::default()
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = Self::builder()
            .timeout(config.http_timeout())
            .midgard_url(&config.midgard_url)
            .thornode_url(&config.thornode_url);
        if let Some(url) = &config.balances_graphql_url {
            builder = builder.balances_url(url);
        }
        for (chain, url) in &config.rpc_urls {
            builder = builder.rpc_url(*chain, url);
        }

        let clients = builder.build()?;
        tracing::info!(
            midgard = %clients.midgard.base_url(),
            thornode = %clients.thornode.base_url(),
            rpc_chains = ?clients.infura.configured_chains().collect::<Vec<_>>(),
            balances = clients.balances.is_configured(),
            "Protocol clients initialized"
        );
        Ok(clients)
    }
}
