//! # Application Configuration
//!
//! Configuration is read from environment variables once at process start and
//! never reloaded. Library code receives `&Config` explicitly; the global
//! instance below exists for the binary's convenience.
//!
//! | Variable | Default |
//! |---|---|
//! | `MIDGARD_URL` | `https://midgard.ninerealms.com` |
//! | `THORNODE_URL` | `https://thornode.ninerealms.com` |
//! | `BALANCES_GRAPHQL_URL` | unset |
//! | `INFURA_ETH_URL`, `INFURA_AVAX_URL`, `INFURA_BSC_URL`, `INFURA_BASE_URL` | unset |
//! | `WALLETCONNECT_PROJECT_ID` | unset |
//! | `HTTP_TIMEOUT_SECS` | `10` |
//! | `PENDING_POSITION_TTL_SECS` | `900` |
//! | `ADDRESS_BOOK_PATH` | `data/addresses.json` |
//!
//! ```rust,no_run
//! use lib_core::config::{core_config, init_config};
//!
//! init_config().expect("invalid configuration");
//! let midgard = &core_config().midgard_url;
//! ```

use lib_utils::envs;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use crate::chain::Chain;
use crate::error::{AppError, Result};

pub const DEFAULT_MIDGARD_URL: &str = "https://midgard.ninerealms.com";
pub const DEFAULT_THORNODE_URL: &str = "https://thornode.ninerealms.com";

/// Environment variable holding each chain's JSON-RPC endpoint.
pub const RPC_URL_VARS: [(Chain, &str); 4] = [
    (Chain::Eth, "INFURA_ETH_URL"),
    (Chain::Avax, "INFURA_AVAX_URL"),
    (Chain::Bsc, "INFURA_BSC_URL"),
    (Chain::Base, "INFURA_BASE_URL"),
];

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Midgard indexer base URL
    pub midgard_url: String,

    /// Thornode REST base URL
    pub thornode_url: String,

    /// GraphQL balance aggregator endpoint
    pub balances_graphql_url: Option<String>,

    /// JSON-RPC endpoint per EVM chain. Chains without an entry cannot be queried.
    pub rpc_urls: BTreeMap<Chain, String>,

    /// WalletConnect project id, required only for WalletConnect sessions
    pub walletconnect_project_id: Option<String>,

    /// Per-request HTTP timeout in seconds.
    ///
    /// Valid range: 1-120
    pub http_timeout_secs: u64,

    /// How long an optimistic pending position survives without confirmation.
    ///
    /// Valid range: 60-86400 seconds
    pub pending_position_ttl_secs: u64,

    /// JSON file remembering previously connected addresses
    pub address_book_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            midgard_url: DEFAULT_MIDGARD_URL.to_string(),
            thornode_url: DEFAULT_THORNODE_URL.to_string(),
            balances_graphql_url: None,
            rpc_urls: BTreeMap::new(),
            walletconnect_project_id: None,
            http_timeout_secs: 10,
            pending_position_ttl_secs: 900,
            address_book_path: PathBuf::from("data/addresses.json"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let rpc_urls = RPC_URL_VARS
            .into_iter()
            .filter_map(|(chain, var)| envs::get_env_opt(var).map(|url| (chain, url)))
            .collect();

        let config = Self {
            midgard_url: trim_slash(envs::get_env_or("MIDGARD_URL", DEFAULT_MIDGARD_URL)),
            thornode_url: trim_slash(envs::get_env_or("THORNODE_URL", DEFAULT_THORNODE_URL)),
            balances_graphql_url: envs::get_env_opt("BALANCES_GRAPHQL_URL"),
            rpc_urls,
            walletconnect_project_id: envs::get_env_opt("WALLETCONNECT_PROJECT_ID"),
            http_timeout_secs: parse_or("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            pending_position_ttl_secs: parse_or(
                "PENDING_POSITION_TTL_SECS",
                defaults.pending_position_ttl_secs,
            )?,
            address_book_path: envs::get_env_opt("ADDRESS_BOOK_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.address_book_path),
        };

        tracing::debug!(
            midgard = %config.midgard_url,
            thornode = %config.thornode_url,
            rpc_chains = ?config.rpc_urls.keys().collect::<Vec<_>>(),
            "Configuration loaded from environment"
        );

        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        let check_url = |url: &str, name: &str| {
            lib_utils::validate_http_url(url, name).map_err(AppError::Config)
        };

        check_url(&self.midgard_url, "MIDGARD_URL")?;
        check_url(&self.thornode_url, "THORNODE_URL")?;
        if let Some(url) = &self.balances_graphql_url {
            check_url(url, "BALANCES_GRAPHQL_URL")?;
        }
        for (chain, url) in &self.rpc_urls {
            if !chain.is_evm() {
                return Err(AppError::Config(format!(
                    "JSON-RPC endpoints are only supported for EVM chains, got {}",
                    chain
                )));
            }
            check_url(url, chain.as_str())?;
        }

        if !(1..=120).contains(&self.http_timeout_secs) {
            return Err(AppError::Config(
                "HTTP_TIMEOUT_SECS must be between 1 and 120".to_string(),
            ));
        }

        if !(60..=86_400).contains(&self.pending_position_ttl_secs) {
            return Err(AppError::Config(
                "PENDING_POSITION_TTL_SECS must be between 60 and 86400".to_string(),
            ));
        }

        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn pending_position_ttl(&self) -> Duration {
        Duration::from_secs(self.pending_position_ttl_secs)
    }
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn parse_or(name: &'static str, default: u64) -> Result<u64> {
    match envs::get_env_parse::<u64>(name) {
        Ok(value) => Ok(value),
        Err(envs::Error::MissingEnv(_)) => Ok(default),
        Err(envs::Error::WrongFormat(_)) => Err(AppError::Config(format!(
            "{} must be a valid number",
            name
        ))),
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Environment variables are invalid
/// - Configuration validation fails
/// - Config has already been initialized
pub fn init_config() -> Result<&'static Config> {
    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| AppError::Config("Config has already been initialized".to_string()))?;
    Ok(core_config())
}

/// Get a reference to the global configuration.
///
/// # Panics
///
/// Panics if [`init_config()`] has not been called yet.
pub fn core_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Config must be initialized with init_config() before use")
}
