//! # Chains and Wallets
//!
//! Static, compile-time chain metadata and the chain → supported-wallet table
//! the connect flow offers. Nothing here changes at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Chains with THORChain vaults, plus THORChain itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Chain {
    Btc,
    Eth,
    Bsc,
    Avax,
    Gaia,
    Doge,
    Ltc,
    Bch,
    Base,
    Thor,
}

impl Chain {
    pub const ALL: [Chain; 10] = [
        Chain::Btc,
        Chain::Eth,
        Chain::Bsc,
        Chain::Avax,
        Chain::Gaia,
        Chain::Doge,
        Chain::Ltc,
        Chain::Bch,
        Chain::Base,
        Chain::Thor,
    ];

    /// Identifier used in asset strings and by the node (`BTC`, `ETH`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Btc => "BTC",
            Chain::Eth => "ETH",
            Chain::Bsc => "BSC",
            Chain::Avax => "AVAX",
            Chain::Gaia => "GAIA",
            Chain::Doge => "DOGE",
            Chain::Ltc => "LTC",
            Chain::Bch => "BCH",
            Chain::Base => "BASE",
            Chain::Thor => "THOR",
        }
    }

    /// Lower-case chain name used as the balance service's GraphQL field.
    pub fn graphql_name(&self) -> &'static str {
        match self {
            Chain::Btc => "bitcoin",
            Chain::Eth => "ethereum",
            Chain::Bsc => "binanceSmartChain",
            Chain::Avax => "avalanche",
            Chain::Gaia => "cosmos",
            Chain::Doge => "dogecoin",
            Chain::Ltc => "litecoin",
            Chain::Bch => "bitcoincash",
            Chain::Base => "base",
            Chain::Thor => "thorchain",
        }
    }

    /// Asset string of the chain's gas asset, whose pool prices outbound fees.
    pub fn gas_asset(&self) -> &'static str {
        match self {
            Chain::Btc => "BTC.BTC",
            Chain::Eth => "ETH.ETH",
            Chain::Bsc => "BSC.BNB",
            Chain::Avax => "AVAX.AVAX",
            Chain::Gaia => "GAIA.ATOM",
            Chain::Doge => "DOGE.DOGE",
            Chain::Ltc => "LTC.LTC",
            Chain::Bch => "BCH.BCH",
            Chain::Base => "BASE.ETH",
            Chain::Thor => "THOR.RUNE",
        }
    }

    /// EVM chains are the ones reachable through the JSON-RPC client.
    pub fn is_evm(&self) -> bool {
        matches!(self, Chain::Eth | Chain::Bsc | Chain::Avax | Chain::Base)
    }

    /// Wallets that can sign for this chain, in display order.
    pub fn supported_wallets(&self) -> &'static [WalletKind] {
        use WalletKind::*;
        match self {
            Chain::Eth | Chain::Avax | Chain::Bsc | Chain::Base => {
                &[MetaMask, Ctrl, Phantom, WalletConnect, Keystore]
            }
            Chain::Btc => &[Ctrl, Phantom, Keystore],
            Chain::Doge | Chain::Ltc | Chain::Bch => &[Ctrl, Keystore],
            Chain::Gaia => &[Keplr, Ctrl, Keystore],
            Chain::Thor => &[Ctrl, Keplr, Keystore],
        }
    }

    /// Best guess at the chain an address belongs to, from its prefix.
    ///
    /// EVM addresses are indistinguishable across chains and map to ETH.
    pub fn from_address(address: &str) -> Option<Chain> {
        let lower = address.trim().to_ascii_lowercase();
        let chain = if lower.starts_with("thor1") {
            Chain::Thor
        } else if lower.starts_with("cosmos1") {
            Chain::Gaia
        } else if lower.starts_with("0x") {
            Chain::Eth
        } else if lower.starts_with("ltc1") {
            Chain::Ltc
        } else if lower.starts_with("bitcoincash:") || lower.starts_with('q') {
            Chain::Bch
        } else if lower.starts_with("bc1") || lower.starts_with('1') || lower.starts_with('3') {
            Chain::Btc
        } else if address.starts_with('D') {
            Chain::Doge
        } else {
            return None;
        };
        Some(chain)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chain {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Chain::ALL
            .into_iter()
            .find(|c| c.as_str() == upper)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown chain: {}", s)))
    }
}

/// Global objects browser wallets inject into the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InjectionPoint {
    /// `window.ethereum`
    Ethereum,
    /// `window.xfi`
    Xfi,
    /// `window.phantom`
    Phantom,
}

impl InjectionPoint {
    pub fn global_name(&self) -> &'static str {
        match self {
            InjectionPoint::Ethereum => "window.ethereum",
            InjectionPoint::Xfi => "window.xfi",
            InjectionPoint::Phantom => "window.phantom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    MetaMask,
    /// Formerly XDEFI
    Ctrl,
    Phantom,
    WalletConnect,
    Keplr,
    Keystore,
}

impl WalletKind {
    pub fn label(&self) -> &'static str {
        match self {
            WalletKind::MetaMask => "MetaMask",
            WalletKind::Ctrl => "Ctrl Wallet",
            WalletKind::Phantom => "Phantom",
            WalletKind::WalletConnect => "WalletConnect",
            WalletKind::Keplr => "Keplr",
            WalletKind::Keystore => "Keystore",
        }
    }

    /// The browser global this wallet injects, if any.
    pub fn injection_point(&self) -> Option<InjectionPoint> {
        match self {
            WalletKind::MetaMask => Some(InjectionPoint::Ethereum),
            WalletKind::Ctrl => Some(InjectionPoint::Xfi),
            WalletKind::Phantom => Some(InjectionPoint::Phantom),
            WalletKind::WalletConnect | WalletKind::Keplr | WalletKind::Keystore => None,
        }
    }

    /// WalletConnect needs a project id from the environment.
    pub fn requires_project_id(&self) -> bool {
        matches!(self, WalletKind::WalletConnect)
    }
}

/// Chains a wallet can be used with, derived from the chain table.
pub fn chains_for_wallet(wallet: WalletKind) -> Vec<Chain> {
    Chain::ALL
        .into_iter()
        .filter(|c| c.supported_wallets().contains(&wallet))
        .collect()
}
