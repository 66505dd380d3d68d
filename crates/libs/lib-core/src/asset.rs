//! # Asset Identifiers
//!
//! Parses THORChain asset strings:
//!
//! | Form | Kind |
//! |---|---|
//! | `BTC.BTC`, `ETH.USDC-0XA0B8...` | layer-1 |
//! | `BTC/BTC` | synth |
//! | `BTC~BTC` | trade |
//!
//! ```rust
//! use lib_core::asset::{Asset, AssetKind};
//! use lib_core::chain::Chain;
//!
//! let usdc: Asset = "ETH.USDC-0XA0B86991C6218B36C1D19D4A2E9EB0CE3606EB48".parse()?;
//! assert_eq!(usdc.chain, Chain::Eth);
//! assert_eq!(usdc.ticker, "USDC");
//! assert_eq!(usdc.kind, AssetKind::Layer1);
//! # Ok::<(), lib_core::AppError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use crate::chain::Chain;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Layer1,
    Synth,
    Trade,
}

impl AssetKind {
    fn separator(&self) -> char {
        match self {
            AssetKind::Layer1 => '.',
            AssetKind::Synth => '/',
            AssetKind::Trade => '~',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asset {
    pub chain: Chain,
    /// Full symbol including any contract suffix, e.g. `USDC-0XA0B8...`
    pub symbol: String,
    /// Symbol without the contract suffix, e.g. `USDC`
    pub ticker: String,
    pub contract: Option<String>,
    pub kind: AssetKind,
}

impl Asset {
    /// Whether this is the asset fees on its chain are paid in.
    pub fn is_gas_asset(&self) -> bool {
        self.kind == AssetKind::Layer1 && self.to_string() == self.chain.gas_asset()
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.chain, self.kind.separator(), self.symbol)
    }
}

impl FromStr for Asset {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidInput(format!("Unparseable asset: {:?}", s));

        let (idx, kind) = s
            .char_indices()
            .find_map(|(i, c)| match c {
                '.' => Some((i, AssetKind::Layer1)),
                '/' => Some((i, AssetKind::Synth)),
                '~' => Some((i, AssetKind::Trade)),
                _ => None,
            })
            .ok_or_else(invalid)?;

        let chain: Chain = s[..idx].parse().map_err(|_| invalid())?;
        let symbol = s[idx + 1..].trim();
        if symbol.is_empty() || symbol.contains(['.', '/', '~']) {
            return Err(invalid());
        }

        let (ticker, contract) = match symbol.split_once('-') {
            Some((ticker, contract)) if !ticker.is_empty() && !contract.is_empty() => {
                (ticker.to_string(), Some(contract.to_string()))
            }
            Some(_) => return Err(invalid()),
            None => (symbol.to_string(), None),
        };

        Ok(Asset {
            chain,
            symbol: symbol.to_ascii_uppercase(),
            ticker: ticker.to_ascii_uppercase(),
            contract,
            kind,
        })
    }
}
