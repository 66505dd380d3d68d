//! # Address Book
//!
//! Addresses the user connected before, so positions can be shown without
//! reconnecting. Read once when the store mounts and rewritten on every
//! change. Concurrent processes sharing one file are not coordinated.

use lib_core::{AppError, Chain, Result, WalletKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownAddress {
    pub chain: Chain,
    pub address: String,
    #[serde(default)]
    pub wallet: Option<WalletKind>,
}

impl KnownAddress {
    pub fn new(chain: Chain, address: impl Into<String>, wallet: Option<WalletKind>) -> Self {
        Self {
            chain,
            address: address.into(),
            wallet,
        }
    }

    /// Same chain and address; addresses compare case-insensitively.
    pub fn same_as(&self, other: &KnownAddress) -> bool {
        self.chain == other.chain && self.address.eq_ignore_ascii_case(&other.address)
    }
}

pub trait AddressBook: Send + Sync {
    fn load(&self) -> Result<Vec<KnownAddress>>;
    fn save(&self, entries: &[KnownAddress]) -> Result<()>;
}

/// Address book stored as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileAddressBook {
    path: PathBuf,
}

impl JsonFileAddressBook {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AddressBook for JsonFileAddressBook {
    fn load(&self) -> Result<Vec<KnownAddress>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "Address book not found, starting empty");
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| io_error(&self.path, e))?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            AppError::Decoding(format!("Address book {}: {}", self.path.display(), e))
        })
    }

    fn save(&self, entries: &[KnownAddress]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| io_error(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), entries = entries.len(), "Address book saved");
        Ok(())
    }
}

fn io_error(path: &Path, e: std::io::Error) -> AppError {
    AppError::Internal(format!("{}: {}", path.display(), e))
}
