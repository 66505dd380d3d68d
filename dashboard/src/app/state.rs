//! # Application State
//!
//! Plain data owned by [`AppStore`](super::store::AppStore). Consumers get
//! clones; only the store's actions mutate the live copy.

use chrono::{DateTime, Utc};
use lib_core::WalletKind;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use crate::services::{EventProvider, KnownAddress};

/// Oldest toasts are dropped beyond this many.
pub const MAX_TOASTS: usize = 5;

/// The wallet adapter behind a connection.
#[derive(Clone)]
pub struct ProviderHandle {
    pub kind: WalletKind,
    /// `None` for wallets that cannot announce changes (e.g. a keystore)
    pub events: Option<Arc<dyn EventProvider>>,
}

impl ProviderHandle {
    pub fn new(kind: WalletKind) -> Self {
        Self { kind, events: None }
    }

    pub fn with_events(kind: WalletKind, events: Arc<dyn EventProvider>) -> Self {
        Self {
            kind,
            events: Some(events),
        }
    }
}

impl fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("kind", &self.kind)
            .field("events", &self.events.as_ref().map(|p| p.name().to_string()))
            .finish()
    }
}

/// A connected wallet. Exists only while connected.
#[derive(Debug, Clone)]
pub struct WalletState {
    pub address: String,
    /// Network identifier as the provider reports it, e.g. `0x1`
    pub network: String,
    pub provider: ProviderHandle,
}

impl WalletState {
    pub fn new(address: impl Into<String>, network: impl Into<String>, provider: ProviderHandle) -> Self {
        Self {
            address: address.into(),
            network: network.into(),
            provider,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    WalletSelect,
    Deposit { pool: String },
    Withdraw { pool: String },
    TransactionStatus { tx_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub wallet: Option<WalletState>,
    pub modal: Option<Modal>,
    /// Newest last
    pub toasts: VecDeque<Toast>,
    /// Set by failures the user must acknowledge before continuing
    pub error_boundary: Option<String>,
    pub known_addresses: Vec<KnownAddress>,
    pub mounted: bool,
}

impl AppState {
    pub fn is_connected(&self) -> bool {
        self.wallet.is_some()
    }

    pub fn address(&self) -> Option<&str> {
        self.wallet.as_ref().map(|w| w.address.as_str())
    }
}
