//! # App Tests
//!
//! Test doubles shared by the store, positions and quoting tests.

mod positions;

use async_trait::async_trait;
use lib_core::{AppError, Result};
use parking_lot::Mutex;
use serde_json::json;
use shared::dto::midgard::{MemberPool, PoolDetail};
use shared::dto::thornode::{InboundAddress, TxStatusResponse};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::core::IndexerService;
use crate::services::{
    AddressBook, EventEmitter, EventProvider, KnownAddress, Listener, ListenerId,
    ProviderEvent, ProviderEventKind,
};

/// Provider wrapper recording every add/remove call.
pub struct SpyProvider {
    inner: EventEmitter,
    pub added: Mutex<Vec<(ProviderEventKind, ListenerId)>>,
    pub removed: Mutex<Vec<(ProviderEventKind, ListenerId)>>,
}

impl SpyProvider {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            inner: EventEmitter::new(name),
            added: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
        })
    }

    pub fn emit(&self, event: ProviderEvent) -> usize {
        self.inner.emit(&event)
    }

    pub fn active_listeners(&self) -> usize {
        self.inner.listener_count()
    }
}

impl EventProvider for SpyProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn add_listener(&self, kind: ProviderEventKind, listener: Listener) -> ListenerId {
        let id = self.inner.add_listener(kind, listener);
        self.added.lock().push((kind, id));
        id
    }

    fn remove_listener(&self, kind: ProviderEventKind, id: ListenerId) -> bool {
        self.removed.lock().push((kind, id));
        self.inner.remove_listener(kind, id)
    }
}

#[derive(Default)]
pub struct MemoryAddressBook {
    pub entries: Mutex<Vec<KnownAddress>>,
    pub saves: AtomicUsize,
    /// When set, every save fails without storing anything
    pub fail_saves: AtomicBool,
}

impl AddressBook for MemoryAddressBook {
    fn load(&self) -> Result<Vec<KnownAddress>> {
        Ok(self.entries.lock().clone())
    }

    fn save(&self, entries: &[KnownAddress]) -> Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(AppError::Internal("disk full".to_string()));
        }
        *self.entries.lock() = entries.to_vec();
        Ok(())
    }
}

/// In-memory indexer with per-call counters.
#[derive(Default)]
pub struct FakeIndexer {
    pub pools: Mutex<Vec<PoolDetail>>,
    pub members: Mutex<HashMap<String, Vec<MemberPool>>>,
    pub statuses: Mutex<HashMap<String, TxStatusResponse>>,
    pub inbound: Mutex<Vec<InboundAddress>>,
    pub rune_price_usd: Mutex<f64>,
    pub native_fee: Mutex<u128>,
    pub status_calls: AtomicUsize,
}

#[async_trait]
impl IndexerService for FakeIndexer {
    async fn pools(&self, cancel: &CancellationToken) -> Result<Vec<PoolDetail>> {
        check(cancel)?;
        Ok(self.pools.lock().clone())
    }

    async fn member_pools(&self, address: &str, cancel: &CancellationToken) -> Result<Vec<MemberPool>> {
        check(cancel)?;
        Ok(self.members.lock().get(address).cloned().unwrap_or_default())
    }

    async fn tx_status(&self, tx_id: &str, cancel: &CancellationToken) -> Result<TxStatusResponse> {
        check(cancel)?;
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.statuses.lock().get(tx_id).cloned().ok_or(AppError::Http {
            status: 404,
            body: "unknown tx".to_string(),
        })
    }

    async fn inbound_addresses(&self, cancel: &CancellationToken) -> Result<Vec<InboundAddress>> {
        check(cancel)?;
        Ok(self.inbound.lock().clone())
    }

    async fn rune_price_usd(&self, cancel: &CancellationToken) -> Result<f64> {
        check(cancel)?;
        Ok(*self.rune_price_usd.lock())
    }

    async fn native_outbound_fee(&self, cancel: &CancellationToken) -> Result<u128> {
        check(cancel)?;
        Ok(*self.native_fee.lock())
    }
}

fn check(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        Err(AppError::Cancelled)
    } else {
        Ok(())
    }
}

pub fn pool(asset: &str, rune_depth: u128, asset_depth: u128) -> PoolDetail {
    serde_json::from_value(json!({
        "asset": asset,
        "assetDepth": asset_depth.to_string(),
        "runeDepth": rune_depth.to_string(),
        "poolAPY": "0.05",
        "status": "available",
    }))
    .unwrap()
}

pub fn member(pool: &str, units: u128, date_last_added: u128) -> MemberPool {
    serde_json::from_value(json!({
        "pool": pool,
        "liquidityUnits": units.to_string(),
        "dateLastAdded": date_last_added.to_string(),
    }))
    .unwrap()
}

pub fn inbound(chain: &str, outbound_fee: u128) -> InboundAddress {
    serde_json::from_value(json!({ "chain": chain, "outbound_fee": outbound_fee.to_string() }))
        .unwrap()
}

pub fn status(complete: bool) -> TxStatusResponse {
    serde_json::from_value(json!({
        "stages": {
            "inbound_observed": { "completed": true },
            "inbound_finalised": { "completed": complete }
        }
    }))
    .unwrap()
}
