//! # Liquidity Positions
//!
//! Confirmed memberships come from the indexer and are replaced wholesale on
//! every refresh. Submitted-but-unconfirmed deposits and withdrawals live in a
//! separate pending overlay keyed by `(address, pool)`.
//!
//! ## Reconciliation
//!
//! A pending entry is resolved when any of these holds, checked in order:
//!
//! 1. its transaction's stage record reports complete;
//! 2. the indexer reflects it: for a deposit `date_last_added` is at or after
//!    submission, for a withdrawal the membership seen at submission is gone
//!    from the latest refresh of its address or its liquidity units dropped
//!    below the snapshot taken at submission;
//! 3. it is older than the pending TTL, in which case it is demoted (dropped
//!    from the overlay and reported as expired).
//!
//! A failed status lookup never resolves an entry by itself.

use chrono::{DateTime, Duration, Utc};
use lib_core::{AppError, Config, Result};
use lib_utils::unix_secs;
use parking_lot::RwLock;
use serde::Serialize;
use shared::dto::midgard::MemberPool;
use std::collections::{BTreeMap, BTreeSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::core::IndexerService;

type PositionKey = (String, String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingAction {
    Deposit,
    Withdraw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionStatus {
    Confirmed,
    Pending(PendingAction),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingEntry {
    pub address: String,
    pub pool: String,
    pub tx_id: String,
    pub action: PendingAction,
    pub submitted_at: DateTime<Utc>,
    /// Liquidity units held when the transaction was submitted
    pub units_at_submission: Option<u128>,
}

/// Merged view of one `(address, pool)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    pub address: String,
    pub pool: String,
    pub status: PositionStatus,
    /// Indexer record; `None` for a deposit the indexer has not seen yet
    pub member: Option<MemberPool>,
}

impl Position {
    pub fn liquidity_units(&self) -> u128 {
        self.member.as_ref().map_or(0, |m| m.liquidity_units)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, PositionStatus::Pending(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub confirmed: Vec<PendingEntry>,
    pub expired: Vec<PendingEntry>,
    pub still_pending: usize,
}

#[derive(Default)]
struct Inner {
    confirmed: BTreeMap<PositionKey, MemberPool>,
    pending: BTreeMap<PositionKey, PendingEntry>,
    /// Addresses whose memberships were fetched by the latest refresh
    refreshed: BTreeSet<String>,
    refreshed_at: Option<DateTime<Utc>>,
}

pub struct PositionsStore {
    ttl: Duration,
    inner: RwLock<Inner>,
}

enum Resolution {
    Confirmed,
    Expired,
    Pending,
}

impl PositionsStore {
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            ttl: Duration::from_std(ttl).unwrap_or(Duration::MAX),
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.pending_position_ttl())
    }

    /// Record a just-submitted transaction ahead of indexer confirmation.
    /// A newer submission for the same `(address, pool)` replaces the older.
    pub fn mark_pending(
        &self,
        address: &str,
        pool: &str,
        tx_id: &str,
        action: PendingAction,
        now: DateTime<Utc>,
    ) -> PendingEntry {
        let key = (address.to_string(), pool.to_string());
        let mut inner = self.inner.write();
        let entry = PendingEntry {
            address: key.0.clone(),
            pool: key.1.clone(),
            tx_id: tx_id.to_string(),
            action,
            submitted_at: now,
            units_at_submission: inner.confirmed.get(&key).map(|m| m.liquidity_units),
        };
        if let Some(previous) = inner.pending.insert(key, entry.clone()) {
            debug!(tx_id = %previous.tx_id, "Pending entry superseded");
        }
        info!(address, pool, tx_id, ?action, "Position marked pending");
        entry
    }

    pub fn pending(&self) -> Vec<PendingEntry> {
        self.inner.read().pending.values().cloned().collect()
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().refreshed_at
    }

    /// Re-fetch memberships for `addresses`, replacing what was known for
    /// them, then reconcile the pending overlay.
    #[instrument(skip(self, indexer, addresses, cancel), fields(addresses = addresses.len()))]
    pub async fn refresh(
        &self,
        indexer: &dyn IndexerService,
        addresses: &[String],
        cancel: &CancellationToken,
        now: DateTime<Utc>,
    ) -> Result<ReconcileReport> {
        let mut fetched = Vec::with_capacity(addresses.len());
        for address in addresses {
            let pools = indexer.member_pools(address, cancel).await?;
            fetched.push((address.clone(), pools));
        }

        {
            let mut inner = self.inner.write();
            inner.refreshed = addresses.iter().cloned().collect();
            for (address, pools) in fetched {
                inner.confirmed.retain(|(a, _), _| a != &address);
                for member in pools {
                    inner
                        .confirmed
                        .insert((address.clone(), member.pool.clone()), member);
                }
            }
            inner.refreshed_at = Some(now);
        }

        self.reconcile(indexer, cancel, now).await
    }

    /// Resolve pending entries against transaction status, indexer state and
    /// the TTL.
    pub async fn reconcile(
        &self,
        indexer: &dyn IndexerService,
        cancel: &CancellationToken,
        now: DateTime<Utc>,
    ) -> Result<ReconcileReport> {
        let pending = self.pending();
        let mut outcomes = Vec::with_capacity(pending.len());

        for entry in pending {
            let stages_complete = match indexer.tx_status(&entry.tx_id, cancel).await {
                Ok(status) => status.stages.is_complete(),
                Err(AppError::Cancelled) => return Err(AppError::Cancelled),
                Err(e) => {
                    warn!(tx_id = %entry.tx_id, error = %e, "Status lookup failed");
                    false
                }
            };

            let resolution = if stages_complete || self.indexer_reflects(&entry) {
                Resolution::Confirmed
            } else if now - entry.submitted_at >= self.ttl {
                Resolution::Expired
            } else {
                Resolution::Pending
            };
            outcomes.push((entry, resolution));
        }

        let mut report = ReconcileReport::default();
        let mut inner = self.inner.write();
        for (entry, resolution) in outcomes {
            let key = (entry.address.clone(), entry.pool.clone());
            // Skip entries superseded while lookups were in flight
            if inner.pending.get(&key).map(|p| &p.tx_id) != Some(&entry.tx_id) {
                continue;
            }
            match resolution {
                Resolution::Confirmed => {
                    inner.pending.remove(&key);
                    info!(tx_id = %entry.tx_id, "Pending position confirmed");
                    report.confirmed.push(entry);
                }
                Resolution::Expired => {
                    inner.pending.remove(&key);
                    warn!(tx_id = %entry.tx_id, "Pending position expired without confirmation");
                    report.expired.push(entry);
                }
                Resolution::Pending => {}
            }
        }
        report.still_pending = inner.pending.len();
        Ok(report)
    }

    fn indexer_reflects(&self, entry: &PendingEntry) -> bool {
        let inner = self.inner.read();
        let member = inner
            .confirmed
            .get(&(entry.address.clone(), entry.pool.clone()));

        match entry.action {
            PendingAction::Deposit => member.is_some_and(|m| {
                m.date_last_added >= u128::from(unix_secs(entry.submitted_at))
            }),
            // Without a snapshot there is nothing to compare against
            PendingAction::Withdraw => match (member, entry.units_at_submission) {
                (None, Some(_)) => inner.refreshed.contains(&entry.address),
                (Some(m), Some(before)) => m.liquidity_units < before,
                (_, None) => false,
            },
        }
    }

    /// Confirmed memberships with the pending overlay applied. Deposits the
    /// indexer has not seen yet appear as zero-unit pending positions.
    pub fn positions(&self) -> Vec<Position> {
        let inner = self.inner.read();
        let mut positions: Vec<Position> = inner
            .confirmed
            .iter()
            .map(|(key, member)| Position {
                address: key.0.clone(),
                pool: key.1.clone(),
                status: inner
                    .pending
                    .get(key)
                    .map_or(PositionStatus::Confirmed, |p| PositionStatus::Pending(p.action)),
                member: Some(member.clone()),
            })
            .collect();

        positions.extend(
            inner
                .pending
                .iter()
                .filter(|(key, entry)| {
                    entry.action == PendingAction::Deposit && !inner.confirmed.contains_key(*key)
                })
                .map(|(key, entry)| Position {
                    address: key.0.clone(),
                    pool: key.1.clone(),
                    status: PositionStatus::Pending(entry.action),
                    member: None,
                }),
        );
        positions
    }

    pub fn positions_for(&self, address: &str) -> Vec<Position> {
        self.positions()
            .into_iter()
            .filter(|p| p.address == address)
            .collect()
    }
}
