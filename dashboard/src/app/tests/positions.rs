use super::*;
use crate::app::positions::{PendingAction, PositionStatus, PositionsStore};
use chrono::{DateTime, Duration, TimeZone, Utc};

const TTL_SECS: u64 = 900;

fn t0() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

fn positions() -> PositionsStore {
    PositionsStore::new(std::time::Duration::from_secs(TTL_SECS))
}

fn addresses() -> Vec<String> {
    vec!["thor1abc".to_string()]
}

#[tokio::test]
async fn test_refresh_replaces_confirmed_wholesale() {
    let indexer = FakeIndexer::default();
    indexer.members.lock().insert(
        "thor1abc".to_string(),
        vec![member("BTC.BTC", 100, 1_600_000_000), member("ETH.ETH", 50, 1_600_000_000)],
    );
    let store = positions();
    let cancel = CancellationToken::new();

    store.refresh(&indexer, &addresses(), &cancel, t0()).await.unwrap();
    assert_eq!(store.positions().len(), 2);

    indexer
        .members
        .lock()
        .insert("thor1abc".to_string(), vec![member("BTC.BTC", 120, 1_600_000_000)]);
    store.refresh(&indexer, &addresses(), &cancel, t0()).await.unwrap();

    let all = store.positions();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].liquidity_units(), 120);
    assert_eq!(all[0].status, PositionStatus::Confirmed);
    assert_eq!(store.refreshed_at(), Some(t0()));
}

#[tokio::test]
async fn test_pending_deposit_shows_before_indexer() {
    let indexer = FakeIndexer::default();
    let store = positions();

    store.mark_pending("thor1abc", "BTC.BTC", "TX1", PendingAction::Deposit, t0());

    let all = store.positions_for("thor1abc");
    assert_eq!(all.len(), 1);
    assert!(all[0].is_pending());
    assert_eq!(all[0].liquidity_units(), 0);
    assert!(all[0].member.is_none());

    // Unknown tx and nothing indexed yet: still pending
    let report = store
        .refresh(&indexer, &addresses(), &CancellationToken::new(), t0() + Duration::seconds(30))
        .await
        .unwrap();
    assert!(report.confirmed.is_empty());
    assert!(report.expired.is_empty());
    assert_eq!(report.still_pending, 1);
}

#[tokio::test]
async fn test_completed_stages_confirm_pending() {
    let indexer = FakeIndexer::default();
    indexer.statuses.lock().insert("TX1".to_string(), status(true));
    let store = positions();
    store.mark_pending("thor1abc", "BTC.BTC", "TX1", PendingAction::Deposit, t0());

    let report = store
        .reconcile(&indexer, &CancellationToken::new(), t0() + Duration::seconds(10))
        .await
        .unwrap();

    assert_eq!(report.confirmed.len(), 1);
    assert!(store.pending().is_empty());
}

#[tokio::test]
async fn test_deposit_confirmed_by_indexer_date() {
    let indexer = FakeIndexer::default();
    indexer.statuses.lock().insert("TX1".to_string(), status(false));
    let store = positions();
    store.mark_pending("thor1abc", "BTC.BTC", "TX1", PendingAction::Deposit, t0());

    // Membership last touched before submission does not count
    indexer
        .members
        .lock()
        .insert("thor1abc".to_string(), vec![member("BTC.BTC", 100, 1_699_999_000)]);
    let report = store
        .refresh(&indexer, &addresses(), &CancellationToken::new(), t0())
        .await
        .unwrap();
    assert!(report.confirmed.is_empty());
    assert_eq!(
        store.positions()[0].status,
        PositionStatus::Pending(PendingAction::Deposit)
    );

    indexer
        .members
        .lock()
        .insert("thor1abc".to_string(), vec![member("BTC.BTC", 150, 1_700_000_060)]);
    let report = store
        .refresh(&indexer, &addresses(), &CancellationToken::new(), t0() + Duration::seconds(90))
        .await
        .unwrap();
    assert_eq!(report.confirmed.len(), 1);
    assert_eq!(store.positions()[0].status, PositionStatus::Confirmed);
}

#[tokio::test]
async fn test_withdraw_confirmed_when_units_drop() {
    let indexer = FakeIndexer::default();
    indexer
        .members
        .lock()
        .insert("thor1abc".to_string(), vec![member("BTC.BTC", 100, 1_600_000_000)]);
    let store = positions();
    let cancel = CancellationToken::new();
    store.refresh(&indexer, &addresses(), &cancel, t0()).await.unwrap();

    let entry = store.mark_pending("thor1abc", "BTC.BTC", "TX2", PendingAction::Withdraw, t0());
    assert_eq!(entry.units_at_submission, Some(100));

    let report = store.reconcile(&indexer, &cancel, t0()).await.unwrap();
    assert!(report.confirmed.is_empty());

    indexer
        .members
        .lock()
        .insert("thor1abc".to_string(), vec![member("BTC.BTC", 40, 1_600_000_000)]);
    let report = store.refresh(&indexer, &addresses(), &cancel, t0()).await.unwrap();
    assert_eq!(report.confirmed.len(), 1);
}

#[tokio::test]
async fn test_withdraw_confirmed_when_pool_gone() {
    let indexer = FakeIndexer::default();
    indexer
        .members
        .lock()
        .insert("thor1abc".to_string(), vec![member("BTC.BTC", 100, 1_600_000_000)]);
    let store = positions();
    let cancel = CancellationToken::new();
    store.refresh(&indexer, &addresses(), &cancel, t0()).await.unwrap();
    store.mark_pending("thor1abc", "BTC.BTC", "TX2", PendingAction::Withdraw, t0());

    indexer.members.lock().clear();
    let report = store.refresh(&indexer, &addresses(), &cancel, t0()).await.unwrap();

    assert_eq!(report.confirmed.len(), 1);
    assert!(store.positions().is_empty());
}

#[tokio::test]
async fn test_withdraw_without_snapshot_stays_pending() {
    let indexer = FakeIndexer::default();
    let store = positions();
    let cancel = CancellationToken::new();

    // Marked before any refresh, tx unknown to the node
    let entry = store.mark_pending("thor1abc", "BTC.BTC", "TXW", PendingAction::Withdraw, t0());
    assert_eq!(entry.units_at_submission, None);

    let report = store.reconcile(&indexer, &cancel, t0()).await.unwrap();
    assert!(report.confirmed.is_empty());
    assert_eq!(report.still_pending, 1);

    let report = store.refresh(&indexer, &addresses(), &cancel, t0()).await.unwrap();
    assert!(report.confirmed.is_empty());
    assert_eq!(store.pending().len(), 1);
}

#[tokio::test]
async fn test_withdraw_not_confirmed_by_other_address_refresh() {
    let indexer = FakeIndexer::default();
    indexer
        .members
        .lock()
        .insert("thor1bob".to_string(), vec![member("BTC.BTC", 100, 1_600_000_000)]);
    let store = positions();
    let cancel = CancellationToken::new();
    store
        .refresh(&indexer, &["thor1bob".to_string()], &cancel, t0())
        .await
        .unwrap();
    store.mark_pending("thor1bob", "BTC.BTC", "TXB", PendingAction::Withdraw, t0());

    // Bob's membership disappears, but only alice is refreshed
    indexer.members.lock().clear();
    let report = store
        .refresh(&indexer, &["thor1alice".to_string()], &cancel, t0())
        .await
        .unwrap();

    assert!(report.confirmed.is_empty());
    assert_eq!(store.pending()[0].tx_id, "TXB");
    assert_eq!(store.positions_for("thor1bob").len(), 1);
}

#[tokio::test]
async fn test_stale_pending_expires_after_ttl() {
    let indexer = FakeIndexer::default();
    let store = positions();
    store.mark_pending("thor1abc", "BTC.BTC", "TX1", PendingAction::Deposit, t0());

    let report = store
        .reconcile(
            &indexer,
            &CancellationToken::new(),
            t0() + Duration::seconds(TTL_SECS as i64 - 1),
        )
        .await
        .unwrap();
    assert!(report.expired.is_empty());

    let report = store
        .reconcile(
            &indexer,
            &CancellationToken::new(),
            t0() + Duration::seconds(TTL_SECS as i64),
        )
        .await
        .unwrap();
    assert_eq!(report.expired.len(), 1);
    assert!(store.positions().is_empty());
}

#[tokio::test]
async fn test_newer_submission_replaces_older() {
    let store = positions();

    store.mark_pending("thor1abc", "BTC.BTC", "TX1", PendingAction::Deposit, t0());
    store.mark_pending("thor1abc", "BTC.BTC", "TX2", PendingAction::Deposit, t0());

    let pending = store.pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].tx_id, "TX2");
}

#[tokio::test]
async fn test_cancelled_refresh_keeps_state() {
    let indexer = FakeIndexer::default();
    let store = positions();
    store.mark_pending("thor1abc", "BTC.BTC", "TX1", PendingAction::Deposit, t0());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = store
        .refresh(&indexer, &addresses(), &cancel, t0() + Duration::days(1))
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(store.pending().len(), 1);
    assert_eq!(indexer.status_calls.load(Ordering::SeqCst), 0);
}
