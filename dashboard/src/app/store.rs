//! # App Store
//!
//! Single writer for [`AppState`]. The store is shared by `Arc`; consumers
//! read snapshots or watch the wallet, and every mutation goes through one of
//! the action methods below.
//!
//! ## Wallet lifecycle
//!
//! ```text
//! Disconnected --connect_wallet--> Connected
//! Connected --accountsChanged [a, ..]--> Connected (address = a)
//! Connected --accountsChanged []-----> Disconnected
//! Connected --networkChanged n-------> Connected (network = n)
//! Connected --disconnect / disconnect_wallet--> Disconnected
//! ```
//!
//! While connected the store holds one [`ProviderSubscription`] for the
//! wallet's own provider and one for the page global the wallet injects (when
//! that is a different object). Every wallet change drops the old guards
//! before new ones are registered, and rotates the wallet cancellation scope.

use chrono::Utc;
use lib_core::{AppError, Result};
use lib_utils::validate_address;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::state::{AppState, Modal, ProviderHandle, Toast, ToastLevel, WalletState, MAX_TOASTS};
use crate::services::subscription::same_provider;
use crate::services::{
    AddressBook, InjectedWallets, KnownAddress, Listener, ProviderEvent, ProviderSubscription,
};

pub struct AppStore {
    state: RwLock<AppState>,
    subscriptions: Mutex<Vec<ProviderSubscription>>,
    wallet_tx: watch::Sender<Option<WalletState>>,
    injected: Arc<InjectedWallets>,
    address_book: Arc<dyn AddressBook>,
    walletconnect_project_id: Option<String>,
    root: CancellationToken,
    wallet_scope: Mutex<CancellationToken>,
    next_toast_id: AtomicU64,
}

impl AppStore {
    pub fn new(
        address_book: Arc<dyn AddressBook>,
        injected: Arc<InjectedWallets>,
        walletconnect_project_id: Option<String>,
    ) -> Arc<Self> {
        let root = CancellationToken::new();
        let (wallet_tx, _) = watch::channel(None);
        Arc::new(Self {
            state: RwLock::new(AppState::default()),
            subscriptions: Mutex::new(Vec::new()),
            wallet_tx,
            injected,
            address_book,
            walletconnect_project_id,
            wallet_scope: Mutex::new(root.child_token()),
            root,
            next_toast_id: AtomicU64::new(1),
        })
    }

    // ----- Reads -----

    pub fn snapshot(&self) -> AppState {
        self.state.read().clone()
    }

    pub fn wallet(&self) -> Option<WalletState> {
        self.state.read().wallet.clone()
    }

    pub fn watch_wallet(&self) -> watch::Receiver<Option<WalletState>> {
        self.wallet_tx.subscribe()
    }

    pub fn known_addresses(&self) -> Vec<KnownAddress> {
        self.state.read().known_addresses.clone()
    }

    /// Token for requests tied to the current wallet. Cancelled when the
    /// wallet changes or the store shuts down.
    pub fn wallet_scope(&self) -> CancellationToken {
        self.wallet_scope.lock().clone()
    }

    /// Token for requests that live as long as the store.
    pub fn root_token(&self) -> CancellationToken {
        self.root.clone()
    }

    pub fn is_shut_down(&self) -> bool {
        self.root.is_cancelled()
    }

    /// Number of provider subscriptions currently held.
    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.lock().len()
    }

    // ----- Lifecycle -----

    /// Load remembered addresses. Returns how many were found.
    #[instrument(skip(self))]
    pub fn mount(&self) -> Result<usize> {
        let known = self.address_book.load()?;
        let count = known.len();
        let mut state = self.state.write();
        state.known_addresses = known;
        state.mounted = true;
        info!(known_addresses = count, "Store mounted");
        Ok(count)
    }

    /// Cancel everything started under the store and release subscriptions.
    pub fn shutdown(&self) {
        self.root.cancel();
        let released = std::mem::take(&mut *self.subscriptions.lock());
        drop(released);
        info!("Store shut down");
    }

    // ----- Wallet actions -----

    #[instrument(skip(self, wallet), fields(address = %wallet.address, kind = ?wallet.provider.kind))]
    pub fn connect_wallet(self: &Arc<Self>, wallet: WalletState) -> Result<()> {
        if self.is_shut_down() {
            return Err(AppError::Cancelled);
        }
        validate_address(&wallet.address).map_err(AppError::InvalidInput)?;
        if wallet.provider.kind.requires_project_id() && self.walletconnect_project_id.is_none() {
            return Err(AppError::Config(
                "WALLETCONNECT_PROJECT_ID is required for WalletConnect".to_string(),
            ));
        }

        let provider = wallet.provider.clone();
        {
            // Held across the state write so a concurrent disconnect cannot
            // interleave with the rebind
            let mut subscriptions = self.subscriptions.lock();
            self.state.write().wallet = Some(wallet);
            self.rebind(&mut subscriptions, &provider);
        }
        self.wallet_changed();
        info!("Wallet connected");
        Ok(())
    }

    /// Swap the provider behind the connected wallet, keeping address and
    /// network.
    pub fn swap_provider(self: &Arc<Self>, provider: ProviderHandle) -> Result<()> {
        {
            let mut subscriptions = self.subscriptions.lock();
            {
                let mut state = self.state.write();
                let wallet = state
                    .wallet
                    .as_mut()
                    .ok_or_else(|| AppError::InvalidInput("No wallet connected".to_string()))?;
                wallet.provider = provider.clone();
            }
            self.rebind(&mut subscriptions, &provider);
        }
        self.wallet_changed();
        info!(kind = ?provider.kind, "Wallet provider swapped");
        Ok(())
    }

    pub fn disconnect_wallet(&self) {
        let (previous, released) = {
            let mut subscriptions = self.subscriptions.lock();
            let previous = self.state.write().wallet.take();
            (previous, std::mem::take(&mut *subscriptions))
        };
        drop(released);

        if previous.is_some() {
            self.wallet_changed();
            info!("Wallet disconnected");
        }
    }

    /// Apply one provider event. Events arriving while disconnected are
    /// ignored.
    pub fn apply_provider_event(&self, event: ProviderEvent) {
        if self.state.read().wallet.is_none() {
            debug!(event = ?event.kind(), "Ignoring provider event while disconnected");
            return;
        }

        match event {
            ProviderEvent::AccountsChanged(accounts) => match accounts.into_iter().next() {
                None => {
                    debug!("Provider reported no accounts");
                    self.disconnect_wallet();
                }
                Some(address) => {
                    if let Err(reason) = validate_address(&address) {
                        warn!(%reason, "Provider reported an invalid account");
                        return;
                    }
                    let changed = self.update_wallet(|wallet| {
                        let changed = wallet.address != address;
                        wallet.address = address;
                        changed
                    });
                    if changed {
                        self.wallet_changed();
                        info!("Wallet account changed");
                    }
                }
            },
            ProviderEvent::NetworkChanged(network) => {
                let changed = self.update_wallet(|wallet| {
                    let changed = wallet.network != network;
                    wallet.network = network;
                    changed
                });
                if changed {
                    self.wallet_changed();
                    info!("Wallet network changed");
                }
            }
            ProviderEvent::Disconnect => self.disconnect_wallet(),
        }
    }

    /// Persist `entry` in the address book unless it is already known. The
    /// in-memory list only changes once the save succeeded.
    pub fn remember_address(&self, entry: KnownAddress) -> Result<bool> {
        let mut state = self.state.write();
        if state.known_addresses.iter().any(|known| known.same_as(&entry)) {
            return Ok(false);
        }
        let mut entries = state.known_addresses.clone();
        entries.push(entry);
        self.address_book.save(&entries)?;
        state.known_addresses = entries;
        Ok(true)
    }

    // ----- UI actions -----

    pub fn open_modal(&self, modal: Modal) {
        self.state.write().modal = Some(modal);
    }

    pub fn close_modal(&self) -> Option<Modal> {
        self.state.write().modal.take()
    }

    pub fn push_toast(&self, level: ToastLevel, message: impl Into<String>) -> u64 {
        let id = self.next_toast_id.fetch_add(1, Ordering::Relaxed);
        let mut state = self.state.write();
        state.toasts.push_back(Toast {
            id,
            level,
            message: message.into(),
            created_at: Utc::now(),
        });
        while state.toasts.len() > MAX_TOASTS {
            state.toasts.pop_front();
        }
        id
    }

    pub fn dismiss_toast(&self, id: u64) -> bool {
        let mut state = self.state.write();
        let before = state.toasts.len();
        state.toasts.retain(|t| t.id != id);
        state.toasts.len() != before
    }

    /// Surface `error`: transient failures become a toast, anything else sets
    /// the error boundary. Cancellations are not shown.
    pub fn report_error(&self, error: &AppError) {
        if error.is_cancelled() {
            debug!("Request cancelled");
            return;
        }
        if error.is_transient() {
            warn!(error = %error, "Transient failure");
            self.push_toast(ToastLevel::Error, error.user_message());
        } else {
            tracing::error!(error = %error, "Unrecoverable failure");
            self.state.write().error_boundary = Some(error.user_message());
        }
    }

    pub fn clear_error_boundary(&self) {
        self.state.write().error_boundary = None;
    }

    // ----- Internals -----

    fn update_wallet<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut WalletState) -> bool,
    {
        self.state.write().wallet.as_mut().map(f).unwrap_or(false)
    }

    fn wallet_changed(&self) {
        {
            let mut scope = self.wallet_scope.lock();
            scope.cancel();
            *scope = self.root.child_token();
        }
        self.wallet_tx.send_replace(self.wallet());
    }

    fn listener(self: &Arc<Self>) -> Listener {
        let store: Weak<AppStore> = Arc::downgrade(self);
        Arc::new(move |event: &ProviderEvent| {
            if let Some(store) = store.upgrade() {
                store.apply_provider_event(event.clone());
            }
        })
    }

    /// Replace all subscriptions with ones for `provider` and its injected
    /// global. The caller holds the subscriptions lock.
    fn rebind(
        self: &Arc<Self>,
        subscriptions: &mut Vec<ProviderSubscription>,
        provider: &ProviderHandle,
    ) {
        let previous = std::mem::take(subscriptions);
        drop(previous);

        let mut fresh = Vec::with_capacity(2);
        if let Some(events) = &provider.events {
            fresh.push(ProviderSubscription::subscribe(events.clone(), self.listener()));
        }

        let global = provider
            .kind
            .injection_point()
            .and_then(|point| self.injected.get(point));
        if let Some(global) = global {
            let duplicate = provider
                .events
                .as_ref()
                .is_some_and(|own| same_provider(own, &global));
            if !duplicate {
                fresh.push(ProviderSubscription::subscribe(global, self.listener()));
            }
        }

        if fresh.is_empty() {
            warn!(
                kind = ?provider.kind,
                "No event-capable provider; wallet changes require a manual refresh"
            );
        }
        *subscriptions = fresh;
    }
}

impl Drop for AppStore {
    fn drop(&mut self) {
        self.root.cancel();
    }
}
