//! # Wallet Provider Events
//!
//! A wallet provider announces account and network changes through listeners.
//! [`EventProvider`] is the seam between the store and whatever wallet adapter
//! is connected; [`EventEmitter`] is the in-process implementation adapters
//! embed.

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderEventKind {
    AccountsChanged,
    NetworkChanged,
    Disconnect,
}

impl ProviderEventKind {
    pub const ALL: [ProviderEventKind; 3] = [
        ProviderEventKind::AccountsChanged,
        ProviderEventKind::NetworkChanged,
        ProviderEventKind::Disconnect,
    ];

    /// Event name as wallets emit it.
    pub fn event_name(&self) -> &'static str {
        match self {
            ProviderEventKind::AccountsChanged => "accountsChanged",
            ProviderEventKind::NetworkChanged => "networkChanged",
            ProviderEventKind::Disconnect => "disconnect",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// Accounts exposed by the wallet, active one first. Empty means locked.
    AccountsChanged(Vec<String>),
    NetworkChanged(String),
    Disconnect,
}

impl ProviderEvent {
    pub fn kind(&self) -> ProviderEventKind {
        match self {
            ProviderEvent::AccountsChanged(_) => ProviderEventKind::AccountsChanged,
            ProviderEvent::NetworkChanged(_) => ProviderEventKind::NetworkChanged,
            ProviderEvent::Disconnect => ProviderEventKind::Disconnect,
        }
    }
}

pub type Listener = Arc<dyn Fn(&ProviderEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Anything that can deliver provider events to registered listeners.
pub trait EventProvider: Send + Sync {
    /// Human-readable provider name for logs.
    fn name(&self) -> &str;

    fn add_listener(&self, kind: ProviderEventKind, listener: Listener) -> ListenerId;

    /// Returns `false` when `id` was not registered for `kind`.
    fn remove_listener(&self, kind: ProviderEventKind, id: ListenerId) -> bool;
}

struct Registration {
    kind: ProviderEventKind,
    id: ListenerId,
    listener: Listener,
}

/// Listener registry that dispatches events synchronously.
///
/// Listeners run outside the registry lock, so a listener may add or remove
/// listeners (including itself) while an event is being delivered.
pub struct EventEmitter {
    name: String,
    next_id: AtomicU64,
    listeners: Mutex<Vec<Registration>>,
}

impl EventEmitter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            next_id: AtomicU64::new(1),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Deliver `event` to every listener registered for its kind. Returns the
    /// number of listeners invoked.
    pub fn emit(&self, event: &ProviderEvent) -> usize {
        let kind = event.kind();
        let targets: Vec<Listener> = self
            .listeners
            .lock()
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.listener.clone())
            .collect();

        tracing::debug!(
            provider = %self.name,
            event = kind.event_name(),
            listeners = targets.len(),
            "Dispatching provider event"
        );

        for listener in &targets {
            listener(event);
        }
        targets.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl EventProvider for EventEmitter {
    fn name(&self) -> &str {
        &self.name
    }

    fn add_listener(&self, kind: ProviderEventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push(Registration { kind, id, listener });
        id
    }

    fn remove_listener(&self, kind: ProviderEventKind, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|r| !(r.kind == kind && r.id == id));
        listeners.len() != before
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("name", &self.name)
            .field("listeners", &self.listener_count())
            .finish()
    }
}
