//! Scoped provider subscription: registers one listener per event kind and
//! removes all of them when dropped.

use std::sync::Arc;
use tracing::debug;

use super::provider::{EventProvider, Listener, ListenerId, ProviderEventKind};

#[must_use = "listeners are removed as soon as the subscription is dropped"]
pub struct ProviderSubscription {
    provider: Arc<dyn EventProvider>,
    registered: Vec<(ProviderEventKind, ListenerId)>,
}

impl ProviderSubscription {
    /// Register `handler` for every [`ProviderEventKind`] on `provider`.
    pub fn subscribe(provider: Arc<dyn EventProvider>, handler: Listener) -> Self {
        let registered = ProviderEventKind::ALL
            .into_iter()
            .map(|kind| (kind, provider.add_listener(kind, handler.clone())))
            .collect();

        debug!(provider = provider.name(), "Subscribed to provider events");
        Self {
            provider,
            registered,
        }
    }

    pub fn is_for(&self, provider: &Arc<dyn EventProvider>) -> bool {
        same_provider(&self.provider, provider)
    }

    pub fn listener_count(&self) -> usize {
        self.registered.len()
    }
}

impl Drop for ProviderSubscription {
    fn drop(&mut self) {
        for (kind, id) in self.registered.drain(..) {
            if !self.provider.remove_listener(kind, id) {
                debug!(provider = self.provider.name(), %id, "Listener already removed");
            }
        }
        debug!(provider = self.provider.name(), "Unsubscribed from provider events");
    }
}

/// Identity comparison ignoring vtable metadata.
pub fn same_provider(a: &Arc<dyn EventProvider>, b: &Arc<dyn EventProvider>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
