//! Providers that wallets inject as page globals (`window.ethereum`,
//! `window.xfi`, `window.phantom`). The dashboard only looks them up; the
//! wallets own them.

use lib_core::InjectionPoint;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::provider::EventProvider;

#[derive(Default)]
pub struct InjectedWallets {
    globals: RwLock<HashMap<InjectionPoint, Arc<dyn EventProvider>>>,
}

impl InjectedWallets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install (or replace) the provider behind `point`.
    pub fn inject(&self, point: InjectionPoint, provider: Arc<dyn EventProvider>) {
        tracing::debug!(global = point.global_name(), provider = provider.name(), "Provider injected");
        self.globals.write().insert(point, provider);
    }

    pub fn remove(&self, point: InjectionPoint) -> Option<Arc<dyn EventProvider>> {
        self.globals.write().remove(&point)
    }

    pub fn get(&self, point: InjectionPoint) -> Option<Arc<dyn EventProvider>> {
        self.globals.read().get(&point).cloned()
    }

    pub fn is_injected(&self, point: InjectionPoint) -> bool {
        self.globals.read().contains_key(&point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::provider::EventEmitter;

    #[test]
    fn test_inject_and_lookup() {
        let injected = InjectedWallets::new();
        assert!(injected.get(InjectionPoint::Ethereum).is_none());

        injected.inject(InjectionPoint::Ethereum, Arc::new(EventEmitter::new("metamask")));
        assert_eq!(injected.get(InjectionPoint::Ethereum).unwrap().name(), "metamask");
        assert!(!injected.is_injected(InjectionPoint::Xfi));

        assert!(injected.remove(InjectionPoint::Ethereum).is_some());
        assert!(!injected.is_injected(InjectionPoint::Ethereum));
    }
}
