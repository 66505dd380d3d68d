//! Wallet-side collaborators of the store: provider events, their scoped
//! subscriptions, injected globals and the address book.

pub mod address_book;
pub mod injected;
pub mod provider;
pub mod subscription;

pub use address_book::{AddressBook, JsonFileAddressBook, KnownAddress};
pub use injected::InjectedWallets;
pub use provider::{
    EventEmitter, EventProvider, Listener, ListenerId, ProviderEvent, ProviderEventKind,
};
pub use subscription::ProviderSubscription;
