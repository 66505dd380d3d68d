//! # Application Layer
//!
//! The app store (wallet, modals, toasts, error boundary), the positions
//! store with its pending overlay, and withdraw cost quoting.

pub mod positions;
pub mod state;
pub mod store;
pub mod withdraw;

#[cfg(test)]
mod tests;

pub use positions::{
    PendingAction, PendingEntry, Position, PositionStatus, PositionsStore, ReconcileReport,
};
pub use state::{AppState, Modal, ProviderHandle, Toast, ToastLevel, WalletState, MAX_TOASTS};
pub use store::AppStore;
pub use withdraw::{quote_withdraw_cost, WithdrawQuote};
