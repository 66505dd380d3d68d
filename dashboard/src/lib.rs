//! # Yield Dashboard
//!
//! Application core of the cross-chain liquidity dashboard: the wallet/app
//! store with scoped provider subscriptions, the positions store with its
//! pending overlay, withdraw cost quoting and logging setup.
//!
//! Protocol access lives in `lib-thorchain`; this crate only depends on it
//! through [`core::IndexerService`].

pub mod app;
pub mod core;
pub mod debug;
pub mod services;

pub use app::{AppStore, PositionsStore};
pub use core::IndexerService;
