//! # Core Library
//!
//! Errors, configuration, and the static chain/asset/wallet model shared by
//! the clients and the dashboard.

pub mod asset;
pub mod chain;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use asset::{Asset, AssetKind};
pub use chain::{Chain, InjectionPoint, WalletKind};
pub use config::Config;
pub use error::{AppError, Result};
