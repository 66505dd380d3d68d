//! # Logging
//!
//! Structured logging through `tracing`, configured from the environment.
//!
//! Environment variables:
//! - `RUST_LOG`: filter directive (default `dashboard=info,lib_thorchain=info,warn`)
//! - `DASHBOARD_LOG_DIR`: also write a daily-rotated `dashboard.log` there
//! - `NO_COLOR`: disable ANSI colours on the console
//!
//! ```rust,no_run
//! let _guard = dashboard::debug::init();
//! tracing::info!(pools = 42, "Pools loaded");
//! ```

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::{init, init_with};
