//! # Shared Data Transfer Objects Library
//!
//! Wire types for every external service the dashboard talks to. Nothing in
//! here performs I/O; the clients in `lib-thorchain` own the requests and
//! deserialize into these types.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::midgard`]**: Pool lists, member positions, actions, stats
//!   - **[`dto::thornode`]**: Inbound addresses, network fees, transaction stages
//!   - **[`dto::rpc`]**: JSON-RPC envelopes and GraphQL balance payloads
//! - **[`utils`]**: Shared helpers
//!   - **[`utils::amount_str`]** / **[`utils::decimal_str`]**: string-encoded numbers
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!
//! ## Wire Format
//!
//! Midgard speaks camelCase JSON and encodes every amount as a decimal
//! string in 1e8 base units. Thornode uses snake_case and the same string
//! encoding. The serde helpers in [`utils`] turn those strings into `u128`
//! and `f64` so the rest of the workspace never handles raw strings.
//!
//! ```rust
//! use shared::dto::midgard::PoolDetail;
//!
//! let json = r#"{"asset":"BTC.BTC","assetDepth":"10","runeDepth":"1000","status":"available"}"#;
//! let pool: PoolDetail = serde_json::from_str(json).unwrap();
//! assert_eq!(pool.rune_depth, 1000);
//! ```

pub mod dto;
pub mod utils;

pub use dto::*;
pub use utils::*;
