//! # Data Transfer Objects (DTOs)
//!
//! ## Module Organization
//!
//! - [`midgard`] - Indexer responses (pools, members, actions, stats)
//! - [`thornode`] - Protocol node responses (inbound addresses, network, tx status)
//! - [`rpc`] - JSON-RPC request/response envelopes and GraphQL balance shapes
//!
//! ## Serialization Format
//!
//! - **Midgard**: camelCase field names, amounts as decimal strings
//! - **Thornode**: snake_case field names, amounts as decimal strings
//! - **Optional fields**: `#[serde(default)]` so older node versions still parse

pub mod midgard;
pub mod rpc;
pub mod thornode;

pub use midgard::*;
pub use rpc::*;
pub use thornode::*;
