//! # Shared Utility Functions
//!
//! ## Amount Encoding
//!
//! THORChain services encode amounts as decimal strings in 1e8 base units
//! (`"150000000"` is 1.5 units). The modules below are `#[serde(with = ...)]`
//! adapters that accept either a string or a bare JSON number:
//! - [`amount_str`] - `u128` base units
//! - [`opt_amount_str`] - `Option<u128>` base units
//! - [`decimal_str`] - `f64` prices and rates
//!
//! ## Address Formatting
//!
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`truncate_address`] - `format_address` with default parameters
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";
//! assert_eq!(format_address(address, 6, 4), "0x742d...f44e");
//! ```

use serde::Deserialize;

/// Number of decimal places in THORChain base units.
pub const BASE_DECIMALS: u32 = 8;

/// 1e8, one whole unit expressed in base units.
pub const ONE_UNIT: u128 = 100_000_000;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Str(String),
    Int(u64),
    Float(f64),
}

impl RawNumber {
    fn into_u128(self) -> Result<u128, String> {
        match self {
            RawNumber::Str(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(0);
                }
                trimmed
                    .parse::<u128>()
                    .map_err(|e| format!("invalid amount {:?}: {}", s, e))
            }
            RawNumber::Int(n) => Ok(u128::from(n)),
            RawNumber::Float(f) if f >= 0.0 && f.fract() == 0.0 => Ok(f as u128),
            RawNumber::Float(f) => Err(format!("invalid amount {}", f)),
        }
    }

    fn into_f64(self) -> Result<f64, String> {
        match self {
            RawNumber::Str(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(0.0);
                }
                trimmed
                    .parse::<f64>()
                    .map_err(|e| format!("invalid decimal {:?}: {}", s, e))
            }
            RawNumber::Int(n) => Ok(n as f64),
            RawNumber::Float(f) => Ok(f),
        }
    }
}

pub mod amount_str {
    use super::RawNumber;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        RawNumber::deserialize(deserializer)?
            .into_u128()
            .map_err(de::Error::custom)
    }
}

pub mod opt_amount_str {
    use super::RawNumber;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<u128>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_some(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u128>, D::Error> {
        Option::<RawNumber>::deserialize(deserializer)?
            .map(RawNumber::into_u128)
            .transpose()
            .map_err(de::Error::custom)
    }
}

pub mod decimal_str {
    use super::RawNumber;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        RawNumber::deserialize(deserializer)?
            .into_f64()
            .map_err(de::Error::custom)
    }
}

/// Convert 1e8 base units to whole units for display and USD math.
pub fn base_to_units(amount: u128) -> f64 {
    amount as f64 / ONE_UNIT as f64
}

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh";
/// assert_eq!(format_address(addr, 4, 4), "bc1q...0wlh");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if address_len <= prefix_len + suffix_len
        || !address.is_char_boundary(prefix_len)
        || !address.is_char_boundary(address_len - suffix_len)
    {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format a wallet address with default 4-character prefix and suffix.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 4, 4)
}
