//! # Validation Utilities
//!
//! Input validation helpers.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate a wallet address string.
///
/// Chains disagree on address formats (hex, bech32, base58), so this only
/// rejects what no chain accepts: empty strings and anything outside ASCII
/// alphanumerics. A single `:` is allowed for cashaddr prefixes.
pub fn validate_address(address: &str) -> Result<(), String> {
    validate_not_empty(address, "Address")?;
    let body = address.split_once(':').map_or(address, |(_, rest)| rest);
    if !body.is_empty() && body.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(format!("Invalid address format: {}", address))
    }
}

/// Validate that a URL uses the http or https scheme.
pub fn validate_http_url(url: &str, field_name: &str) -> Result<(), String> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(format!("{} must be an http(s) URL", field_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_address() {
        assert!(validate_address("0xabc").is_ok());
        assert!(validate_address("bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh").is_ok());
        assert!(validate_address("").is_err());
        assert!(validate_address("0x abc").is_err());
        assert!(validate_address("bitcoincash:qpm2qsznhks23z7629mms6s4cwef74vcwvy22gdx6a").is_ok());
        assert!(validate_address("bitcoincash:").is_err());
    }

    #[test]
    fn test_validate_http_url() {
        assert!(validate_http_url("https://midgard.ninerealms.com", "MIDGARD_URL").is_ok());
        assert!(validate_http_url("ftp://x", "MIDGARD_URL").is_err());
    }
}
