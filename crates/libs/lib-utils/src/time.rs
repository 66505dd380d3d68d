//! # Time Utilities
//!
//! Utilities for time formatting and manipulation using chrono.

use chrono::{DateTime, Utc};

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Seconds since the Unix epoch, clamped at zero for pre-epoch times.
pub fn unix_secs(time: DateTime<Utc>) -> u64 {
    u64::try_from(time.timestamp()).unwrap_or(0)
}

/// Format time as RFC3339 string.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_secs_and_format() {
        let time = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(unix_secs(time), 1_704_067_200);
        assert_eq!(format_time(time), "2024-01-01T00:00:00+00:00");

        let before_epoch = DateTime::from_timestamp(-5, 0).unwrap();
        assert_eq!(unix_secs(before_epoch), 0);
    }
}
