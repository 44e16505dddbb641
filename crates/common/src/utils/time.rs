use chrono::NaiveDateTime;
use eyre::{eyre, Result};

/// The accepted human-readable timestamp layout.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a point in time into a unix timestamp (seconds).
///
/// Accepts either a plain unix timestamp or a `YYYY-MM-DD HH:MM:SS` string, which is
/// interpreted as UTC.
///
/// ```
/// use atlantis_common::utils::time::parse_timestamp;
///
/// assert_eq!(parse_timestamp("1538431200").expect("valid"), 1538431200);
/// assert_eq!(parse_timestamp("2018-10-01 22:00:00").expect("valid"), 1538431200);
/// ```
pub fn parse_timestamp(input: &str) -> Result<u64> {
    let input = input.trim();

    if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
        return input.parse::<u64>().map_err(|e| eyre!("invalid unix timestamp '{}': {}", input, e));
    }

    let datetime = NaiveDateTime::parse_from_str(input, TIMESTAMP_FORMAT).map_err(|e| {
        eyre!("invalid timestamp '{input}': {e} (expected '{TIMESTAMP_FORMAT}' or unix seconds)")
    })?;

    u64::try_from(datetime.and_utc().timestamp())
        .map_err(|_| eyre!("timestamp '{}' is before the unix epoch", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_datetime() {
        assert_eq!(parse_timestamp("1970-01-01 00:01:00").expect("valid"), 60);
    }

    #[test]
    fn test_parse_timestamp_trims() {
        assert_eq!(parse_timestamp("  42 ").expect("valid"), 42);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("2018/10/01").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_parse_timestamp_rejects_pre_epoch() {
        assert!(parse_timestamp("1969-12-31 23:59:59").is_err());
    }
}
