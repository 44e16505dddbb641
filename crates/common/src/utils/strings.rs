use eyre::{bail, eyre, Result};
use std::fmt::Write;

/// Strips a single leading lowercase `0x` marker, if present.
///
/// ```
/// use atlantis_common::utils::strings::strip_hex_marker;
///
/// assert_eq!(strip_hex_marker("0xdeadbeef"), "deadbeef");
/// assert_eq!(strip_hex_marker("deadbeef"), "deadbeef");
/// ```
pub fn strip_hex_marker(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}

/// Decodes a hex string into a vector of bytes
///
/// ```
/// use atlantis_common::utils::strings::decode_hex;
///
/// let hex = "48656c6c6f20576f726c64"; // "Hello World" in hex
/// let result = decode_hex(hex).expect("should decode hex");
/// assert_eq!(result, vec![72, 101, 108, 108, 111, 32, 87, 111, 114, 108, 100]);
/// ```
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    // normalize
    let s = strip_hex_marker(s.trim());

    if s.is_empty() {
        return Ok(vec![]);
    }
    if s.len() % 2 != 0 {
        bail!("invalid hex string: odd length {}", s.len());
    }

    (0..s.len())
        .step_by(2)
        .map(|i| {
            s.get(i..i + 2)
                .ok_or_else(|| eyre!("invalid hex string: {}", s))
                .and_then(|pair| {
                    u8::from_str_radix(pair, 16).map_err(|_| eyre!("invalid hex string: {}", s))
                })
        })
        .collect()
}

/// Encodes a slice of bytes into a lowercase hex string, without the `0x` marker
///
/// ```
/// use atlantis_common::utils::strings::encode_hex;
///
/// let bytes = vec![72, 101, 108, 108, 111, 32, 87, 111, 114, 108, 100];
/// let result = encode_hex(&bytes);
/// assert_eq!(result, "48656c6c6f20576f726c64");
/// ```
pub fn encode_hex(s: &[u8]) -> String {
    s.iter().fold(String::with_capacity(s.len() * 2), |mut acc, b| {
        // writing to a String cannot fail
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex_with_marker() {
        assert_eq!(decode_hex("0x00ff10").expect("should decode"), vec![0x00, 0xff, 0x10]);
    }

    #[test]
    fn test_decode_hex_empty() {
        assert!(decode_hex("0x").expect("should decode").is_empty());
        assert!(decode_hex("").expect("should decode").is_empty());
    }

    #[test]
    fn test_decode_hex_rejects_odd_length() {
        assert!(decode_hex("0xabc").is_err());
    }

    #[test]
    fn test_decode_hex_rejects_non_hex() {
        assert!(decode_hex("zz").is_err());
    }

    #[test]
    fn test_encode_hex_lowercase() {
        assert_eq!(encode_hex(&[0xAB, 0x01]), "ab01");
    }

    #[test]
    fn test_strip_hex_marker_only_once() {
        assert_eq!(strip_hex_marker("0x0x12"), "0x12");
        // the upper-case marker is not a marker, matching the validation regexes
        assert_eq!(strip_hex_marker("0X12"), "0X12");
        assert!(decode_hex("0X12").is_err());
    }
}
