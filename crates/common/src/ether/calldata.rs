//! Hand-assembled EVM calldata: selectors, 32-byte argument words and full payloads.

use std::{fmt, str::FromStr};

use alloy::primitives::{keccak256, Address, Bytes, I256, U256};
use serde::{Serialize, Serializer};

use crate::{
    constants::{ADDRESS_REGEX, DECIMAL_REGEX, HEX_INTEGER_REGEX, SELECTOR_REGEX},
    utils::strings::{decode_hex, encode_hex, strip_hex_marker},
    Error,
};

/// The leading 4 bytes of a call payload, identifying the function to invoke.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector([u8; 4]);

impl Selector {
    /// Parse a selector from 8 hex characters, with or without the `0x` marker.
    pub fn from_hex(selector: &str) -> Result<Self, Error> {
        if !SELECTOR_REGEX.is_match(selector).unwrap_or(false) {
            return Err(Error::InvalidSelector(selector.to_string()));
        }

        let bytes =
            decode_hex(selector).map_err(|_| Error::InvalidSelector(selector.to_string()))?;
        let mut out = [0u8; 4];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }

    /// Derive a selector from a canonical function signature, e.g. `transfer(address,uint256)`.
    pub fn from_signature(signature: &str) -> Self {
        let hash = keccak256(signature.as_bytes());
        let mut out = [0u8; 4];
        out.copy_from_slice(&hash[..4]);
        Self(out)
    }

    /// The raw selector bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_hex(&self.0))
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector(0x{self})")
    }
}

/// One encoded, 32-byte big-endian argument. Displays as exactly 64 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word([u8; 32]);

impl Word {
    /// The raw word bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<U256> for Word {
    fn from(value: U256) -> Self {
        Self(value.to_be_bytes::<32>())
    }
}

impl From<I256> for Word {
    fn from(value: I256) -> Self {
        Self::from(twos_complement(value))
    }
}

impl From<Address> for Word {
    fn from(address: Address) -> Self {
        let mut out = [0u8; 32];
        out[12..].copy_from_slice(address.as_slice());
        Self(out)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_hex(&self.0))
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word(0x{self})")
    }
}

/// `(2^256 + value) mod 2^256`, the raw two's-complement bits of a signed word.
fn twos_complement(value: I256) -> U256 {
    if value.is_negative() {
        U256::ZERO.wrapping_sub(value.unsigned_abs())
    } else {
        value.unsigned_abs()
    }
}

/// Parse an unsigned integer literal (decimal, or hex with a `0x` marker) into a [`U256`].
pub fn parse_uint256(value: &str) -> Result<U256, Error> {
    let value = value.trim();

    if HEX_INTEGER_REGEX.is_match(value).unwrap_or(false) {
        return U256::from_str_radix(strip_hex_marker(value), 16)
            .map_err(|_| Error::ValueOutOfRange(value.to_string()));
    }
    if !DECIMAL_REGEX.is_match(value).unwrap_or(false) {
        return Err(Error::InvalidInteger(value.to_string()));
    }

    let (negative, digits) = split_sign(value);
    if negative && !is_zero_literal(digits) {
        return Err(Error::ValueOutOfRange(value.to_string()));
    }

    U256::from_str_radix(digits, 10).map_err(|_| Error::ValueOutOfRange(value.to_string()))
}

/// Parse a signed decimal integer literal into an [`I256`], rejecting anything outside
/// `[-2^255, 2^255)`.
pub fn parse_int256(value: &str) -> Result<I256, Error> {
    let value = value.trim();
    if !DECIMAL_REGEX.is_match(value).unwrap_or(false) {
        return Err(Error::InvalidInteger(value.to_string()));
    }

    let (negative, digits) = split_sign(value);
    let magnitude = U256::from_str_radix(digits, 10)
        .map_err(|_| Error::ValueOutOfRange(value.to_string()))?;

    let limit = U256::from(1u64) << 255;
    let in_range = if negative { magnitude <= limit } else { magnitude < limit };
    if !in_range {
        return Err(Error::ValueOutOfRange(value.to_string()));
    }

    let raw = if negative { U256::ZERO.wrapping_sub(magnitude) } else { magnitude };
    Ok(I256::from_raw(raw))
}

fn split_sign(value: &str) -> (bool, &str) {
    match value.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, value),
    }
}

fn is_zero_literal(digits: &str) -> bool {
    digits.chars().all(|c| c == '0')
}

/// Encode a non-negative integer literal as a 64-character, zero-padded hex word.
///
/// ```
/// use atlantis_common::ether::calldata::encode_uint256;
///
/// let word = encode_uint256("255").expect("in range");
/// assert_eq!(word.to_string(), format!("{}ff", "0".repeat(62)));
/// ```
pub fn encode_uint256(value: &str) -> Result<Word, Error> {
    parse_uint256(value).map(Word::from)
}

/// Encode a signed integer literal as its 64-character two's-complement hex word.
///
/// ```
/// use atlantis_common::ether::calldata::encode_int256;
///
/// let word = encode_int256("-1").expect("in range");
/// assert_eq!(word.to_string(), "f".repeat(64));
/// ```
pub fn encode_int256(value: &str) -> Result<Word, Error> {
    parse_int256(value).map(Word::from)
}

/// Encode a 20-byte hex address (with or without `0x`) as a zero-padded word.
pub fn encode_address(address: &str) -> Result<Word, Error> {
    parse_address(address).map(Word::from)
}

/// Parse a 20-byte hex address, with or without `0x`. Checksums are not enforced.
pub fn parse_address(address: &str) -> Result<Address, Error> {
    let address = address.trim();
    if !ADDRESS_REGEX.is_match(address).unwrap_or(false) {
        return Err(Error::InvalidAddress(address.to_string()));
    }

    let bytes = decode_hex(address).map_err(|_| Error::InvalidAddress(address.to_string()))?;
    Ok(Address::from_slice(&bytes))
}

/// Concatenate a selector and already-encoded words into a `0x`-prefixed call payload.
///
/// ```
/// use atlantis_common::ether::calldata::{build_payload, encode_uint256};
///
/// let words = [encode_uint256("1").expect("ok"), encode_uint256("2").expect("ok")];
/// let payload = build_payload("0xa9059cbb", &words).expect("valid selector");
/// assert_eq!(payload.len(), 2 + 8 + 2 * 64);
/// ```
pub fn build_payload(selector: &str, args: &[Word]) -> Result<String, Error> {
    let selector = Selector::from_hex(selector)?;
    Ok(Payload::new(selector, args.to_vec()).to_string())
}

/// A complete call payload: selector followed by one word per argument.
#[derive(Clone, PartialEq, Eq)]
pub struct Payload {
    selector: Selector,
    words: Vec<Word>,
}

impl Payload {
    /// Create a payload from a selector and ordered argument words.
    pub fn new(selector: Selector, words: Vec<Word>) -> Self {
        Self { selector, words }
    }

    /// The payload's selector.
    pub fn selector(&self) -> Selector {
        self.selector
    }

    /// The payload's argument words, in order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Total length in bytes, always `4 + 32 * words`.
    pub fn len(&self) -> usize {
        4 + 32 * self.words.len()
    }

    /// Whether the payload carries no arguments.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The raw payload bytes, suitable for a transaction's `data` field.
    pub fn to_bytes(&self) -> Bytes {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(self.selector.as_bytes());
        for word in &self.words {
            out.extend_from_slice(word.as_bytes());
        }
        Bytes::from(out)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.selector)?;
        for word in &self.words {
            write!(f, "{word}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Payload({self})")
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fluent assembly of a [`Payload`] from typed arguments.
///
/// ```
/// use alloy::primitives::{Address, I256, U256};
/// use atlantis_common::ether::calldata::{CalldataBuilder, Selector};
///
/// let payload = CalldataBuilder::new(Selector::from_signature("f(int256,uint256,address)"))
///     .int256(I256::MINUS_ONE)
///     .uint256(U256::from(7))
///     .address(Address::ZERO)
///     .build();
/// assert_eq!(payload.len(), 4 + 3 * 32);
/// ```
#[derive(Clone, Debug)]
pub struct CalldataBuilder {
    selector: Selector,
    words: Vec<Word>,
}

impl CalldataBuilder {
    /// Start a payload for the given selector.
    pub fn new(selector: Selector) -> Self {
        Self { selector, words: Vec::new() }
    }

    /// Start a payload from a hex selector, failing with [`Error::InvalidSelector`].
    pub fn from_hex_selector(selector: &str) -> Result<Self, Error> {
        Selector::from_hex(selector).map(Self::new)
    }

    /// Append an unsigned 256-bit argument.
    pub fn uint256(mut self, value: U256) -> Self {
        self.words.push(Word::from(value));
        self
    }

    /// Append a signed 256-bit argument.
    pub fn int256(mut self, value: I256) -> Self {
        self.words.push(Word::from(value));
        self
    }

    /// Append an address argument.
    pub fn address(mut self, value: Address) -> Self {
        self.words.push(Word::from(value));
        self
    }

    /// Append an already-encoded word.
    pub fn word(mut self, word: Word) -> Self {
        self.words.push(word);
        self
    }

    /// Finish the payload.
    pub fn build(self) -> Payload {
        Payload::new(self.selector, self.words)
    }
}

/// Read the `index`-th 32-byte word of `data` as an unsigned integer.
pub fn decode_uint256_word(data: &[u8], index: usize) -> Result<U256, Error> {
    let start = index * 32;
    let word = data.get(start..start + 32).ok_or_else(|| {
        Error::MalformedReturnData(format!(
            "expected at least {} bytes, got {}",
            start + 32,
            data.len()
        ))
    })?;

    Ok(U256::from_be_slice(word))
}

/// Read the `index`-th 32-byte word of `data` as a two's-complement signed integer.
pub fn decode_int256_word(data: &[u8], index: usize) -> Result<I256, Error> {
    decode_uint256_word(data, index).map(I256::from_raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uint256_zero_and_max() {
        assert_eq!(encode_uint256("0").expect("ok").to_string(), "0".repeat(64));
        assert_eq!(
            encode_uint256(&U256::MAX.to_string()).expect("ok").to_string(),
            "f".repeat(64)
        );
    }

    #[test]
    fn test_encode_uint256_ether_scaled_price() {
        // 6000 * 10^18 == 0x14542ba12a337c00000
        let word = encode_uint256("6000000000000000000000").expect("ok").to_string();
        assert_eq!(word.len(), 64);
        assert_eq!(word, format!("{}14542ba12a337c00000", "0".repeat(64 - 19)));
    }

    #[test]
    fn test_encode_uint256_accepts_hex_literal() {
        assert_eq!(
            encode_uint256("0xff").expect("ok"),
            encode_uint256("255").expect("ok")
        );
    }

    #[test]
    fn test_encode_uint256_out_of_range() {
        // 2^256
        let too_big =
            "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(matches!(encode_uint256(too_big), Err(Error::ValueOutOfRange(_))));
        assert!(matches!(encode_uint256("-1"), Err(Error::ValueOutOfRange(_))));
        assert!(matches!(
            encode_uint256(&format!("0x1{}", "0".repeat(64))),
            Err(Error::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_encode_uint256_negative_zero_is_zero() {
        assert_eq!(encode_uint256("-0").expect("ok").to_string(), "0".repeat(64));
    }

    #[test]
    fn test_encode_uint256_invalid_literal() {
        assert!(matches!(encode_uint256("12a"), Err(Error::InvalidInteger(_))));
        assert!(matches!(encode_uint256(""), Err(Error::InvalidInteger(_))));
    }

    #[test]
    fn test_uint256_decodes_back() {
        let max = U256::MAX.to_string();
        for literal in ["0", "1", "4096", "6000000000000000000000", max.as_str()] {
            let word = encode_uint256(literal).expect("ok");
            let decoded = decode_uint256_word(word.as_bytes(), 0).expect("one word");
            assert_eq!(decoded.to_string(), literal);
        }
    }

    #[test]
    fn test_encode_int256_minus_one() {
        assert_eq!(encode_int256("-1").expect("ok").to_string(), "f".repeat(64));
    }

    #[test]
    fn test_encode_int256_negative_coordinates() {
        assert_eq!(
            encode_int256("-112").expect("ok").to_string(),
            format!("{}90", "f".repeat(62))
        );
        // magnitudes sitting exactly on powers of 16
        assert_eq!(
            encode_int256("-16").expect("ok").to_string(),
            format!("{}f0", "f".repeat(62))
        );
        assert_eq!(
            encode_int256("-256").expect("ok").to_string(),
            format!("{}f00", "f".repeat(61))
        );
    }

    #[test]
    fn test_encode_int256_matches_raw_twos_complement() {
        for literal in ["-1", "-22", "-68", "-4096", "-65535", "0", "22", "4096"] {
            let parsed = I256::from_dec_str(literal).expect("valid literal");
            assert_eq!(
                encode_int256(literal).expect("ok"),
                Word::from(parsed.into_raw()),
                "literal {literal}"
            );
        }
    }

    #[test]
    fn test_int256_bounds() {
        let min = I256::MIN.to_string();
        let max = I256::MAX.to_string();

        let min_word = encode_int256(&min).expect("min fits");
        assert_eq!(min_word.to_string(), format!("8{}", "0".repeat(63)));
        assert_eq!(decode_int256_word(min_word.as_bytes(), 0).expect("ok"), I256::MIN);

        let max_word = encode_int256(&max).expect("max fits");
        assert_eq!(max_word.to_string(), format!("7{}", "f".repeat(63)));

        // 2^255 and -(2^255 + 1)
        let over =
            "57896044618658097711785492504343953926634992332820282019728792003956564819968";
        assert!(matches!(encode_int256(over), Err(Error::ValueOutOfRange(_))));
        assert!(matches!(
            encode_int256(
                "-57896044618658097711785492504343953926634992332820282019728792003956564819969"
            ),
            Err(Error::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn test_int256_decodes_back() {
        for literal in ["-112", "-1", "0", "1", "22", "-22"] {
            let word = encode_int256(literal).expect("ok");
            let decoded = decode_int256_word(word.as_bytes(), 0).expect("one word");
            assert_eq!(decoded.to_string(), literal);
        }
    }

    #[test]
    fn test_encode_address() {
        let word = encode_address("0xDA7FAB79BFD0A27F04367F5B9B9348CB5D1B0023").expect("ok");
        assert_eq!(
            word.to_string(),
            "000000000000000000000000da7fab79bfd0a27f04367f5b9b9348cb5d1b0023"
        );
        assert_eq!(
            encode_address("da7fab79bfd0a27f04367f5b9b9348cb5d1b0023").expect("ok"),
            word
        );
    }

    #[test]
    fn test_encode_address_rejects_malformed() {
        assert!(matches!(
            encode_address("0xda7fab79bfd0a27f04367f5b9b9348cb5d1b002"),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(
            encode_address("0xda7fab79bfd0a27f04367f5b9b9348cb5d1b00230"),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(
            encode_address("0xzz7fab79bfd0a27f04367f5b9b9348cb5d1b0023"),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(
            encode_address("0XDA7FAB79BFD0A27F04367F5B9B9348CB5D1B0023"),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(Selector::from_hex("0X6bd50a14"), Err(Error::InvalidSelector(_))));
        assert!(parse_uint256("0X10").is_err());
    }

    #[test]
    fn test_build_payload_length() {
        let words = [encode_uint256("1").expect("ok"), encode_int256("-1").expect("ok")];
        let payload = build_payload("6e3630a8", &words).expect("valid selector");

        assert!(payload.starts_with("0x6e3630a8"));
        assert_eq!(payload.trim_start_matches("0x").len(), 8 + 2 * 64);
    }

    #[test]
    fn test_build_payload_invalid_selector() {
        for selector in ["", "0x", "0x123", "0x6e3630a8ff", "0xzzzzzzzz"] {
            assert!(
                matches!(build_payload(selector, &[]), Err(Error::InvalidSelector(_))),
                "selector {selector:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_selector_from_signature() {
        assert_eq!(Selector::from_signature("transfer(address,uint256)").to_string(), "a9059cbb");
        assert_eq!(Selector::from_signature("balanceOf(address)").to_string(), "70a08231");
        assert_eq!(Selector::from_signature("totalSupply()").to_string(), "18160ddd");
    }

    #[test]
    fn test_payload_bytes_match_display() {
        let payload = CalldataBuilder::from_hex_selector("0x6bd50a14")
            .expect("valid selector")
            .int256(I256::try_from(-112i64).expect("fits"))
            .int256(I256::try_from(22i64).expect("fits"))
            .address(Address::ZERO)
            .build();

        assert_eq!(payload.len(), 4 + 3 * 32);
        assert_eq!(format!("0x{}", encode_hex(&payload.to_bytes())), payload.to_string());
    }

    #[test]
    fn test_decode_word_short_data() {
        assert!(matches!(decode_uint256_word(&[0u8; 31], 0), Err(Error::MalformedReturnData(_))));
        assert!(matches!(decode_uint256_word(&[0u8; 32], 1), Err(Error::MalformedReturnData(_))));
    }
}
