use fancy_regex::Regex;
use lazy_static::lazy_static;

/// One gwei, in wei.
pub const GWEI: u128 = 1_000_000_000;

/// Default gas limit for every genesis transaction.
pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;

/// `assignNewLand(int256,int256,address)` on the land contract.
pub const ASSIGN_NEW_LAND_SELECTOR: &str = "0x6bd50a14";

/// `createAuction(uint256,uint256,uint256,uint256,uint256,address)` on the genesis holder.
pub const CREATE_AUCTION_SELECTOR: &str = "0x6e3630a8";

/// `addLandPixel(uint256,uint256)` on the land data contract.
pub const ADD_LAND_PIXEL_SELECTOR: &str = "0x4d628d48";

/// Canonical signature of the land contract's coordinate encoder.
pub const ENCODE_TOKEN_ID_SIGNATURE: &str = "encodeTokenId(int256,int256)";

/// Canonical signature of the land contract's coordinate decoder.
pub const DECODE_TOKEN_ID_SIGNATURE: &str = "decodeTokenId(uint256)";

/// Canonical signature of the ERC-721 enumeration getter.
pub const TOKEN_BY_INDEX_SIGNATURE: &str = "tokenByIndex(uint256)";

lazy_static! {
    /// Matches a 20-byte hex address, with or without the `0x` marker
    pub static ref ADDRESS_REGEX: Regex = Regex::new(r"^(0x)?[0-9a-fA-F]{40}$").expect("failed to compile regex");

    /// Matches a 4-byte hex selector, with or without the `0x` marker
    pub static ref SELECTOR_REGEX: Regex = Regex::new(r"^(0x)?[0-9a-fA-F]{8}$").expect("failed to compile regex");

    /// Matches a (possibly negative) decimal integer literal
    pub static ref DECIMAL_REGEX: Regex = Regex::new(r"^-?[0-9]+$").expect("failed to compile regex");

    /// Matches a `0x`-prefixed hex integer literal
    pub static ref HEX_INTEGER_REGEX: Regex = Regex::new(r"^0x[0-9a-fA-F]+$").expect("failed to compile regex");
}
