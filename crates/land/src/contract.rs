use alloy::primitives::{Address, U256};
use atlantis_common::{
    constants::{DECODE_TOKEN_ID_SIGNATURE, ENCODE_TOKEN_ID_SIGNATURE, TOKEN_BY_INDEX_SIGNATURE},
    ether::{
        calldata::{decode_int256_word, decode_uint256_word, CalldataBuilder, Selector},
        provider::ChainClient,
        rpc::call_with_retry,
    },
};
use tracing::trace;

use crate::{Coordinate, Error};

/// Read-only bindings for the land contract, which maps coordinates to token ids.
pub struct LandContract<'a> {
    client: &'a dyn ChainClient,
    address: Address,
}

impl std::fmt::Debug for LandContract<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LandContract").field("address", &self.address).finish_non_exhaustive()
    }
}

impl<'a> LandContract<'a> {
    /// Bind the land contract deployed at `address`.
    pub fn new(client: &'a dyn ChainClient, address: Address) -> Self {
        Self { client, address }
    }

    /// The contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// `encodeTokenId(x, y)`: the token id of the parcel at `coordinate`.
    pub async fn encode_token_id(&self, coordinate: Coordinate) -> Result<U256, Error> {
        let (x, y) = coordinate.to_int256()?;
        let payload = CalldataBuilder::new(Selector::from_signature(ENCODE_TOKEN_ID_SIGNATURE))
            .int256(x)
            .int256(y)
            .build();

        let output = call_with_retry(self.client, self.address, &payload.to_bytes()).await?;
        let token_id = decode_uint256_word(&output, 0)?;
        trace!("parcel {} has token id {:#x}", coordinate, token_id);

        Ok(token_id)
    }

    /// `decodeTokenId(tokenId)`: the coordinate of the parcel with `token_id`.
    pub async fn decode_token_id(&self, token_id: U256) -> Result<Coordinate, Error> {
        let payload = CalldataBuilder::new(Selector::from_signature(DECODE_TOKEN_ID_SIGNATURE))
            .uint256(token_id)
            .build();

        let output = call_with_retry(self.client, self.address, &payload.to_bytes()).await?;
        let x = decode_int256_word(&output, 0)?;
        let y = decode_int256_word(&output, 1)?;

        let malformed = || {
            atlantis_common::Error::MalformedReturnData(format!(
                "token {token_id:#x} decodes to an unrepresentable coordinate ({x}, {y})"
            ))
        };
        Ok(Coordinate {
            x: i64::try_from(x).map_err(|_| malformed())?,
            y: i64::try_from(y).map_err(|_| malformed())?,
        })
    }

    /// `tokenByIndex(index)`: the `index`-th minted land token. Reverts past the last token.
    pub async fn token_by_index(&self, index: u64) -> Result<U256, Error> {
        let payload = CalldataBuilder::new(Selector::from_signature(TOKEN_BY_INDEX_SIGNATURE))
            .uint256(U256::from(index))
            .build();

        let output = call_with_retry(self.client, self.address, &payload.to_bytes()).await?;
        Ok(decode_uint256_word(&output, 0)?)
    }
}
