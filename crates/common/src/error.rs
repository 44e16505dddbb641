//! Error types shared by the encoding layer and the chain client.

/// Errors raised while encoding calldata or talking to the chain.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The integer does not fit the target 256-bit type.
    #[error("value out of range: {0}")]
    ValueOutOfRange(String),

    /// The input is not an integer literal.
    #[error("invalid integer: {0}")]
    InvalidInteger(String),

    /// The input is not a well-formed 20-byte hex address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The selector is empty or not exactly 4 hex-encoded bytes.
    #[error("invalid selector: '{0}'")]
    InvalidSelector(String),

    /// A packed field's value does not fit within its declared bit width.
    #[error("field overflow: value {value} does not fit in {width} bits at offset {offset}")]
    FieldOverflow {
        /// The offending value, in decimal.
        value: String,
        /// The field's bit offset.
        offset: usize,
        /// The field's bit width.
        width: usize,
    },

    /// A packed field extends past bit 255 or has zero width.
    #[error("field out of bounds: {width} bits at offset {offset}")]
    FieldOutOfBounds {
        /// The field's bit offset.
        offset: usize,
        /// The field's bit width.
        width: usize,
    },

    /// Two packed fields claim the same bits.
    #[error("fields at offsets {0} and {1} overlap")]
    FieldOverlap(usize, usize),

    /// A contract call returned fewer words than its signature promises.
    #[error("malformed return data: {0}")]
    MalformedReturnData(String),

    /// The node executed a read-only call and it reverted.
    #[error("contract reverted: {0}")]
    ContractReverted(String),

    /// An error returned by the RPC provider.
    #[error("RPC error: {0}")]
    RpcError(String),

    /// A generic error with a message.
    #[error("Error: {0}")]
    Generic(String),
}
