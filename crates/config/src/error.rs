//! Error types for the configuration module

use mesc::MescError;

/// Errors that can occur during configuration operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A generic error with a message
    #[error("Error: {0}")]
    Generic(String),

    /// An error that occurred during parsing
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A key that the configuration does not have
    #[error("invalid key: '{0}' is not a valid configuration key")]
    InvalidKey(String),

    /// A value rejected for its key
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue {
        /// The key being set
        key: String,
        /// Why the value was rejected
        reason: String,
    },

    /// An error from the MESC (Multiple Endpoint Shared Configuration) system
    #[error("MESC error: {0}")]
    MescError(#[from] MescError),
}
