//! Common utilities, constants, and resources used across the atlantis toolkit.
//!
//! This crate provides the shared calldata encoder, the chain client used by every
//! genesis command, and general utility functions.

/// Error types for the common crate.
pub mod error;

/// Constants used throughout the atlantis codebase.
pub mod constants;

/// Utilities for interacting with Ethereum, including calldata encoding,
/// the chain client, and sequential transaction submission.
pub mod ether;

/// General utility functions and types for common tasks.
pub mod utils;

pub use error::Error;
