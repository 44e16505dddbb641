//! The Core module serves as the central integration point for the atlantis genesis commands.
//!
//! This module re-exports the public interfaces of the command crates and the land domain,
//! making it easier to drive a genesis run from other projects.

/// Error types for the core module
pub mod error;

// Re-export all command modules
pub use atlantis_assign;
pub use atlantis_auction;
pub use atlantis_land;
pub use atlantis_land_data;
