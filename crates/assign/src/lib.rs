//! The assign module hands every genesis parcel to a beneficiary through the land contract's
//! `assignNewLand(int256,int256,address)`.

/// Error types for the assign module
pub mod error;

mod core;
mod interfaces;

// re-export the public interface
pub use core::{assign, assign_with_client};
pub use error::Error;
pub use interfaces::{AssignArgs, AssignArgsBuilder};
