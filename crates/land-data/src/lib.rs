//! The land-data module walks the minted land tokens and publishes each parcel's packed
//! resource attributes to the land data contract with `addLandPixel(uint256,uint256)`.

/// Error types for the land-data module
pub mod error;

mod core;
mod interfaces;

// re-export the public interface
pub use core::{land_data, land_data_with_client};
pub use error::Error;
pub use interfaces::{LandDataArgs, LandDataArgsBuilder};
