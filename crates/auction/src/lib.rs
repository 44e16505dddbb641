//! The auction module opens the genesis auctions: one `createAuction` on the genesis holder per
//! eligible parcel, with staggered start times.

/// Error types for the auction module
pub mod error;

mod core;
mod interfaces;

// re-export the public interface
pub use core::{auction, auction_with_client, AuctionTerms};
pub use error::Error;
pub use interfaces::{AuctionArgs, AuctionArgsBuilder};
