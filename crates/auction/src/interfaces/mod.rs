mod args;

pub use args::{AuctionArgs, AuctionArgsBuilder};
