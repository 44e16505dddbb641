pub mod calldata;
pub mod packing;
pub mod provider;
pub mod rpc;
pub mod submitter;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
