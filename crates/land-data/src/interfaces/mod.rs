mod args;

pub use args::{LandDataArgs, LandDataArgsBuilder};
