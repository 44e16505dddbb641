mod args;

pub use args::{AssignArgs, AssignArgsBuilder};
