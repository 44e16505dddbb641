//! The land domain: the genesis grid, per-parcel resource records, the attribute bit layout,
//! and typed wrappers for the land contract's read-only calls.

/// Error types for the land crate
pub mod error;

mod attributes;
mod contract;
mod coordinate;
mod ignore;
mod report;
mod resource;

pub use attributes::{FieldLayout, LAND_ATTRIBUTE_LAYOUT};
pub use contract::LandContract;
pub use coordinate::{Coordinate, Grid};
pub use error::Error;
pub use ignore::IgnoreList;
pub use report::{Report, SkipReason, Submission, SubmissionStatus};
pub use resource::{load_resources, parse_resources, LandRecord};
