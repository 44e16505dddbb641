/// Error type for the land crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The index or coordinate lies outside the grid.
    #[error("out of bounds: {0}")]
    OutOfBounds(String),

    /// A coordinate string is not of the form `x,y`.
    #[error("invalid coordinate: '{0}'")]
    InvalidCoordinate(String),

    /// A resource or ignore-list file could not be read or parsed.
    #[error("resource file error: {0}")]
    ResourceFile(String),

    /// An encoding or chain error from the common crate.
    #[error(transparent)]
    Common(#[from] atlantis_common::Error),
}
