/// Error type for the Core module
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from the assign command
    #[error("assign: {0}")]
    Assign(#[from] atlantis_assign::Error),
    /// Error from the auction command
    #[error("auction: {0}")]
    Auction(#[from] atlantis_auction::Error),
    /// Error from the land-data command
    #[error("land-data: {0}")]
    LandData(#[from] atlantis_land_data::Error),
    /// Error when loading the configuration
    #[error("config: {0}")]
    Config(#[from] atlantis_config::error::Error),
}
