use atlantis_common::constants::{DEFAULT_GAS_LIMIT, GWEI};
use atlantis_config::parse_url_arg;
use clap::Parser;
use derive_builder::Builder;

/// 6000 tokens with 18 decimals.
pub(crate) const DEFAULT_STARTING_PRICE: &str = "6000000000000000000000";

/// The first genesis auction opened at 2018-10-01 22:00:00 UTC.
pub(crate) const DEFAULT_START_TIME: &str = "2018-10-01 22:00:00";

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Create a genesis auction for every eligible parcel",
    override_usage = "atlantis auction [OPTIONS]"
)]
/// Arguments for the auction operation
///
/// Parcels marked special in the resource list, or listed in the ignore file, are skipped.
/// The auction of the `index`-th record starts `index * interval` seconds after `start_time`.
pub struct AuctionArgs {
    /// The resource list whose order defines the parcels.
    #[clap(long, default_value = "resource.json")]
    pub resources: String,

    /// Parcels that must not be auctioned, one `x,y` per line.
    #[clap(long, default_value = "resource-land-not-auction.txt")]
    pub ignore: String,

    /// The RPC URL to use for fetching data and sending transactions.
    /// This can be an explicit URL or a reference to a MESC endpoint.
    #[clap(long, short, value_parser = parse_url_arg, default_value = "", hide_default_value = true)]
    pub rpc_url: String,

    /// The hex private key transactions are signed with.
    #[clap(
        long,
        env = "ATLANTIS_PRIVATE_KEY",
        hide_env_values = true,
        default_value = "",
        hide_default_value = true
    )]
    pub private_key: String,

    /// The land contract, queried for token ids. Defaults to the configured `land_address`.
    #[clap(long, default_value = "", hide_default_value = true)]
    pub land_address: String,

    /// The genesis holder contract. Defaults to the configured `genesis_holder_address`.
    #[clap(long, default_value = "", hide_default_value = true)]
    pub genesis_holder_address: String,

    /// The token bids are paid in. Defaults to the configured `ring_token_address`.
    #[clap(long, default_value = "", hide_default_value = true)]
    pub ring_token_address: String,

    /// When the first auction starts: `YYYY-MM-DD HH:MM:SS` (UTC) or unix seconds.
    #[clap(long, default_value = DEFAULT_START_TIME)]
    pub start_time: String,

    /// Seconds between the start times of consecutive records.
    #[clap(long, default_value_t = 3600)]
    pub interval: u64,

    /// Starting price in the token's smallest unit, decimal or 0x-hex.
    #[clap(long, default_value = DEFAULT_STARTING_PRICE)]
    pub starting_price: String,

    /// Ending price in the token's smallest unit. Defaults to a fifth of the starting price.
    #[clap(long, default_value = "", hide_default_value = true)]
    pub ending_price: String,

    /// Auction duration, in seconds.
    #[clap(long, default_value_t = 6 * 3600)]
    pub duration: u64,

    /// Gas price, in wei.
    #[clap(long, default_value_t = 2 * GWEI)]
    pub gas_price: u128,

    /// Gas limit of every transaction.
    #[clap(long, default_value_t = DEFAULT_GAS_LIMIT)]
    pub gas_limit: u64,

    /// The nonce of the first transaction. Defaults to the sender's transaction count.
    #[clap(long)]
    pub nonce: Option<u64>,

    /// Build the payloads without signing or sending them.
    #[clap(long)]
    pub dry_run: bool,

    /// Record a failed parcel and continue with the next one instead of stopping.
    #[clap(long)]
    pub keep_going: bool,

    /// The output directory to write the report to or 'print' to print to the console
    #[clap(long = "output", short, default_value = "output", hide_default_value = true)]
    pub output: String,

    /// The name for the output file
    #[clap(long, short, default_value = "", hide_default_value = true)]
    pub name: String,
}

impl AuctionArgsBuilder {
    /// Creates a new AuctionArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            resources: Some(String::from("resource.json")),
            ignore: Some(String::from("resource-land-not-auction.txt")),
            rpc_url: Some(String::new()),
            private_key: Some(String::new()),
            land_address: Some(String::new()),
            genesis_holder_address: Some(String::new()),
            ring_token_address: Some(String::new()),
            start_time: Some(String::from(DEFAULT_START_TIME)),
            interval: Some(3600),
            starting_price: Some(String::from(DEFAULT_STARTING_PRICE)),
            ending_price: Some(String::new()),
            duration: Some(6 * 3600),
            gas_price: Some(2 * GWEI),
            gas_limit: Some(DEFAULT_GAS_LIMIT),
            nonce: Some(None),
            dry_run: Some(false),
            keep_going: Some(false),
            output: Some(String::from("output")),
            name: Some(String::new()),
        }
    }
}
