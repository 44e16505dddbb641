use atlantis_common::constants::{DEFAULT_GAS_LIMIT, GWEI};
use atlantis_config::parse_url_arg;
use clap::Parser;
use derive_builder::Builder;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Publish the packed resource attributes of every minted parcel",
    override_usage = "atlantis land-data [OPTIONS]"
)]
/// Arguments for the land-data operation
pub struct LandDataArgs {
    /// The resource list the attributes are read from.
    #[clap(long, default_value = "resource.json")]
    pub resources: String,

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

    /// The land contract, enumerated for token ids. Defaults to the configured `land_address`.
    #[clap(long, default_value = "", hide_default_value = true)]
    pub land_address: String,

    /// The land data contract. Defaults to the configured `land_data_address`.
    #[clap(long, default_value = "", hide_default_value = true)]
    pub land_data_address: String,

    /// The maximum number of tokens to enumerate.
    #[clap(long, default_value_t = 300)]
    pub count: u64,

    /// Gas price, in wei.
    #[clap(long, default_value_t = 6 * GWEI)]
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

impl LandDataArgsBuilder {
    /// Creates a new LandDataArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            resources: Some(String::from("resource.json")),
            rpc_url: Some(String::new()),
            private_key: Some(String::new()),
            land_address: Some(String::new()),
            land_data_address: Some(String::new()),
            count: Some(300),
            gas_price: Some(6 * GWEI),
            gas_limit: Some(DEFAULT_GAS_LIMIT),
            nonce: Some(None),
            dry_run: Some(false),
            keep_going: Some(false),
            output: Some(String::from("output")),
            name: Some(String::new()),
        }
    }
}
