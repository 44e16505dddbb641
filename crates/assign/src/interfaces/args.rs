use atlantis_common::constants::{DEFAULT_GAS_LIMIT, GWEI};
use atlantis_config::parse_url_arg;
use clap::Parser;
use derive_builder::Builder;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Assign every genesis parcel to the beneficiary",
    override_usage = "atlantis assign [OPTIONS]"
)]
/// Arguments for the assign operation
///
/// Every record of the resource list becomes one `assignNewLand(x, y, beneficiary)`
/// transaction, in list order.
pub struct AssignArgs {
    /// The resource list whose order defines the parcels.
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

    /// The land contract. Defaults to the configured `land_address`.
    #[clap(long, default_value = "", hide_default_value = true)]
    pub land_address: String,

    /// The account that receives the parcels. Defaults to the configured `beneficiary`.
    #[clap(long, default_value = "", hide_default_value = true)]
    pub beneficiary: String,

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

impl AssignArgsBuilder {
    /// Creates a new AssignArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            resources: Some(String::from("resource.json")),
            rpc_url: Some(String::new()),
            private_key: Some(String::new()),
            land_address: Some(String::new()),
            beneficiary: Some(String::new()),
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
