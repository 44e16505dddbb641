pub(crate) mod error;
pub(crate) mod log_args;
pub(crate) mod output;

use error::Error;
use log_args::LogArgs;
use output::{build_output_path, report_filename};
use tracing::info;

use clap::{Parser, Subcommand};

use atlantis_common::utils::io::file::write_file;
use atlantis_config::{config, ConfigArgs, Configuration};
use atlantis_core::{
    atlantis_assign::{assign, AssignArgs},
    atlantis_auction::{auction, AuctionArgs},
    atlantis_land::Report,
    atlantis_land_data::{land_data, LandDataArgs},
};

#[derive(Debug, Parser)]
#[clap(name = "atlantis", version)]
pub struct Arguments {
    #[clap(subcommand)]
    pub sub: Subcommands,

    #[clap(flatten)]
    logs: LogArgs,
}

#[derive(Debug, Subcommand)]
#[clap(
    about = "Atlantis seeds the genesis land sale: assignment, auctions and land attributes."
)]
#[allow(clippy::large_enum_variant)]
pub enum Subcommands {
    #[clap(name = "assign", about = "Assign every genesis parcel to the beneficiary")]
    Assign(AssignArgs),

    #[clap(name = "auction", about = "Create a clock auction for every eligible genesis parcel")]
    Auction(AuctionArgs),

    #[clap(name = "land-data", about = "Publish the packed attributes of every minted parcel")]
    LandData(LandDataArgs),

    #[clap(name = "config", about = "Display and edit the current configuration")]
    Config(ConfigArgs),
}

/// fill `value` from the configuration when it was not given on the command line
fn or_configured(value: &mut String, configured: &str) {
    if value.is_empty() {
        *value = configured.to_string();
    }
}

/// write the report to its output path, or print it when `output` is `print`
async fn write_report(
    report: &Report,
    output: &str,
    rpc_url: &str,
    name: &str,
) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(report)?;

    if output == "print" {
        println!("{json}");
        return Ok(());
    }

    let output_path = build_output_path(output, rpc_url, &report_filename(name, &report.command))
        .await
        .map_err(|e| Error::Generic(format!("failed to build output path: {e}")))?;
    write_file(&output_path, &json)
        .map_err(|e| Error::Generic(format!("failed to write report: {e}")))?;
    info!("wrote {} report to '{}'", report.command, output_path);

    Ok(())
}

/// a run with failed entries still writes its report, but exits non-zero
fn check_report(report: &Report) -> Result<(), Error> {
    if report.has_failures() {
        return Err(Error::Generic(format!(
            "{} of {} {} entries failed",
            report.failed(),
            report.submissions.len(),
            report.command
        )));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Arguments::parse();

    // setup logging, holding the file writer's guard until exit
    let _guard = args.logs.init_tracing().map_err(|e| Error::Generic(e.to_string()))?;

    let configuration = Configuration::load().map_err(atlantis_core::error::Error::from)?;
    match args.sub {
        Subcommands::Assign(mut cmd) => {
            // if the user has not specified a value, use the configured one
            or_configured(&mut cmd.rpc_url, &configuration.rpc_url);
            or_configured(&mut cmd.land_address, &configuration.land_address);
            or_configured(&mut cmd.beneficiary, &configuration.beneficiary);

            let report = assign(cmd.clone()).await.map_err(atlantis_core::error::Error::from)?;

            write_report(&report, &cmd.output, &cmd.rpc_url, &cmd.name).await?;
            check_report(&report)?;
        }

        Subcommands::Auction(mut cmd) => {
            // if the user has not specified a value, use the configured one
            or_configured(&mut cmd.rpc_url, &configuration.rpc_url);
            or_configured(&mut cmd.land_address, &configuration.land_address);
            or_configured(&mut cmd.genesis_holder_address, &configuration.genesis_holder_address);
            or_configured(&mut cmd.ring_token_address, &configuration.ring_token_address);

            let report = auction(cmd.clone()).await.map_err(atlantis_core::error::Error::from)?;

            write_report(&report, &cmd.output, &cmd.rpc_url, &cmd.name).await?;
            check_report(&report)?;
        }

        Subcommands::LandData(mut cmd) => {
            // if the user has not specified a value, use the configured one
            or_configured(&mut cmd.rpc_url, &configuration.rpc_url);
            or_configured(&mut cmd.land_address, &configuration.land_address);
            or_configured(&mut cmd.land_data_address, &configuration.land_data_address);

            let report = land_data(cmd.clone()).await.map_err(atlantis_core::error::Error::from)?;

            write_report(&report, &cmd.output, &cmd.rpc_url, &cmd.name).await?;
            check_report(&report)?;
        }

        Subcommands::Config(cmd) => {
            config(cmd).map_err(|e| Error::Generic(format!("failed to configure: {e}")))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlantis_core::atlantis_land::{Submission, SubmissionStatus};

    #[test]
    fn test_or_configured() {
        let mut given = "http://localhost:8545".to_string();
        or_configured(&mut given, "https://configured");
        assert_eq!(given, "http://localhost:8545");

        let mut missing = String::new();
        or_configured(&mut missing, "https://configured");
        assert_eq!(missing, "https://configured");
    }

    #[test]
    fn test_check_report() {
        let mut report = Report::new("assign");
        report.push(Submission::new(0, SubmissionStatus::DryRun { nonce: 0 }));
        assert!(check_report(&report).is_ok());

        report.push(Submission::failed(1, "reverted"));
        assert!(check_report(&report).is_err());
    }

    #[test]
    fn test_parse_subcommands() {
        let args = Arguments::parse_from(["atlantis", "land-data", "--count", "10", "--dry-run"]);
        match args.sub {
            Subcommands::LandData(cmd) => {
                assert_eq!(cmd.count, 10);
                assert!(cmd.dry_run);
            }
            other => panic!("unexpected subcommand: {other:?}"),
        }
    }
}
