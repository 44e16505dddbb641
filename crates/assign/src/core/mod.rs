use alloy::primitives::Address;
use atlantis_common::{
    constants::ASSIGN_NEW_LAND_SELECTOR,
    ether::{
        calldata::{parse_address, CalldataBuilder, Payload},
        provider::{ChainClient, RpcClient},
        submitter::{GasSettings, Submitter},
    },
};
use atlantis_land::{load_resources, Coordinate, Grid, LandRecord, Report, Submission};
use eyre::eyre;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::{error::Error, interfaces::AssignArgs};

/// Assigns every parcel of the resource list to the beneficiary.
///
/// Records are processed in list order; the `index`-th record is the parcel at
/// [`Grid::coordinate_at`]`(index)`. A failed parcel stops the run unless `keep_going` is set;
/// either way the report of everything attempted so far is returned.
pub async fn assign(args: AssignArgs) -> Result<Report, Error> {
    let records = load_resources(&args.resources)
        .map_err(|e| eyre!("failed to load resources from '{}': {e}", args.resources))?;
    let client = RpcClient::connect_with_key(&args.rpc_url, &args.private_key)
        .await
        .map_err(|e| eyre!("failed to connect: {e}"))?;

    assign_with_client(&args, &records, &client).await
}

/// [`assign`] against an already connected chain client.
pub async fn assign_with_client(
    args: &AssignArgs,
    records: &[LandRecord],
    client: &dyn ChainClient,
) -> Result<Report, Error> {
    let start_time = Instant::now();
    let land = parse_address(&args.land_address)
        .map_err(|e| eyre!("invalid land contract address: {e}"))?;
    let beneficiary =
        parse_address(&args.beneficiary).map_err(|e| eyre!("invalid beneficiary: {e}"))?;

    let grid = Grid::GENESIS;
    if records.len() > grid.len() {
        warn!(
            "resource list has {} records but the grid only has {} parcels",
            records.len(),
            grid.len()
        );
    }

    let gas = GasSettings { gas_price: args.gas_price, gas_limit: args.gas_limit };
    let mut submitter = Submitter::new(client, gas, args.dry_run, args.nonce)
        .await
        .map_err(|e| eyre!("failed to prepare submitter: {e}"))?;

    let mut report = Report::new("assign");
    for index in 0..records.len() {
        let coordinate = match grid.coordinate_at(index) {
            Ok(coordinate) => coordinate,
            Err(e) => {
                error!("record {}: {}", index, e);
                report.push(Submission::failed(index, e));
                if args.keep_going {
                    continue;
                }
                break;
            }
        };

        let payload = match assign_payload(coordinate, beneficiary) {
            Ok(payload) => payload,
            Err(e) => {
                error!("parcel {}: {}", coordinate, e);
                report.push(Submission::failed(index, e).with_coordinate(coordinate));
                if args.keep_going {
                    continue;
                }
                break;
            }
        };

        match submitter.submit(land, &payload).await {
            Ok(dispatch) => {
                debug!("assigned parcel {} ({})", coordinate, index);
                report.push(
                    Submission::new(index, dispatch.into())
                        .with_coordinate(coordinate)
                        .with_payload(payload),
                );
            }
            Err(e) => {
                error!("failed to assign parcel {}: {}", coordinate, e);
                report.push(
                    Submission::failed(index, e).with_coordinate(coordinate).with_payload(payload),
                );
                if !args.keep_going {
                    break;
                }
            }
        }
    }

    report.log_summary();
    info!("assign took {:?}", start_time.elapsed());
    Ok(report)
}

/// `assignNewLand(x, y, beneficiary)`
pub(crate) fn assign_payload(
    coordinate: Coordinate,
    beneficiary: Address,
) -> Result<Payload, atlantis_land::Error> {
    let (x, y) = coordinate.to_int256()?;
    Ok(CalldataBuilder::from_hex_selector(ASSIGN_NEW_LAND_SELECTOR)?
        .int256(x)
        .int256(y)
        .address(beneficiary)
        .build())
}
