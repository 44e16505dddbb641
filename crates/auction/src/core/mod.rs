use alloy::primitives::{Address, U256};
use atlantis_common::{
    constants::CREATE_AUCTION_SELECTOR,
    ether::{
        calldata::{parse_address, parse_uint256, CalldataBuilder, Payload},
        provider::{ChainClient, RpcClient},
        submitter::{GasSettings, Submitter},
    },
    utils::time::parse_timestamp,
};
use atlantis_land::{
    load_resources, Grid, IgnoreList, LandContract, LandRecord, Report, Submission,
    SubmissionStatus,
};
use eyre::eyre;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::{error::Error, interfaces::AuctionArgs};

/// The fixed terms every genesis auction is created with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuctionTerms {
    /// Price when the auction opens.
    pub starting_price: U256,
    /// Price when the auction closes.
    pub ending_price: U256,
    /// Auction duration, in seconds.
    pub duration: u64,
    /// Start of the first auction, in unix seconds.
    pub first_start: u64,
    /// Seconds between consecutive records' start times.
    pub interval: u64,
    /// The token bids are paid in.
    pub token: Address,
}

impl AuctionTerms {
    /// Build the terms from command line arguments.
    pub fn from_args(args: &AuctionArgs) -> Result<Self, Error> {
        let starting_price = parse_uint256(&args.starting_price)
            .map_err(|e| eyre!("invalid starting price: {e}"))?;
        let ending_price = if args.ending_price.is_empty() {
            starting_price / U256::from(5u64)
        } else {
            parse_uint256(&args.ending_price).map_err(|e| eyre!("invalid ending price: {e}"))?
        };
        let first_start = parse_timestamp(&args.start_time)?;
        let token = parse_address(&args.ring_token_address)
            .map_err(|e| eyre!("invalid ring token address: {e}"))?;

        Ok(Self {
            starting_price,
            ending_price,
            duration: args.duration,
            first_start,
            interval: args.interval,
            token,
        })
    }

    /// Start time of the `index`-th record's auction. Skipped records still occupy their slot.
    pub fn start_at(&self, index: usize) -> Result<u64, Error> {
        u64::try_from(index)
            .ok()
            .and_then(|index| index.checked_mul(self.interval))
            .and_then(|offset| offset.checked_add(self.first_start))
            .ok_or_else(|| eyre!("start time of record {index} overflows").into())
    }

    /// `createAuction(tokenId, startingPrice, endingPrice, duration, startAt, token)`
    pub fn payload(&self, token_id: U256, index: usize) -> Result<Payload, Error> {
        let builder = CalldataBuilder::from_hex_selector(CREATE_AUCTION_SELECTOR)
            .map_err(|e| eyre!("invalid selector: {e}"))?;

        Ok(builder
            .uint256(token_id)
            .uint256(self.starting_price)
            .uint256(self.ending_price)
            .uint256(U256::from(self.duration))
            .uint256(U256::from(self.start_at(index)?))
            .address(self.token)
            .build())
    }
}

/// Creates an auction for every eligible parcel of the resource list.
///
/// Special parcels and parcels on the ignore list are skipped and reported as such. Token ids
/// are resolved through the land contract before each auction is created. A failed parcel
/// stops the run unless `keep_going` is set.
pub async fn auction(args: AuctionArgs) -> Result<Report, Error> {
    let records = load_resources(&args.resources)
        .map_err(|e| eyre!("failed to load resources from '{}': {e}", args.resources))?;
    let ignore = IgnoreList::load(&args.ignore)
        .map_err(|e| eyre!("failed to load ignore list from '{}': {e}", args.ignore))?;
    let client = RpcClient::connect_with_key(&args.rpc_url, &args.private_key)
        .await
        .map_err(|e| eyre!("failed to connect: {e}"))?;

    auction_with_client(&args, &records, &ignore, &client).await
}

/// [`auction`] against an already connected chain client.
pub async fn auction_with_client(
    args: &AuctionArgs,
    records: &[LandRecord],
    ignore: &IgnoreList,
    client: &dyn ChainClient,
) -> Result<Report, Error> {
    let start_time = Instant::now();
    let terms = AuctionTerms::from_args(args)?;
    let land = LandContract::new(
        client,
        parse_address(&args.land_address)
            .map_err(|e| eyre!("invalid land contract address: {e}"))?,
    );
    let holder = parse_address(&args.genesis_holder_address)
        .map_err(|e| eyre!("invalid genesis holder address: {e}"))?;
    debug!("auction terms: {:?}", terms);

    let gas = GasSettings { gas_price: args.gas_price, gas_limit: args.gas_limit };
    let mut submitter = Submitter::new(client, gas, args.dry_run, args.nonce)
        .await
        .map_err(|e| eyre!("failed to prepare submitter: {e}"))?;

    let grid = Grid::GENESIS;
    let mut report = Report::new("auction");
    for (index, record) in records.iter().enumerate() {
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

        if let Some(reason) = record.skip_reason(coordinate, ignore) {
            info!("skipping parcel {} ({:?})", coordinate, reason);
            report.push(
                Submission::new(index, SubmissionStatus::Skipped { reason })
                    .with_coordinate(coordinate),
            );
            continue;
        }

        let token_id = match land.encode_token_id(coordinate).await {
            Ok(token_id) => token_id,
            Err(e) => {
                error!("failed to resolve the token id of parcel {}: {}", coordinate, e);
                report.push(Submission::failed(index, e).with_coordinate(coordinate));
                if args.keep_going {
                    continue;
                }
                break;
            }
        };

        let entry = |status: SubmissionStatus| {
            Submission::new(index, status).with_coordinate(coordinate).with_token_id(token_id)
        };

        let payload = match terms.payload(token_id, index) {
            Ok(payload) => payload,
            Err(e) => {
                error!("parcel {}: {}", coordinate, e);
                report.push(entry(failed_status(e)));
                if args.keep_going {
                    continue;
                }
                break;
            }
        };

        match submitter.submit(holder, &payload).await {
            Ok(dispatch) => {
                debug!("created auction for parcel {} (token {:#x})", coordinate, token_id);
                report.push(entry(dispatch.into()).with_payload(payload));
            }
            Err(e) => {
                error!("failed to create the auction of parcel {}: {}", coordinate, e);
                report.push(entry(failed_status(e)).with_payload(payload));
                if !args.keep_going {
                    break;
                }
            }
        }
    }

    report.log_summary();
    info!("auction took {:?}", start_time.elapsed());
    Ok(report)
}

fn failed_status(error: impl std::fmt::Display) -> SubmissionStatus {
    SubmissionStatus::Failed { error: error.to_string() }
}
