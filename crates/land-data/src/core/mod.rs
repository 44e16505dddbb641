use alloy::primitives::U256;
use atlantis_common::{
    constants::ADD_LAND_PIXEL_SELECTOR,
    error::Error as CommonError,
    ether::{
        calldata::{parse_address, CalldataBuilder, Payload},
        provider::{ChainClient, RpcClient},
        submitter::{GasSettings, Submitter},
    },
};
use atlantis_land::{
    load_resources, Coordinate, Grid, LandContract, LandRecord, Report, Submission,
    SubmissionStatus,
};
use eyre::eyre;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::{error::Error, interfaces::LandDataArgs};

/// Publishes the packed attributes of every minted parcel.
///
/// Tokens are enumerated with `tokenByIndex(0..count)`; the first failing lookup marks the end
/// of the minted set. Each token is decoded back to its coordinate, whose resource record is
/// packed into the land attribute word.
pub async fn land_data(args: LandDataArgs) -> Result<Report, Error> {
    let records = load_resources(&args.resources)
        .map_err(|e| eyre!("failed to load resources from '{}': {e}", args.resources))?;
    let client = RpcClient::connect_with_key(&args.rpc_url, &args.private_key)
        .await
        .map_err(|e| eyre!("failed to connect: {e}"))?;

    land_data_with_client(&args, &records, &client).await
}

/// [`land_data`] against an already connected chain client.
pub async fn land_data_with_client(
    args: &LandDataArgs,
    records: &[LandRecord],
    client: &dyn ChainClient,
) -> Result<Report, Error> {
    let start_time = Instant::now();
    let land = LandContract::new(
        client,
        parse_address(&args.land_address)
            .map_err(|e| eyre!("invalid land contract address: {e}"))?,
    );
    let land_data = parse_address(&args.land_data_address)
        .map_err(|e| eyre!("invalid land data contract address: {e}"))?;

    let gas = GasSettings { gas_price: args.gas_price, gas_limit: args.gas_limit };
    let mut submitter = Submitter::new(client, gas, args.dry_run, args.nonce)
        .await
        .map_err(|e| eyre!("failed to prepare submitter: {e}"))?;

    let mut report = Report::new("land-data");
    for i in 0..args.count {
        let index = usize::try_from(i).map_err(|_| eyre!("token index {i} is too large"))?;

        let token_id = match land.token_by_index(i).await {
            Ok(token_id) => token_id,
            // the enumeration reverts once every minted token has been visited
            Err(atlantis_land::Error::Common(CommonError::ContractReverted(e))) => {
                info!("no land token at index {}, stopping: {}", i, e);
                break;
            }
            Err(e) => {
                error!("failed to look up the land token at index {}: {}", i, e);
                report.push(Submission::failed(index, e));
                if args.keep_going {
                    continue;
                }
                break;
            }
        };

        let coordinate = match land.decode_token_id(token_id).await {
            Ok(coordinate) => coordinate,
            Err(e) => {
                error!("failed to decode token {:#x}: {}", token_id, e);
                report.push(Submission::failed(index, e).with_token_id(token_id));
                if args.keep_going {
                    continue;
                }
                break;
            }
        };

        let entry = |status: SubmissionStatus| {
            Submission::new(index, status).with_coordinate(coordinate).with_token_id(token_id)
        };

        let payload = match pixel_payload(records, coordinate, token_id) {
            Ok(payload) => payload,
            Err(e) => {
                error!("parcel {}: {}", coordinate, e);
                report.push(entry(SubmissionStatus::Failed { error: e.to_string() }));
                if args.keep_going {
                    continue;
                }
                break;
            }
        };

        match submitter.submit(land_data, &payload).await {
            Ok(dispatch) => {
                debug!("published attributes of parcel {}", coordinate);
                report.push(entry(dispatch.into()).with_payload(payload));
            }
            Err(e) => {
                error!("failed to publish attributes of parcel {}: {}", coordinate, e);
                report.push(
                    entry(SubmissionStatus::Failed { error: e.to_string() }).with_payload(payload),
                );
                if !args.keep_going {
                    break;
                }
            }
        }
    }

    report.log_summary();
    info!("land-data took {:?}", start_time.elapsed());
    Ok(report)
}

/// `addLandPixel(tokenId, attributes)` for the record at `coordinate`.
pub(crate) fn pixel_payload(
    records: &[LandRecord],
    coordinate: Coordinate,
    token_id: U256,
) -> Result<Payload, atlantis_land::Error> {
    let index = Grid::GENESIS.index_of(coordinate)?;
    let record = records.get(index).ok_or_else(|| {
        atlantis_land::Error::ResourceFile(format!(
            "no resource record for parcel {coordinate} (index {index})"
        ))
    })?;

    Ok(CalldataBuilder::from_hex_selector(ADD_LAND_PIXEL_SELECTOR)?
        .uint256(token_id)
        .uint256(record.pack()?)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LandDataArgsBuilder;
    use alloy::primitives::{Address, Bytes};
    use atlantis_common::{
        constants::{DECODE_TOKEN_ID_SIGNATURE, TOKEN_BY_INDEX_SIGNATURE},
        ether::{
            calldata::{Selector, Word},
            testing::MockChainClient,
        },
    };

    const LAND: Address = Address::repeat_byte(0x1a);
    const LAND_DATA: Address = Address::repeat_byte(0xb5);

    fn args() -> LandDataArgs {
        LandDataArgsBuilder::new()
            .land_address(LAND.to_string())
            .land_data_address(LAND_DATA.to_string())
            .build()
            .expect("valid args")
    }

    fn records() -> Vec<LandRecord> {
        (0..Grid::GENESIS.len())
            .map(|i| LandRecord { gold: i as u64, wood: 1, ..Default::default() })
            .collect()
    }

    /// A land contract with `tokens` minted, token `1000 + i` at grid index `2 * i`.
    fn land_client(tokens: u64) -> MockChainClient {
        let mut client = MockChainClient::new().with_sender(Address::repeat_byte(0x5e), 3);
        for i in 0..tokens {
            let token_id = U256::from(1000 + i);
            let by_index = CalldataBuilder::new(Selector::from_signature(TOKEN_BY_INDEX_SIGNATURE))
                .uint256(U256::from(i))
                .build()
                .to_bytes();
            let decode = CalldataBuilder::new(Selector::from_signature(DECODE_TOKEN_ID_SIGNATURE))
                .uint256(token_id)
                .build()
                .to_bytes();

            let coordinate = Grid::GENESIS.coordinate_at(2 * i as usize).expect("on grid");
            let (x, y) = coordinate.to_int256().expect("fits");
            let mut decoded = Word::from(x).as_bytes().to_vec();
            decoded.extend_from_slice(Word::from(y).as_bytes());
            let minted = Bytes::copy_from_slice(Word::from(token_id).as_bytes());

            client = client
                .with_call_response(LAND, by_index, minted)
                .with_call_response(LAND, decode, Bytes::from(decoded));
        }
        client
    }

    #[test]
    fn test_pixel_payload_uses_matching_record() {
        let payload = pixel_payload(&records(), Coordinate::new(-111, 22), U256::from(7u64))
            .expect("payload");

        let packed = U256::from_be_bytes(*payload.words()[1].as_bytes());
        assert_eq!(payload.selector().to_string(), "4d628d48");
        assert_eq!(U256::from_be_bytes(*payload.words()[0].as_bytes()), U256::from(7u64));
        assert_eq!(packed, U256::from(1u64) | (U256::from(1u64) << 16));
    }

    #[test]
    fn test_pixel_payload_missing_record() {
        let result = pixel_payload(&records()[..10], Coordinate::new(-68, -22), U256::ZERO);
        assert!(matches!(result, Err(atlantis_land::Error::ResourceFile(_))));
    }

    #[tokio::test]
    async fn test_land_data_stops_at_end_of_enumeration() {
        let client = land_client(3);

        let report = land_data_with_client(&args(), &records(), &client).await.expect("report");

        assert_eq!(report.submitted(), 3);
        assert!(!report.has_failures());
        let sent = client.sent_transactions();
        assert_eq!(sent.iter().map(|tx| tx.nonce).collect::<Vec<_>>(), vec![3, 4, 5]);
        assert!(sent.iter().all(|tx| tx.to == LAND_DATA));
        assert!(sent.iter().all(|tx| tx.gas_price == 6 * atlantis_common::constants::GWEI));
        assert_eq!(report.submissions[2].coordinate, Some(Coordinate::new(-108, 22)));
        assert_eq!(report.submissions[2].token_id, Some(U256::from(1002u64)));
    }

    #[tokio::test]
    async fn test_land_data_respects_count() {
        let client = land_client(5);
        let mut args = args();
        args.count = 2;

        let report = land_data_with_client(&args, &records(), &client).await.expect("report");
        assert_eq!(report.submissions.len(), 2);
    }

    #[tokio::test]
    async fn test_land_data_dry_run() {
        let client = land_client(2);
        let mut args = args();
        args.dry_run = true;

        let report = land_data_with_client(&args, &records(), &client).await.expect("report");

        assert_eq!(report.dry_runs(), 2);
        assert!(client.sent_transactions().is_empty());
    }

    #[tokio::test]
    async fn test_land_data_reports_unreachable_node() {
        // every lookup fails in transport until the retry budget runs out
        let client = land_client(3).with_transient_call_failures(usize::MAX);

        let report = land_data_with_client(&args(), &records(), &client).await.expect("report");

        assert_eq!(report.submissions.len(), 1);
        assert_eq!(report.failed(), 1);
        assert!(report.has_failures());
        assert!(matches!(
            &report.submissions[0].status,
            SubmissionStatus::Failed { error } if error.contains("connection reset")
        ));
        assert!(client.sent_transactions().is_empty());
    }

    #[tokio::test]
    async fn test_land_data_missing_record_fails() {
        let client = land_client(2);

        // token 1 decodes to grid index 2, which this list does not cover
        let report =
            land_data_with_client(&args(), &records()[..2], &client).await.expect("report");

        assert_eq!(report.submitted(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.submissions[1].coordinate, Some(Coordinate::new(-110, 22)));
    }
}
