use alloy::primitives::{Address, TxHash};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    ether::{
        calldata::Payload,
        provider::{ChainClient, LegacyTransaction},
    },
    Error,
};

/// Gas parameters applied to every transaction of a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasSettings {
    /// Gas price, in wei.
    pub gas_price: u128,
    /// Gas limit.
    pub gas_limit: u64,
}

/// What happened to a payload handed to the [`Submitter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Dispatch {
    /// Signed and broadcast.
    Sent {
        /// The transaction hash.
        tx_hash: TxHash,
        /// The nonce it was sent with.
        nonce: u64,
    },
    /// Built but not sent.
    DryRun {
        /// The nonce it would have been sent with.
        nonce: u64,
    },
}

/// Sends payloads one at a time from a single sender, tracking the nonce locally.
///
/// The nonce only advances after a successful send, so a failed record does not leave a gap.
pub struct Submitter<'a> {
    client: &'a dyn ChainClient,
    gas: GasSettings,
    dry_run: bool,
    next_nonce: u64,
}

impl std::fmt::Debug for Submitter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Submitter")
            .field("gas", &self.gas)
            .field("dry_run", &self.dry_run)
            .field("next_nonce", &self.next_nonce)
            .finish_non_exhaustive()
    }
}

impl<'a> Submitter<'a> {
    /// Create a submitter. The starting nonce is `nonce` if given, otherwise the sender's
    /// current transaction count. Dry runs without a signer start from zero.
    pub async fn new(
        client: &'a dyn ChainClient,
        gas: GasSettings,
        dry_run: bool,
        nonce: Option<u64>,
    ) -> Result<Self, Error> {
        let next_nonce = match (nonce, client.sender()) {
            (Some(nonce), _) => nonce,
            (None, Some(sender)) => client.transaction_count(sender).await?,
            (None, None) if dry_run => 0,
            (None, None) => {
                return Err(Error::Generic(
                    "a private key is required to submit transactions".to_string(),
                ))
            }
        };
        debug!("starting nonce: {}", next_nonce);

        Ok(Self { client, gas, dry_run, next_nonce })
    }

    /// The nonce the next payload will use.
    pub fn next_nonce(&self) -> u64 {
        self.next_nonce
    }

    /// Whether payloads are only built, never sent.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Send `payload` to `to` with the next nonce.
    pub async fn submit(&mut self, to: Address, payload: &Payload) -> Result<Dispatch, Error> {
        let nonce = self.next_nonce;

        if self.dry_run {
            info!("[dry-run] nonce {}: {} <- {}", nonce, to, payload);
            self.next_nonce += 1;
            return Ok(Dispatch::DryRun { nonce });
        }

        let tx_hash = self
            .client
            .send_transaction(LegacyTransaction {
                to,
                data: payload.to_bytes(),
                nonce,
                gas_price: self.gas.gas_price,
                gas_limit: self.gas.gas_limit,
            })
            .await?;
        self.next_nonce += 1;

        info!("sent {} with nonce {}", tx_hash, nonce);
        Ok(Dispatch::Sent { tx_hash, nonce })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::{DEFAULT_GAS_LIMIT, GWEI},
        ether::{calldata::CalldataBuilder, testing::MockChainClient},
    };
    use alloy::primitives::U256;

    const GAS: GasSettings = GasSettings { gas_price: 2 * GWEI, gas_limit: DEFAULT_GAS_LIMIT };

    fn payload(n: u64) -> Payload {
        CalldataBuilder::from_hex_selector("0x4d628d48")
            .expect("valid selector")
            .uint256(U256::from(n))
            .build()
    }

    #[tokio::test]
    async fn test_submitter_uses_sender_nonce() {
        let client = MockChainClient::new().with_sender(Address::repeat_byte(0x01), 7);
        let mut submitter = Submitter::new(&client, GAS, false, None).await.expect("nonce");

        let first = submitter.submit(Address::repeat_byte(0x02), &payload(1)).await.expect("ok");
        let second = submitter.submit(Address::repeat_byte(0x02), &payload(2)).await.expect("ok");

        assert!(matches!(first, Dispatch::Sent { nonce: 7, .. }));
        assert!(matches!(second, Dispatch::Sent { nonce: 8, .. }));

        let sent = client.sent_transactions();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].data, payload(1).to_bytes());
        assert_eq!(sent[0].gas_price, 2 * GWEI);
        assert_eq!(sent[1].gas_limit, DEFAULT_GAS_LIMIT);
    }

    #[tokio::test]
    async fn test_submitter_nonce_override() {
        let client = MockChainClient::new().with_sender(Address::repeat_byte(0x01), 7);
        let submitter = Submitter::new(&client, GAS, false, Some(100)).await.expect("nonce");
        assert_eq!(submitter.next_nonce(), 100);
    }

    #[tokio::test]
    async fn test_submitter_failed_send_keeps_nonce() {
        let client = MockChainClient::new()
            .with_sender(Address::repeat_byte(0x01), 0)
            .with_failing_nonces([0]);
        let mut submitter = Submitter::new(&client, GAS, false, None).await.expect("nonce");

        assert!(submitter.submit(Address::ZERO, &payload(1)).await.is_err());
        assert_eq!(submitter.next_nonce(), 0);
    }

    #[tokio::test]
    async fn test_submitter_dry_run_never_sends() {
        let client = MockChainClient::new();
        let mut submitter = Submitter::new(&client, GAS, true, None).await.expect("dry run");

        let dispatch = submitter.submit(Address::ZERO, &payload(1)).await.expect("ok");
        assert_eq!(dispatch, Dispatch::DryRun { nonce: 0 });
        assert_eq!(submitter.next_nonce(), 1);
        assert!(client.sent_transactions().is_empty());
    }

    #[tokio::test]
    async fn test_submitter_requires_signer() {
        let client = MockChainClient::new();
        assert!(Submitter::new(&client, GAS, false, None).await.is_err());
    }
}
