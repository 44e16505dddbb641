//! An in-memory [`ChainClient`] for exercising genesis runs without a node.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use alloy::primitives::{keccak256, Address, Bytes, TxHash};
use async_trait::async_trait;

use crate::{
    ether::provider::{ChainClient, LegacyTransaction},
    Error,
};

/// Answers `eth_call`s from a fixed table and records every transaction it is asked to send.
///
/// Calls without a registered response revert. Sends succeed unless their nonce was marked as
/// failing; transaction hashes are the keccak-256 of the payload and nonce.
#[derive(Debug, Default)]
pub struct MockChainClient {
    sender: Option<Address>,
    nonce: u64,
    responses: Vec<((Address, Bytes), Bytes)>,
    failing_nonces: Vec<u64>,
    transient_failures: AtomicUsize,
    calls: AtomicUsize,
    sent: Mutex<Vec<LegacyTransaction>>,
}

impl MockChainClient {
    /// A read-only client with no registered responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a signer whose on-chain nonce is `nonce`.
    pub fn with_sender(mut self, sender: Address, nonce: u64) -> Self {
        self.sender = Some(sender);
        self.nonce = nonce;
        self
    }

    /// Answer calls of `data` to `to` with `output`.
    pub fn with_call_response(mut self, to: Address, data: Bytes, output: Bytes) -> Self {
        self.responses.push(((to, data), output));
        self
    }

    /// Fail sends that use any of `nonces`.
    pub fn with_failing_nonces(mut self, nonces: impl IntoIterator<Item = u64>) -> Self {
        self.failing_nonces.extend(nonces);
        self
    }

    /// Fail the next `count` calls with a transport error before answering normally.
    pub fn with_transient_call_failures(self, count: usize) -> Self {
        self.transient_failures.store(count, Ordering::SeqCst);
        self
    }

    /// The number of `eth_call`s received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every transaction sent so far, in order.
    pub fn sent_transactions(&self) -> Vec<LegacyTransaction> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    fn sender(&self) -> Option<Address> {
        self.sender
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let remaining = self.transient_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.transient_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(Error::RpcError("connection reset".to_string()));
        }

        self.responses
            .iter()
            .find(|((address, input), _)| *address == to && *input == data)
            .map(|(_, output)| output.clone())
            .ok_or_else(|| Error::ContractReverted(format!("no response registered for {data}")))
    }

    async fn transaction_count(&self, _address: Address) -> Result<u64, Error> {
        Ok(self.nonce)
    }

    async fn send_transaction(&self, transaction: LegacyTransaction) -> Result<TxHash, Error> {
        if self.failing_nonces.contains(&transaction.nonce) {
            return Err(Error::RpcError(format!(
                "transaction with nonce {} rejected",
                transaction.nonce
            )));
        }

        let mut preimage = transaction.data.to_vec();
        preimage.extend_from_slice(&transaction.nonce.to_be_bytes());
        let hash = keccak256(preimage);

        self.sent
            .lock()
            .map_err(|_| Error::Generic("mock chain state poisoned".to_string()))?
            .push(transaction);
        Ok(hash)
    }
}
