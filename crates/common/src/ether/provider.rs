//! The chain-client seam, and its alloy-backed implementation.
use alloy::{
    network::{Ethereum, EthereumWallet, TransactionBuilder},
    primitives::{Address, Bytes, TxHash, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::{json_rpc::ErrorPayload, types::TransactionRequest},
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;
use std::fmt;
use tracing::{debug, trace};

use crate::Error;

/// A legacy (gas-price) transaction, before signing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyTransaction {
    /// The destination contract.
    pub to: Address,
    /// The call payload.
    pub data: Bytes,
    /// The sender nonce.
    pub nonce: u64,
    /// Gas price, in wei.
    pub gas_price: u128,
    /// Gas limit.
    pub gas_limit: u64,
}

/// Everything the genesis commands need from a chain: read-only calls, the sender's nonce, and
/// signed submission.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// The address transactions are signed with, if a signer is configured.
    fn sender(&self) -> Option<Address>;

    /// Execute a read-only `eth_call` against `to`.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, Error>;

    /// The number of transactions sent from `address`.
    async fn transaction_count(&self, address: Address) -> Result<u64, Error>;

    /// Sign and broadcast `transaction`, returning its hash.
    async fn send_transaction(&self, transaction: LegacyTransaction) -> Result<TxHash, Error>;
}

/// [`RpcClient`] talks to a single JSON-RPC endpoint, optionally signing with one local key.
#[derive(Clone)]
pub struct RpcClient {
    provider: DynProvider<Ethereum>,
    sender: Option<Address>,
}

impl fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcClient").field("sender", &self.sender).finish_non_exhaustive()
    }
}

impl RpcClient {
    /// Connect to a provider using the given rpc_url. Without a signer the client is read-only.
    pub async fn connect(rpc_url: &str, signer: Option<PrivateKeySigner>) -> Result<Self, Error> {
        if rpc_url.is_empty() {
            return Err(Error::RpcError("no RPC URL provided".to_string()));
        }

        match signer {
            Some(signer) => {
                let sender = signer.address();
                let provider = ProviderBuilder::new()
                    .wallet(EthereumWallet::from(signer))
                    .connect(rpc_url)
                    .await
                    .map_err(|e| connect_error(rpc_url, e))?;
                debug!("connected to '{}' as {}", rpc_url, sender);
                Ok(Self { provider: provider.erased(), sender: Some(sender) })
            }
            None => {
                let provider = ProviderBuilder::new()
                    .connect(rpc_url)
                    .await
                    .map_err(|e| connect_error(rpc_url, e))?;
                debug!("connected to '{}' without a signer", rpc_url);
                Ok(Self { provider: provider.erased(), sender: None })
            }
        }
    }

    /// Connect with a hex private key. An empty key gives a read-only client.
    pub async fn connect_with_key(rpc_url: &str, private_key: &str) -> Result<Self, Error> {
        let signer = match private_key.trim() {
            "" => None,
            key => Some(parse_private_key(key)?),
        };
        Self::connect(rpc_url, signer).await
    }

    /// Get the chain id.
    pub async fn chain_id(&self) -> Result<u64, Error> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| Error::RpcError(format!("failed to get chain id: {e}")))
    }
}

/// Parse a hex private key, with or without `0x`. The key never appears in the error.
pub fn parse_private_key(key: &str) -> Result<PrivateKeySigner, Error> {
    key.trim().parse::<PrivateKeySigner>().map_err(|_| {
        Error::Generic("the private key is not a valid 32-byte hex string".to_string())
    })
}

/// Whether an error response means the call executed and reverted, as opposed to the node
/// refusing or failing to serve it (rate limits, missing state, ...).
fn is_revert(payload: &ErrorPayload) -> bool {
    payload.as_revert_data().is_some() ||
        payload.message.to_ascii_lowercase().contains("execution reverted")
}

fn connect_error(rpc_url: &str, e: impl fmt::Display) -> Error {
    Error::RpcError(format!("failed to connect to '{rpc_url}': {e}"))
}

#[async_trait]
impl ChainClient for RpcClient {
    fn sender(&self) -> Option<Address> {
        self.sender
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, Error> {
        trace!("eth_call to {} with {}", to, data);
        let request = TransactionRequest::default().with_to(to).with_input(data);

        self.provider.call(request).await.map_err(|e| match e.as_error_resp() {
            Some(payload) if is_revert(payload) => {
                Error::ContractReverted(format!("call to {to} reverted: {payload}"))
            }
            _ => Error::RpcError(format!("call to {to} failed: {e}")),
        })
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, Error> {
        self.provider
            .get_transaction_count(address)
            .await
            .map_err(|e| Error::RpcError(format!("failed to get nonce for {address}: {e}")))
    }

    async fn send_transaction(&self, transaction: LegacyTransaction) -> Result<TxHash, Error> {
        if self.sender.is_none() {
            return Err(Error::Generic(
                "a private key is required to submit transactions".to_string(),
            ));
        }

        let request = TransactionRequest::default()
            .with_to(transaction.to)
            .with_input(transaction.data)
            .with_value(U256::ZERO)
            .with_nonce(transaction.nonce)
            .with_gas_price(transaction.gas_price)
            .with_gas_limit(transaction.gas_limit);

        let pending = self.provider.send_transaction(request).await.map_err(|e| {
            Error::RpcError(format!(
                "failed to send transaction with nonce {}: {e}",
                transaction.nonce
            ))
        })?;

        Ok(*pending.tx_hash())
    }
}
