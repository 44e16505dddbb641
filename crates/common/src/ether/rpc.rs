use std::time::Duration;

use alloy::primitives::{Address, Bytes};
use backoff::ExponentialBackoff;
use tracing::{trace, warn};

use crate::{ether::provider::ChainClient, Error};

/// Upper bound on the time spent retrying a single read-only call.
pub const MAX_CALL_RETRY_TIME: Duration = Duration::from_secs(10);

/// Execute a read-only call, retrying transport failures with exponential backoff.
///
/// Reverts are returned immediately. Only use this for calls without side effects; transactions
/// are never retried.
pub async fn call_with_retry(
    client: &dyn ChainClient,
    to: Address,
    data: &Bytes,
) -> Result<Bytes, Error> {
    backoff::future::retry(
        ExponentialBackoff {
            max_elapsed_time: Some(MAX_CALL_RETRY_TIME),
            ..ExponentialBackoff::default()
        },
        move || async move {
            trace!("calling {} with {}", to, data);

            match client.call(to, data.clone()).await {
                Ok(output) => Ok(output),
                Err(e @ Error::ContractReverted(_)) => Err(backoff::Error::Permanent(e)),
                Err(e) => {
                    warn!("call to {} failed, retrying: {}", to, e);
                    Err(backoff::Error::transient(e))
                }
            }
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ether::testing::MockChainClient;

    #[tokio::test]
    async fn test_call_with_retry_returns_output() {
        let to = Address::repeat_byte(0x11);
        let data = Bytes::from(vec![1, 2, 3, 4]);
        let client = MockChainClient::new()
            .with_call_response(to, data.clone(), Bytes::from(vec![0xaa; 32]));

        let output = call_with_retry(&client, to, &data).await.expect("call succeeds");
        assert_eq!(output, Bytes::from(vec![0xaa; 32]));
    }

    #[tokio::test]
    async fn test_call_with_retry_does_not_retry_reverts() {
        let to = Address::repeat_byte(0x11);
        let data = Bytes::from(vec![1, 2, 3, 4]);
        let client = MockChainClient::new();

        let result = call_with_retry(&client, to, &data).await;
        assert!(matches!(result, Err(Error::ContractReverted(_))));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_call_with_retry_recovers_from_transient_failure() {
        let to = Address::repeat_byte(0x11);
        let data = Bytes::from(vec![1, 2, 3, 4]);
        let client = MockChainClient::new()
            .with_call_response(to, data.clone(), Bytes::from(vec![0xbb; 32]))
            .with_transient_call_failures(2);

        let output = call_with_retry(&client, to, &data).await.expect("eventually succeeds");
        assert_eq!(output, Bytes::from(vec![0xbb; 32]));
        assert_eq!(client.call_count(), 3);
    }
}
