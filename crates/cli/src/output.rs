use std::env;

use atlantis_common::ether::provider::RpcClient;
use eyre::{eyre, Result};
use tracing::debug;

/// build a standardized output path for the given parameters. follows the following cases:
/// - if `output` is the default value (`output`)
///   - if the chain id can be fetched from `rpc_url`, return `/output/{chain_id}/{filename}`
///   - otherwise, return `/output/local/{filename}`
/// - if `output` is specified, return `/{output}/{filename}`
pub async fn build_output_path(output: &str, rpc_url: &str, filename: &str) -> Result<String> {
    // if output is the default value, build a path based on the chain
    if output == "output" {
        // get the current working directory
        let cwd = env::current_dir()?
            .into_os_string()
            .into_string()
            .map_err(|_| eyre!("Unable to get current working directory"))?;

        let chain = match chain_id(rpc_url).await {
            Ok(chain_id) => chain_id.to_string(),
            Err(e) => {
                debug!("writing report under 'local': {}", e);
                "local".to_string()
            }
        };
        return Ok(format!("{cwd}/output/{chain}/{filename}"));
    }

    // output is specified, return the path
    Ok(format!("{output}/{filename}"))
}

/// the report filename for `command`, prefixed with `name` when given
pub fn report_filename(name: &str, command: &str) -> String {
    let filename = format!("genesis-{command}.json");
    if name.is_empty() {
        filename
    } else {
        format!("{name}-{filename}")
    }
}

async fn chain_id(rpc_url: &str) -> Result<u64> {
    let client = RpcClient::connect(rpc_url, None).await?;
    Ok(client.chain_id().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_output_default_local() {
        // no rpc url, so there is no chain id to group by
        let path = build_output_path("output", "", "genesis-assign.json").await;
        assert!(path
            .expect("failed to build output path")
            .ends_with("/output/local/genesis-assign.json"));
    }

    #[tokio::test]
    async fn test_output_default_chain() {
        let rpc_url = std::env::var("RPC_URL").unwrap_or_else(|_| {
            println!("RPC_URL not set, skipping test");
            std::process::exit(0);
        });

        let path = build_output_path("output", &rpc_url, "genesis-assign.json").await;
        assert!(path.expect("failed to build output path").ends_with("/genesis-assign.json"));
    }

    #[tokio::test]
    async fn test_output_specified() {
        let path = build_output_path("/some_dir", "", "genesis-auction.json").await;
        assert_eq!(
            path.expect("failed to build output path"),
            "/some_dir/genesis-auction.json".to_string()
        );
    }

    #[test]
    fn test_report_filename() {
        assert_eq!(report_filename("", "land-data"), "genesis-land-data.json");
        assert_eq!(report_filename("round1", "auction"), "round1-genesis-auction.json");
    }
}
