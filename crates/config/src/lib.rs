//! Configuration management for atlantis
//!
//! This crate provides functionality for managing the atlantis configuration,
//! including loading, saving, updating, and deleting configuration settings.
//! The configuration holds endpoints and contract addresses only. Private keys are
//! never written to it.

/// Error types for the configuration module
pub mod error;

use crate::error::Error;
use atlantis_common::{
    ether::calldata::parse_address,
    utils::{
        env::get_env,
        io::file::{delete_file, read_file, write_file},
    },
};
use clap::Parser;
use serde::{Deserialize, Serialize};
#[allow(deprecated)]
use std::env::home_dir;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Environment variable that overrides the configuration directory (`$HOME/.atlantis`).
pub const CONFIG_DIR_ENV: &str = "ATLANTIS_HOME";

/// Command line arguments for the configuration command
#[derive(Debug, Clone, Parser)]
#[clap(
    about = "Display and edit the current configuration",
    override_usage = "atlantis config [OPTIONS]"
)]
pub struct ConfigArgs {
    /// The target key to update.
    #[clap(required = false, default_value = "")]
    key: String,

    /// The value to set the key to.
    #[clap(required = false, default_value = "")]
    value: String,
}

/// The [`Configuration`] struct holds the endpoint and contract addresses every genesis command
/// falls back to when the matching flag is not given.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Configuration {
    /// The URL for the Ethereum RPC endpoint
    pub rpc_url: String,

    /// The land (registry) contract
    pub land_address: String,

    /// The land data (attribute) contract
    pub land_data_address: String,

    /// The genesis holder contract, which creates the auctions
    pub genesis_holder_address: String,

    /// The token accepted as payment in genesis auctions
    pub ring_token_address: String,

    /// The account that receives newly assigned land
    pub beneficiary: String,
}

/// Every key [`Configuration::update`] accepts.
pub const CONFIG_KEYS: [&str; 6] = [
    "rpc_url",
    "land_address",
    "land_data_address",
    "genesis_holder_address",
    "ring_token_address",
    "beneficiary",
];

#[allow(deprecated)]
fn config_path() -> Result<PathBuf, Error> {
    let mut path = match get_env(CONFIG_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => {
            let mut home = home_dir().ok_or_else(|| {
                Error::Generic(
                    "failed to get home directory. does your os support `std::env::home_dir()`?"
                        .to_string(),
                )
            })?;
            home.push(".atlantis");
            home
        }
    };
    path.push("config.toml");

    Ok(path)
}

fn path_str(path: &std::path::Path) -> Result<&str, Error> {
    path.to_str().ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))
}

impl Configuration {
    /// Returns the current configuration, creating a default one on first use.
    pub fn load() -> Result<Self, Error> {
        let path = config_path()?;

        if !path.exists() {
            Configuration::default().save()?;
        }

        let contents = read_file(path_str(&path)?)
            .map_err(|e| Error::Generic(format!("failed to read config file: {e}")))?;

        let mut config: Configuration = toml::from_str(&contents)
            .map_err(|e| Error::ParseError(format!("failed to parse config file: {e}")))?;

        if !mesc::is_mesc_enabled() {
            return Ok(config);
        }

        if let Some(endpoint) = mesc::get_default_endpoint(Some("atlantis"))? {
            debug!("overriding rpc_url with mesc endpoint");
            config.rpc_url = endpoint.url;
        }

        Ok(config)
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> Result<(), Error> {
        let path = config_path()?;

        write_file(
            path_str(&path)?,
            &toml::to_string(&self)
                .map_err(|e| Error::ParseError(format!("failed to serialize config: {e}")))?,
        )
        .map_err(|e| Error::Generic(format!("failed to write config file: {e}")))?;

        Ok(())
    }

    /// Deletes the configuration file.
    pub fn delete() -> Result<(), Error> {
        let path = config_path()?;
        if delete_file(path_str(&path)?) {
            debug!("deleted configuration at '{}'", path.display());
        }

        Ok(())
    }

    /// Update a single key/value pair in the configuration and write it to disk.
    ///
    /// Address keys must hold a 20-byte hex address, or be empty to unset them.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), Error> {
        let slot = match key {
            "rpc_url" => &mut self.rpc_url,
            "land_address" => &mut self.land_address,
            "land_data_address" => &mut self.land_data_address,
            "genesis_holder_address" => &mut self.genesis_holder_address,
            "ring_token_address" => &mut self.ring_token_address,
            "beneficiary" => &mut self.beneficiary,
            _ => return Err(Error::InvalidKey(key.to_string())),
        };

        if key != "rpc_url" && !value.is_empty() {
            parse_address(value).map_err(|e| Error::InvalidValue {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        }
        *slot = value.to_string();

        self.save()?;

        Ok(())
    }
}

/// The `config` command is used to display and edit the current configuration.
pub fn config(args: ConfigArgs) -> Result<(), Error> {
    if !args.key.is_empty() {
        if !args.value.is_empty() {
            let mut config = Configuration::load()?;
            config.update(&args.key, &args.value)?;
            info!("updated configuration! Set \'{}\' = \'{}\' .", &args.key, &args.value);
        } else {
            error!("found key but no value to set. Please specify a value to set, use `atlantis config --help` for more information.");
        }
    } else {
        println!("{:#?}", Configuration::load()?);
        info!("use `atlantis config <KEY> <VALUE>` to set one of: {}", CONFIG_KEYS.join(", "));
    }

    Ok(())
}

/// Parse user input --rpc-url into a full url, resolving MESC aliases when enabled
pub fn parse_url_arg(url: &str) -> Result<String, String> {
    if mesc::is_mesc_enabled() {
        if let Ok(Some(endpoint)) = mesc::get_endpoint_by_query(url, Some("atlantis")) {
            return Ok(endpoint.url);
        }
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const BENEFICIARY: &str = "0x4cC4c344ebA849DC3B9b8Fa2b8E72E57E0E4AA93";

    fn use_temp_config_dir(name: &str) {
        let dir = std::env::temp_dir().join("atlantis-config-tests").join(name);
        std::env::set_var(CONFIG_DIR_ENV, dir);
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let config = Configuration::default();
        assert_eq!(config.rpc_url, "");
        assert_eq!(config.land_address, "");
        assert_eq!(config.beneficiary, "");
    }

    #[test]
    #[serial]
    fn test_load_configuration() {
        use_temp_config_dir("load");
        Configuration::delete().expect("failed to delete config file");
        let config = Configuration::load().expect("failed to load config file");

        assert_eq!(config, Configuration::default());
        assert!(config_path().expect("path").exists());
    }

    #[test]
    #[serial]
    fn test_save_configuration() {
        use_temp_config_dir("save");
        Configuration::delete().expect("failed to delete config file");
        let mut config = Configuration::default();

        config.update("rpc_url", "http://localhost:8545").expect("failed to update rpc_url");
        config.update("beneficiary", BENEFICIARY).expect("failed to update beneficiary");

        let loaded_config = Configuration::load().expect("failed to load config file");
        assert_eq!(loaded_config.rpc_url, "http://localhost:8545");
        assert_eq!(loaded_config.beneficiary, BENEFICIARY);
        assert_eq!(loaded_config.land_address, "");
    }

    #[test]
    #[serial]
    fn test_partial_file_uses_defaults() {
        use_temp_config_dir("partial");
        let path = config_path().expect("path");
        write_file(path_str(&path).expect("utf8"), "rpc_url = \"http://node:8545\"\n")
            .expect("failed to write config");

        let config = Configuration::load().expect("failed to load config file");
        assert_eq!(config.rpc_url, "http://node:8545");
        assert_eq!(config.ring_token_address, "");
    }

    #[test]
    #[serial]
    fn test_update_rejects_invalid_values() {
        use_temp_config_dir("invalid");
        Configuration::delete().expect("failed to delete config file");
        let mut config = Configuration::default();

        assert!(matches!(config.update("openai_api_key", "x"), Err(Error::InvalidKey(_))));
        assert!(matches!(
            config.update("land_address", "0x1234"),
            Err(Error::InvalidValue { .. })
        ));
        assert_eq!(config.land_address, "");
    }

    #[test]
    #[serial]
    fn test_delete_configuration() {
        use_temp_config_dir("delete");
        Configuration::delete().expect("failed to delete config file");
        let mut config = Configuration::load().expect("failed to load config file");

        config.update("rpc_url", "http://localhost:8545").expect("failed to update rpc_url");
        config.update("land_address", BENEFICIARY).expect("failed to update land_address");

        Configuration::delete().expect("failed to delete config file");
        let config = Configuration::load().expect("failed to load config file");

        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_parse_url_arg_passthrough() {
        assert_eq!(
            parse_url_arg("http://localhost:8545").expect("infallible"),
            "http://localhost:8545"
        );
    }
}
