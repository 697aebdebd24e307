//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the pinning API key.
pub const PINATA_API_KEY_ENV_VAR: &str = "PINATA_API_KEY";
/// Environment variable holding the pinning secret API key.
pub const PINATA_SECRET_API_KEY_ENV_VAR: &str = "PINATA_SECRET_API_KEY";
/// Environment variable overriding the JSON-RPC endpoint URL.
pub const RPC_URL_ENV_VAR: &str = "MINT_GATEWAY_RPC_URL";
/// Environment variable overriding the mint contract address.
pub const CONTRACT_ADDRESS_ENV_VAR: &str = "MINT_GATEWAY_CONTRACT_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Overlay credentials and endpoints from the environment.
///
/// Environment values take precedence over file values so secrets stay
/// out of config files.
pub fn apply_env_overrides(config: &mut GatewayConfig) {
    if let Ok(key) = std::env::var(PINATA_API_KEY_ENV_VAR) {
        config.pinning.api_key = key;
    }
    if let Ok(secret) = std::env::var(PINATA_SECRET_API_KEY_ENV_VAR) {
        config.pinning.secret_api_key = secret;
    }
    if let Ok(url) = std::env::var(RPC_URL_ENV_VAR) {
        config.blockchain.rpc_url = url;
    }
    if let Ok(address) = std::env::var(CONTRACT_ADDRESS_ENV_VAR) {
        config.blockchain.contract_address = address;
    }
}

/// Load a configuration from a TOML file, overlay environment
/// credentials, and validate it.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config: GatewayConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build a configuration from defaults plus environment overrides.
///
/// Used when no config file is supplied; still fails fast if required
/// credentials are absent.
pub fn load_from_env() -> Result<GatewayConfig, ConfigError> {
    let mut config = GatewayConfig::default();
    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [pinning]
            api_key = "key"
            secret_api_key = "secret"

            [blockchain]
            contract_address = "0xAA31860aeAcdac1a9f536475b053EFc052d622DC"
            "#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.pinning.api_key, "key");
        assert_eq!(config.blockchain.chain_id, 11_155_111);
    }

    #[test]
    fn test_missing_file() {
        let result = load_config(Path::new("/nonexistent/gateway.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "this is not toml [").unwrap();
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_error_mentions_field() {
        // Empty file parses to defaults, which lack credentials.
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = load_config(file.path());
        match result {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.field == "blockchain.contract_address"));
            }
            // Environment may carry credentials in CI; accept a pass too.
            Ok(_) => {}
            Err(other) => panic!("unexpected error: {}", other),
        }
    }
}
