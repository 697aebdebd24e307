//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Fail fast on missing credentials and contract address
//! - Validate value ranges (timeouts > 0) and URL shapes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs at startup, before any client is constructed

use alloy::primitives::Address;

use crate::config::schema::GatewayConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "pinning.api_key").
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn err(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Validate a loaded configuration, collecting every failure.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(err(
            "listener.bind_address",
            format!("not a socket address: '{}'", config.listener.bind_address),
        ));
    }

    if config.pinning.api_key.is_empty() {
        errors.push(err(
            "pinning.api_key",
            "missing; set PINATA_API_KEY or provide it in the config file",
        ));
    }
    if config.pinning.secret_api_key.is_empty() {
        errors.push(err(
            "pinning.secret_api_key",
            "missing; set PINATA_SECRET_API_KEY or provide it in the config file",
        ));
    }
    if config.pinning.endpoint.parse::<url::Url>().is_err() {
        errors.push(err(
            "pinning.endpoint",
            format!("not a valid URL: '{}'", config.pinning.endpoint),
        ));
    }
    if config.pinning.timeout_secs == 0 {
        errors.push(err("pinning.timeout_secs", "must be greater than zero"));
    }

    if config.blockchain.rpc_url.parse::<url::Url>().is_err() {
        errors.push(err(
            "blockchain.rpc_url",
            format!("not a valid URL: '{}'", config.blockchain.rpc_url),
        ));
    }
    if config.blockchain.chain_id == 0 {
        errors.push(err("blockchain.chain_id", "must be non-zero"));
    }
    if config.blockchain.contract_address.is_empty() {
        errors.push(err("blockchain.contract_address", "missing"));
    } else if config.blockchain.contract_address.parse::<Address>().is_err() {
        errors.push(err(
            "blockchain.contract_address",
            format!("not a valid address: '{}'", config.blockchain.contract_address),
        ));
    }
    if config.blockchain.rpc_timeout_secs == 0 {
        errors.push(err("blockchain.rpc_timeout_secs", "must be greater than zero"));
    }
    if config.blockchain.mint_timeout_secs == 0 {
        errors.push(err("blockchain.mint_timeout_secs", "must be greater than zero"));
    }
    if config.blockchain.gas_price_multiplier < 1.0 {
        errors.push(err(
            "blockchain.gas_price_multiplier",
            "must be at least 1.0",
        ));
    }

    if config.explorer.tx_base_url.parse::<url::Url>().is_err() {
        errors.push(err(
            "explorer.tx_base_url",
            format!("not a valid URL: '{}'", config.explorer.tx_base_url),
        ));
    }
    if config.explorer.timeout_secs == 0 {
        errors.push(err("explorer.timeout_secs", "must be greater than zero"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(err("timeouts.request_secs", "must be greater than zero"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
