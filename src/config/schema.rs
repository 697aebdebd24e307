//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. All types derive Serde traits for deserialization from
//! config files; credentials may additionally be supplied through
//! environment variables (see `loader`).

use serde::{Deserialize, Serialize};

/// Root configuration for the mint gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Pinning provider settings (endpoint, credentials).
    pub pinning: PinningConfig,

    /// Blockchain network and mint contract settings.
    pub blockchain: BlockchainConfig,

    /// Block explorer settings for decode lookups.
    pub explorer: ExplorerConfig,

    /// Timeout configuration for inbound requests.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Pinning provider configuration.
///
/// Credentials are sent as two static headers on every pin request.
/// They are normally injected from the `PINATA_API_KEY` and
/// `PINATA_SECRET_API_KEY` environment variables rather than written
/// into a config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PinningConfig {
    /// Pinning endpoint URL.
    pub endpoint: String,

    /// API key header value.
    pub api_key: String,

    /// Secret API key header value.
    pub secret_api_key: String,

    /// Outbound request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for PinningConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.pinata.cloud/pinning/pinFileToIPFS".to_string(),
            api_key: String::new(),
            secret_api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

/// Blockchain network and mint contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Chain ID (11155111 for Sepolia, 31337 for local Anvil).
    pub chain_id: u64,

    /// Address of the deployed mint contract.
    pub contract_address: String,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations required for inclusion.
    pub confirmation_blocks: u32,

    /// Upper bound on the inclusion wait, in seconds. Exceeding it is
    /// reported distinctly from a failed mint: the transaction may
    /// still land later.
    pub mint_timeout_secs: u64,

    /// Gas price multiplier (1.0 = estimated, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 11_155_111,
            contract_address: String::new(),
            rpc_timeout_secs: 10,
            confirmation_blocks: 1,
            mint_timeout_secs: 180,
            gas_price_multiplier: 1.2,
            max_gas_price_gwei: 500,
        }
    }
}

/// Block explorer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Base URL for transaction pages; the hash is appended verbatim.
    pub tx_base_url: String,

    /// Outbound request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            tx_base_url: "https://sepolia.etherscan.io/tx/".to_string(),
            timeout_secs: 15,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 60 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics exporter.
    pub metrics_enabled: bool,

    /// Metrics exporter listen address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
