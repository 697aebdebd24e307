//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the configured JSON-RPC endpoint
//! - Query chain state (block number, nonces, gas price, receipts)
//! - Apply a timeout to every RPC call

use alloy::primitives::{Address, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;
use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{MintError, MintResult};
use crate::config::BlockchainConfig;

/// RPC client wrapper for the configured network endpoint.
#[derive(Clone)]
pub struct ChainClient {
    provider: Arc<dyn Provider + Send + Sync>,
    config: BlockchainConfig,
    timeout_duration: Duration,
}

impl ChainClient {
    /// Create a new chain client from validated configuration.
    pub fn new(config: BlockchainConfig) -> MintResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            MintError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;

        let provider =
            Arc::new(ProviderBuilder::new().connect_http(url)) as Arc<dyn Provider + Send + Sync>;

        tracing::info!(
            rpc_url = %config.rpc_url,
            chain_id = config.chain_id,
            "Chain client initialized"
        );

        Ok(Self {
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
            provider,
            config,
        })
    }

    async fn query<T, E, F>(&self, what: &str, fut: F) -> MintResult<T>
    where
        F: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(MintError::Rpc(format!("{}: {}", what, e))),
            Err(_) => Err(MintError::Rpc(format!(
                "{}: timeout after {}s",
                what, self.config.rpc_timeout_secs
            ))),
        }
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> MintResult<()> {
        let actual = self.query("get_chain_id", self.provider.get_chain_id()).await?;
        if actual != self.config.chain_id {
            return Err(MintError::ChainMismatch {
                expected: self.config.chain_id,
                actual,
            });
        }
        Ok(())
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> MintResult<u64> {
        self.query("get_block_number", self.provider.get_block_number())
            .await
    }

    /// Get the transaction count (nonce) for an address.
    pub async fn get_transaction_count(&self, address: Address) -> MintResult<u64> {
        self.query(
            "get_transaction_count",
            self.provider.get_transaction_count(address).into_future(),
        )
        .await
    }

    /// Get the current gas price in wei.
    pub async fn get_gas_price(&self) -> MintResult<u128> {
        self.query("get_gas_price", self.provider.get_gas_price())
            .await
    }

    /// Get a transaction receipt by hash, if one exists yet.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> MintResult<Option<TransactionReceipt>> {
        self.query(
            "get_transaction_receipt",
            self.provider.get_transaction_receipt(tx_hash),
        )
        .await
    }

    /// Get the configuration.
    pub fn config(&self) -> &BlockchainConfig {
        &self.config
    }

    /// Get the number of confirmation blocks required for inclusion.
    pub fn confirmation_blocks(&self) -> u32 {
        self.config.confirmation_blocks
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
