//! Asset minting orchestration.
//!
//! # Responsibilities
//! - Validate the mint request before anything touches the network
//! - Build the token URI from the CID and encode the mint call
//! - Submit the signed transaction through the configured RPC endpoint
//! - Suspend until inclusion is observed, bounded by `mint_timeout_secs`
//!
//! # Design Decisions
//! - A receipt is only ever returned post-inclusion
//! - Nothing is retried automatically; the caller restarts the whole
//!   pipeline from file selection if it wants another attempt
//! - An exceeded inclusion wait is reported distinctly from a failed
//!   mint, since the transaction may still land later

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::SolCall;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::blockchain::client::ChainClient;
use crate::blockchain::types::{MintError, MintReceipt, MintRequest, MintResult};
use crate::blockchain::wallet::Wallet;
use crate::observability::metrics;

sol! {
    /// Minting entry point of the pre-deployed contract.
    function mintNFT(address recipient, string tokenURI) returns (uint256);
}

/// URI scheme prefixed to the CID to form the token URI.
pub const TOKEN_URI_SCHEME: &str = "ipfs://";

/// Build the token URI for a pinned CID.
pub fn token_uri(cid: &str) -> String {
    format!("{}{}", TOKEN_URI_SCHEME, cid)
}

/// Orchestrator for mint transactions against the configured contract.
pub struct Minter {
    client: ChainClient,
    wallet: Wallet,
    /// Provider with the wallet attached for signing and gas filling.
    signing_provider: Arc<dyn Provider + Send + Sync>,
    contract: Address,
}

impl Minter {
    /// Create a new minter for a ready-to-sign wallet.
    pub fn new(client: ChainClient, wallet: Wallet) -> MintResult<Self> {
        let config = client.config();

        let contract: Address = config.contract_address.parse().map_err(|e| {
            MintError::InvalidRequest(format!(
                "invalid contract address '{}': {}",
                config.contract_address, e
            ))
        })?;

        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            MintError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let signing_provider = Arc::new(
            ProviderBuilder::new()
                .wallet(wallet.to_ethereum_wallet())
                .connect_http(url),
        ) as Arc<dyn Provider + Send + Sync>;

        tracing::info!(
            contract = %contract,
            signer = %wallet.address(),
            "Minter initialized"
        );

        Ok(Self {
            client,
            wallet,
            signing_provider,
            contract,
        })
    }

    /// Mint a token for a pinned CID and wait for inclusion.
    ///
    /// This is the single suspension point of the pipeline; it blocks
    /// cooperatively until the transaction is included or the
    /// configured wait bound is exceeded.
    pub async fn mint(&self, request: &MintRequest) -> MintResult<MintReceipt> {
        let result = self.mint_inner(request).await;
        match &result {
            Ok(_) => metrics::record_mint("confirmed"),
            Err(MintError::InclusionTimeout { .. }) => metrics::record_mint("timeout"),
            Err(_) => metrics::record_mint("failed"),
        }
        result
    }

    async fn mint_inner(&self, request: &MintRequest) -> MintResult<MintReceipt> {
        if request.cid.trim().is_empty() {
            return Err(MintError::InvalidRequest("CID must not be empty".to_string()));
        }
        let recipient: Address = request.recipient.parse().map_err(|e| {
            MintError::InvalidRequest(format!(
                "malformed recipient address '{}': {}",
                request.recipient, e
            ))
        })?;

        let uri = token_uri(&request.cid);

        self.client.verify_chain_id().await?;

        // Gas preflight against the configured ceiling.
        let config = self.client.config();
        let gas_price = self.client.get_gas_price().await?;
        let gas_price_gwei = gas_price / 1_000_000_000;
        if gas_price_gwei > config.max_gas_price_gwei as u128 {
            return Err(MintError::GasPriceTooHigh {
                current_gwei: gas_price_gwei as u64,
                max_gwei: config.max_gas_price_gwei,
            });
        }
        let adjusted_gas_price = (gas_price as f64 * config.gas_price_multiplier) as u128;

        // Sync the wallet nonce with the chain before submitting.
        let chain_nonce = self
            .client
            .get_transaction_count(self.wallet.address())
            .await?;
        self.wallet.set_nonce(chain_nonce);
        let nonce = self.wallet.get_and_increment_nonce();

        let call = mintNFTCall {
            recipient,
            tokenURI: uri.clone(),
        };
        let data = Bytes::from(call.abi_encode());

        // Gas limit is left to the provider's estimation filler.
        let tx = TransactionRequest::default()
            .with_to(self.contract)
            .with_input(data)
            .with_nonce(nonce)
            .with_gas_price(adjusted_gas_price)
            .with_chain_id(self.wallet.chain_id());

        let pending = self
            .signing_provider
            .send_transaction(tx)
            .await
            .map_err(|e| {
                let detail = e.to_string();
                if detail.to_lowercase().contains("revert") {
                    MintError::Reverted(detail)
                } else {
                    MintError::Submission(detail)
                }
            })?;
        let tx_hash = *pending.tx_hash();

        tracing::info!(
            tx_hash = %tx_hash,
            recipient = %recipient,
            token_uri = %uri,
            "Mint transaction submitted"
        );

        let block_number = self.wait_for_inclusion(tx_hash).await?;

        tracing::info!(
            tx_hash = %tx_hash,
            block_number = block_number,
            "Mint transaction included"
        );

        Ok(MintReceipt::confirmed(tx_hash.to_string()))
    }

    /// Poll receipts until the transaction reaches the required block
    /// depth, bounded by the configured inclusion wait.
    async fn wait_for_inclusion(&self, tx_hash: TxHash) -> MintResult<u64> {
        let required_confirmations = self.client.confirmation_blocks();
        let timeout_secs = self.client.config().mint_timeout_secs;
        let poll_interval = Duration::from_secs(2);

        let result = timeout(Duration::from_secs(timeout_secs), async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Err(MintError::Reverted(format!(
                        "transaction {} reverted on-chain",
                        tx_hash
                    )));
                }

                let current_block = self.client.get_block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                let confirmations = current_block.saturating_sub(tx_block) as u32;

                if confirmations >= required_confirmations {
                    return Ok(tx_block);
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = confirmations,
                    required = required_confirmations,
                    "Waiting for confirmations"
                );
            }
        })
        .await;

        match result {
            Ok(outcome) => outcome,
            Err(_) => Err(MintError::InclusionTimeout {
                tx_hash: tx_hash.to_string(),
                timeout_secs,
            }),
        }
    }

    /// Get the signing wallet address.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }
}
