//! Transaction decode retrieval from the block explorer.
//!
//! # Responsibilities
//! - Fetch the rendered explorer page for a transaction over plain GET
//! - Delegate structural extraction to the configured extractor
//! - Distinguish transport failures from the normal not-found outcome

use std::time::Duration;
use thiserror::Error;

use crate::config::ExplorerConfig;
use crate::explorer::extract::{DecodedInput, DecodedInputExtractor, EtherscanExtractor};
use crate::observability::metrics;

/// Errors raised by a decode lookup. Only transport-level problems are
/// errors; a page with unexpected structure yields a not-found result.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No transaction hash was supplied.
    #[error("transaction hash must not be empty")]
    EmptyHash,

    /// The explorer could not be reached or the request failed in transit.
    #[error("explorer request failed: {0}")]
    Transport(String),

    /// The explorer responded with a non-2xx status.
    #[error("explorer returned status {0}")]
    Status(u16),
}

/// Result of a decode lookup, keyed by the transaction hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult {
    pub transaction_hash: String,
    pub decoded: DecodedInput,
}

/// Fetcher for explorer transaction pages.
pub struct DecodeFetcher {
    client: reqwest::Client,
    tx_base_url: String,
    extractor: Box<dyn DecodedInputExtractor>,
}

impl DecodeFetcher {
    /// Create a fetcher with the default Etherscan-style extractor.
    pub fn new(config: &ExplorerConfig) -> Result<Self, DecodeError> {
        Self::with_extractor(config, Box::new(EtherscanExtractor))
    }

    /// Create a fetcher with a custom page extractor.
    pub fn with_extractor(
        config: &ExplorerConfig,
        extractor: Box<dyn DecodedInputExtractor>,
    ) -> Result<Self, DecodeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DecodeError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            tx_base_url: config.tx_base_url.clone(),
            extractor,
        })
    }

    /// Fetch and decode the call data for a transaction.
    ///
    /// No hash format validation beyond non-empty: a malformed hash
    /// simply produces a not-found page at the explorer.
    pub async fn decode(&self, tx_hash: &str) -> Result<DecodeResult, DecodeError> {
        if tx_hash.trim().is_empty() {
            return Err(DecodeError::EmptyHash);
        }

        let url = format!("{}{}", self.tx_base_url, tx_hash);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DecodeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DecodeError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DecodeError::Transport(e.to_string()))?;

        let decoded = match self.extractor.extract(&body) {
            Some(text) => DecodedInput::Decoded(text),
            None => DecodedInput::NotFound,
        };

        metrics::record_decode(if decoded.is_found() { "found" } else { "not_found" });
        tracing::debug!(
            tx_hash = tx_hash,
            found = decoded.is_found(),
            "Decode lookup completed"
        );

        Ok(DecodeResult {
            transaction_hash: tx_hash.to_string(),
            decoded,
        })
    }
}

impl std::fmt::Debug for DecodeFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodeFetcher")
            .field("tx_base_url", &self.tx_base_url)
            .finish()
    }
}
