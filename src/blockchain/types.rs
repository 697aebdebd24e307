//! Mint-specific types and error definitions.

use thiserror::Error;

/// A validated-on-construction request to mint one token.
///
/// The `cid` is embedded verbatim into the token URI; the recipient is
/// parsed into a checksummed address before any network call so
/// malformed input never reaches the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    /// Recipient account identifier (0x-prefixed hex).
    pub recipient: String,
    /// Content identifier returned by the pinning provider.
    pub cid: String,
}

/// Receipt for a mint that has been observed included in a block.
///
/// Only constructed post-inclusion; `confirmed` is always true on a
/// receipt returned by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    pub transaction_hash: String,
    pub confirmed: bool,
}

impl MintReceipt {
    /// Build a receipt for a transaction whose inclusion was observed.
    pub fn confirmed(transaction_hash: String) -> Self {
        Self {
            transaction_hash,
            confirmed: true,
        }
    }
}

/// Errors that can occur during mint orchestration.
#[derive(Debug, Error)]
pub enum MintError {
    /// The request failed validation before submission.
    #[error("invalid mint request: {0}")]
    InvalidRequest(String),

    /// RPC connection or query failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Private key loading or signing failed.
    #[error("wallet error: {0}")]
    Wallet(String),

    /// The signed transaction could not be submitted to the network.
    #[error("transaction submission failed: {0}")]
    Submission(String),

    /// The transaction executed and reverted on-chain.
    #[error("transaction reverted: {0}")]
    Reverted(String),

    /// Gas price exceeded the configured ceiling.
    #[error("gas price {current_gwei} gwei exceeds maximum {max_gwei} gwei")]
    GasPriceTooHigh { current_gwei: u64, max_gwei: u64 },

    /// The inclusion wait exceeded its bound. The transaction was
    /// submitted and may still be included later; this is distinct
    /// from a failed mint.
    #[error("transaction {tx_hash} not included within {timeout_secs}s")]
    InclusionTimeout { tx_hash: String, timeout_secs: u64 },

    /// Connected chain does not match configuration.
    #[error("chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for mint operations.
pub type MintResult<T> = Result<T, MintError>;
