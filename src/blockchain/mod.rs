//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment variable (private key)
//!     → wallet.rs (key loading, signing identity)
//!     → client.rs (RPC connection with timeouts)
//!     → minter.rs (validate, encode mintNFT call, submit, await inclusion)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts
//! - Malformed recipients are rejected before any network call

pub mod client;
pub mod minter;
pub mod types;
pub mod wallet;

pub use client::ChainClient;
pub use minter::{token_uri, Minter};
pub use types::{MintError, MintReceipt, MintRequest, MintResult};
pub use wallet::Wallet;
