//! Block explorer subsystem.
//!
//! # Data Flow
//! ```text
//! transaction hash
//!     → fetcher.rs (GET <explorer>/tx/<hash>)
//!     → extract.rs (structural text matching over the HTML)
//!     → DecodeResult { decoded | not-found sentinel }
//! ```
//!
//! Independent of the upload/mint pipeline; a decode lookup may run
//! concurrently with a mint without shared mutable state.

pub mod extract;
pub mod fetcher;

pub use extract::{DecodedInput, DecodedInputExtractor, EtherscanExtractor, NOT_FOUND_TEXT};
pub use fetcher::{DecodeError, DecodeFetcher, DecodeResult};
