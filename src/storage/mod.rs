//! Content-addressed storage subsystem.
//!
//! # Data Flow
//! ```text
//! raw file bytes + display filename
//!     → pinning.rs (authenticated multipart request)
//!     → pinning provider (content-addressed storage network)
//!     → PinResult { cid } consumed verbatim by the mint orchestrator
//! ```
//!
//! # Design Decisions
//! - Credentials are fixed headers set once at construction, never per call
//! - The client is stateless between calls
//! - The CID is returned exactly as the provider reports it

pub mod pinning;

pub use pinning::{PinResult, PinningClient, PinningError};
