//! Process lifecycle management.
//!
//! # Design Decisions
//! - Shutdown is broadcast so the server and any helper tasks observe
//!   it independently
//! - Abandoning the inclusion wait does not withdraw a submitted
//!   transaction; its fate on-chain is independent of this process

pub mod shutdown;

pub use shutdown::Shutdown;
