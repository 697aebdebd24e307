//! Mint Gateway Library
//!
//! Turns an arbitrary file into a content-addressed, blockchain-recorded
//! asset: pin to a storage network, mint the CID as an NFT, and decode
//! recorded transactions via a block-explorer lookup.

pub mod blockchain;
pub mod config;
pub mod explorer;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod storage;
pub mod workflow;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
