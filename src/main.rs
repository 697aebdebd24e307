//! Mint Gateway
//!
//! HTTP boundary service for the upload–pin–mint pipeline.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────┐
//!                     │                 MINT GATEWAY                  │
//!                     │                                               │
//!  POST /upload ──────┼─▶ http/handlers ──▶ storage/pinning ──────────┼──▶ pinning provider
//!                     │        │                  │                   │
//!                     │        ◀──────── { cid } ◀┘                   │
//!                     │                                               │
//!  GET /decode-input ─┼─▶ http/handlers ──▶ explorer/fetcher ─────────┼──▶ block explorer
//!                     │                          │                    │
//!                     │              explorer/extract (heuristic)     │
//!                     │                                               │
//!  mint-cli ──────────┼─▶ workflow/controller ──▶ blockchain/minter ──┼──▶ JSON-RPC endpoint
//!                     │                                               │
//!                     │  ┌─────────────────────────────────────────┐  │
//!                     │  │          Cross-Cutting Concerns         │  │
//!                     │  │  config │ observability │ lifecycle     │  │
//!                     │  └─────────────────────────────────────────┘  │
//!                     └───────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use mint_gateway::config::{load_config, load_from_env};
use mint_gateway::lifecycle::Shutdown;
use mint_gateway::observability;
use mint_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "mint-gateway")]
#[command(about = "Upload gateway and decode service for NFT minting", long_about = None)]
struct Args {
    /// Path to a TOML config file; defaults plus environment
    /// variables are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::logging::init();

    let args = Args::parse();

    // Required credentials are checked here, never at first use.
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => load_from_env()?,
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        pinning_endpoint = %config.pinning.endpoint,
        chain_id = config.blockchain.chain_id,
        explorer = %config.explorer.tx_base_url,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
