use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mint_gateway::blockchain::{ChainClient, Minter, Wallet};
use mint_gateway::config::{load_config, load_from_env, GatewayConfig};
use mint_gateway::workflow::{MintWorkflow, PipelineDriver};

#[derive(Parser)]
#[command(name = "mint-cli")]
#[command(about = "Drive the upload-and-mint workflow against a running gateway", long_about = None)]
struct Cli {
    /// Base URL of the running gateway.
    #[arg(short, long, default_value = "http://localhost:5000")]
    gateway: String,

    /// Path to a TOML config file; defaults plus environment
    /// variables are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pin a file through the gateway and mint it as an NFT
    UploadAndMint {
        /// File to upload and mint
        file: PathBuf,
        /// Recipient address; defaults to the signing wallet's address
        #[arg(short, long)]
        recipient: Option<String>,
    },
    /// Look up decoded call data for a transaction hash
    Decode {
        /// Transaction hash to decode
        tx_hash: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::UploadAndMint { file, recipient } => {
            let config = load_cli_config(cli.config.as_deref())?;
            let wallet = Wallet::from_env(config.blockchain.chain_id)?;
            let recipient = recipient.unwrap_or_else(|| wallet.address().to_string());

            let client = ChainClient::new(config.blockchain.clone())?;
            let minter = Minter::new(client, wallet)?;
            let driver = PipelineDriver::new(cli.gateway, minter);

            let filename = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload.bin".to_string());
            let bytes = std::fs::read(&file)?;

            let mut workflow = MintWorkflow::new();
            workflow.connect_identity(&recipient)?;
            workflow.select_file(&filename, bytes)?;

            let outcome = driver.upload_and_mint(&mut workflow).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "cid": outcome.cid,
                    "tokenURI": mint_gateway::blockchain::token_uri(&outcome.cid),
                    "transactionHash": outcome.receipt.transaction_hash,
                    "confirmed": outcome.receipt.confirmed,
                }))?
            );
        }
        Commands::Decode { tx_hash } => {
            let client = reqwest::Client::new();
            let response = client
                .get(format!(
                    "{}/decode-input",
                    cli.gateway.trim_end_matches('/')
                ))
                .query(&[("txHash", tx_hash.as_str())])
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                eprintln!("Error: gateway returned status {}", status);
                if let Ok(text) = response.text().await {
                    eprintln!("Response: {}", text);
                }
                return Ok(());
            }

            let json: serde_json::Value = response.json().await?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

fn load_cli_config(path: Option<&std::path::Path>) -> Result<GatewayConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(p) => load_config(p)?,
        None => load_from_env()?,
    };
    Ok(config)
}
