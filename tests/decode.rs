//! Integration tests for transaction decode lookups.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

use mint_gateway::config::GatewayConfig;
use mint_gateway::explorer::{DecodeError, DecodeFetcher, DecodedInput, NOT_FOUND_TEXT};
use mint_gateway::{HttpServer, Shutdown};

mod common;

const TX_HASH: &str = "0xabc123abc123abc123abc123abc123abc123abc123abc123abc123abc123abcd";

const DECODED_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
<h2>Overview</h2>
<div>Status: Success</div>
<h2>More Details</h2>
<div>Function: mintNFT(address recipient, string tokenURI)</div>
<div>MethodID: 0x12345678</div>
</body>
</html>"#;

const STRUCTURELESS_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
<p>Sorry, we are unable to locate this transaction.</p>
</body>
</html>"#;

fn test_config(explorer_base: String) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.explorer.tx_base_url = explorer_base;
    config.explorer.timeout_secs = 2;
    config.pinning.api_key = "test-key".into();
    config.pinning.secret_api_key = "test-secret".into();
    config
}

async fn spawn_gateway(addr: SocketAddr, config: GatewayConfig) -> Shutdown {
    let shutdown = Shutdown::new();
    let listener = TcpListener::bind(addr).await.unwrap();
    let server = HttpServer::new(&config).unwrap();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });
    tokio::time::sleep(Duration::from_millis(200)).await;
    shutdown
}

#[tokio::test]
async fn test_decode_input_returns_extracted_text() {
    let explorer_addr: SocketAddr = "127.0.0.1:29421".parse().unwrap();
    let gateway_addr: SocketAddr = "127.0.0.1:29422".parse().unwrap();

    common::start_mock_backend(explorer_addr, 200, "text/html", DECODED_PAGE.into()).await;
    let _shutdown = spawn_gateway(
        gateway_addr,
        test_config(format!("http://{}/tx/", explorer_addr)),
    )
    .await;

    let response = common::test_client()
        .get(format!("http://{}/decode-input", gateway_addr))
        .query(&[("txHash", TX_HASH)])
        .send()
        .await
        .expect("gateway unreachable");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let decoded = body["decodedInput"].as_str().unwrap();
    assert!(decoded.contains("MethodID: 0x12345678"));
    assert!(decoded.contains("mintNFT"));
}

#[tokio::test]
async fn test_decode_input_without_structure_yields_sentinel() {
    let explorer_addr: SocketAddr = "127.0.0.1:29423".parse().unwrap();
    let gateway_addr: SocketAddr = "127.0.0.1:29424".parse().unwrap();

    common::start_mock_backend(explorer_addr, 200, "text/html", STRUCTURELESS_PAGE.into()).await;
    let _shutdown = spawn_gateway(
        gateway_addr,
        test_config(format!("http://{}/tx/", explorer_addr)),
    )
    .await;

    let response = common::test_client()
        .get(format!("http://{}/decode-input", gateway_addr))
        .query(&[("txHash", TX_HASH)])
        .send()
        .await
        .expect("gateway unreachable");

    // A page without the expected structure is a successful lookup
    // with the documented sentinel, not an error.
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["decodedInput"], NOT_FOUND_TEXT);
}

#[tokio::test]
async fn test_decode_input_requires_tx_hash() {
    let gateway_addr: SocketAddr = "127.0.0.1:29425".parse().unwrap();
    let _shutdown = spawn_gateway(
        gateway_addr,
        test_config("http://127.0.0.1:9/tx/".into()),
    )
    .await;

    for url in [
        format!("http://{}/decode-input", gateway_addr),
        format!("http://{}/decode-input?txHash=", gateway_addr),
    ] {
        let response = common::test_client()
            .get(url)
            .send()
            .await
            .expect("gateway unreachable");
        assert_eq!(response.status(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Transaction hash is required");
    }
}

#[tokio::test]
async fn test_explorer_failure_maps_to_500() {
    let explorer_addr: SocketAddr = "127.0.0.1:29426".parse().unwrap();
    let gateway_addr: SocketAddr = "127.0.0.1:29427".parse().unwrap();

    common::start_mock_backend(explorer_addr, 503, "text/html", "down".into()).await;
    let _shutdown = spawn_gateway(
        gateway_addr,
        test_config(format!("http://{}/tx/", explorer_addr)),
    )
    .await;

    let response = common::test_client()
        .get(format!("http://{}/decode-input", gateway_addr))
        .query(&[("txHash", TX_HASH)])
        .send()
        .await
        .expect("gateway unreachable");

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch data from Etherscan");
}

#[tokio::test]
async fn test_decode_is_idempotent() {
    let explorer_addr: SocketAddr = "127.0.0.1:29428".parse().unwrap();
    common::start_mock_backend(explorer_addr, 200, "text/html", DECODED_PAGE.into()).await;

    let config = test_config(format!("http://{}/tx/", explorer_addr));
    let fetcher = DecodeFetcher::new(&config.explorer).unwrap();

    let first = fetcher.decode(TX_HASH).await.unwrap();
    let second = fetcher.decode(TX_HASH).await.unwrap();
    assert_eq!(first, second);
    assert!(matches!(first.decoded, DecodedInput::Decoded(_)));
    assert_eq!(first.transaction_hash, TX_HASH);
}

#[tokio::test]
async fn test_unreachable_explorer_is_a_transport_error() {
    let config = test_config("http://127.0.0.1:9/tx/".into());
    let fetcher = DecodeFetcher::new(&config.explorer).unwrap();

    let err = fetcher.decode(TX_HASH).await.unwrap_err();
    assert!(matches!(err, DecodeError::Transport(_)));
}
