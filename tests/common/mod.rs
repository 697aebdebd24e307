//! Shared utilities for integration testing.
//!
//! Raw TCP mock backends standing in for the pinning provider and the
//! block explorer. Each backend reads the full request (headers plus
//! Content-Length body) before answering, so multipart POSTs complete
//! cleanly.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        400 => "400 Bad Request",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Read one HTTP request: headers, then Content-Length bytes of body.
async fn read_request(socket: &mut TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        match timeout(Duration::from_millis(500), socket.read(&mut chunk)).await {
            Ok(Ok(0)) => break,
            Ok(Ok(n)) => {
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
                    let headers = String::from_utf8_lossy(&buf[..pos]).to_string();
                    let content_length = headers
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            if name.eq_ignore_ascii_case("content-length") {
                                value.trim().parse::<usize>().ok()
                            } else {
                                None
                            }
                        })
                        .unwrap_or(0);
                    if buf.len() - (pos + 4) >= content_length {
                        break;
                    }
                }
            }
            _ => break,
        }
    }

    buf
}

/// Start a mock backend that answers every request with a fixed response.
pub async fn start_mock_backend(
    addr: SocketAddr,
    status: u16,
    content_type: &'static str,
    body: String,
) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let body = body.clone();
                    tokio::spawn(async move {
                        read_request(&mut socket).await;
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text(status),
                            content_type,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

const RPC_TX_HASH: &str = "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b";
const RPC_BLOCK_HASH: &str =
    "0x1d59ff54b1eb26b013ce3cb5fc9dab3705b415a67127a003c3e61eb445bb8df2";

fn rpc_result(
    method: &str,
    gas_price: &'static str,
    receipt_status: &'static str,
) -> serde_json::Value {
    match method {
        // Anvil's default chain ID (31337).
        "eth_chainId" => serde_json::json!("0x7a69"),
        "eth_gasPrice" => serde_json::json!(gas_price),
        "eth_getTransactionCount" => serde_json::json!("0x0"),
        "eth_estimateGas" => serde_json::json!("0x186a0"),
        "eth_sendRawTransaction" => serde_json::json!(RPC_TX_HASH),
        "eth_blockNumber" => serde_json::json!("0x11"),
        // Mined one block behind the head, so a single confirmation
        // is already in place when the first poll lands.
        "eth_getTransactionReceipt" => serde_json::json!({
            "transactionHash": RPC_TX_HASH,
            "transactionIndex": "0x0",
            "blockHash": RPC_BLOCK_HASH,
            "blockNumber": "0x10",
            "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
            "to": "0xaa31860aeacdac1a9f536475b053efc052d622dc",
            "contractAddress": null,
            "gasUsed": "0x186a0",
            "cumulativeGasUsed": "0x186a0",
            "effectiveGasPrice": "0x3b9aca00",
            "logs": [],
            "logsBloom": format!("0x{}", "0".repeat(512)),
            "status": receipt_status,
            "type": "0x0"
        }),
        _ => serde_json::Value::Null,
    }
}

/// Start a mock JSON-RPC node answering the methods the mint path uses.
///
/// `gas_price` is the hex wei value reported by `eth_gasPrice`;
/// `receipt_status` is "0x1" for a mined transaction or "0x0" for one
/// that reverted on-chain.
#[allow(dead_code)]
pub async fn start_mock_rpc(
    addr: SocketAddr,
    gas_price: &'static str,
    receipt_status: &'static str,
) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let request = read_request(&mut socket).await;
                        let body_start = find_subsequence(&request, b"\r\n\r\n")
                            .map(|pos| pos + 4)
                            .unwrap_or(request.len());
                        let call: serde_json::Value =
                            serde_json::from_slice(&request[body_start..])
                                .unwrap_or(serde_json::Value::Null);
                        let id = call.get("id").cloned().unwrap_or(serde_json::json!(1));
                        let method = call.get("method").and_then(|m| m.as_str()).unwrap_or("");

                        let body = serde_json::json!({
                            "jsonrpc": "2.0",
                            "id": id,
                            "result": rpc_result(method, gas_price, receipt_status),
                        })
                        .to_string();
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Build a reqwest client that bypasses any ambient proxy settings.
#[allow(dead_code)]
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
