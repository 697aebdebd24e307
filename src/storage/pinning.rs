//! Pinning client for the content-addressed storage provider.
//!
//! # Responsibilities
//! - Transmit file content plus display metadata over an authenticated
//!   multipart request
//! - Request CIDv1 addressing from the provider
//! - Surface provider rejections with their error detail

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::PinningConfig;

/// Errors that can occur while pinning a file.
#[derive(Debug, Error)]
pub enum PinningError {
    /// The file to pin was empty.
    #[error("refusing to pin an empty file")]
    EmptyFile,

    /// Credentials could not be encoded as request headers.
    #[error("invalid pinning credentials: {0}")]
    Credentials(String),

    /// The provider could not be reached or the request failed in transit.
    #[error("pinning request failed: {0}")]
    Transport(String),

    /// The provider rejected the upload (non-2xx response).
    #[error("pinning provider rejected upload: {0}")]
    Provider(String),

    /// The provider responded 2xx but the body was not usable.
    #[error("malformed pinning response: {0}")]
    MalformedResponse(String),
}

/// Result of a successful pin: the content identifier, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinResult {
    pub cid: String,
}

/// Response body from the pinning endpoint.
#[derive(Debug, Deserialize)]
struct PinningResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

/// Client for the remote pinning service.
///
/// Stateless between calls; credentials are baked into the underlying
/// HTTP client as default headers at construction time.
#[derive(Debug, Clone)]
pub struct PinningClient {
    client: reqwest::Client,
    endpoint: String,
}

impl PinningClient {
    /// Create a new pinning client from validated configuration.
    pub fn new(config: &PinningConfig) -> Result<Self, PinningError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "pinata_api_key",
            HeaderValue::from_str(&config.api_key)
                .map_err(|e| PinningError::Credentials(e.to_string()))?,
        );
        headers.insert(
            "pinata_secret_api_key",
            HeaderValue::from_str(&config.secret_api_key)
                .map_err(|e| PinningError::Credentials(e.to_string()))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PinningError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Pin a file and return its content identifier.
    ///
    /// The filename is used only as display metadata at the provider.
    pub async fn pin(&self, file_bytes: Vec<u8>, filename: &str) -> Result<PinResult, PinningError> {
        if file_bytes.is_empty() {
            return Err(PinningError::EmptyFile);
        }

        let metadata = serde_json::json!({ "name": filename }).to_string();
        let options = serde_json::json!({ "cidVersion": 1 }).to_string();

        let file_part = multipart::Part::bytes(file_bytes).file_name(filename.to_string());
        let form = multipart::Form::new()
            .part("file", file_part)
            .text("pinataMetadata", metadata)
            .text("pinataOptions", options);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PinningError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(PinningError::Provider(format!(
                "status {}: {}",
                status, detail
            )));
        }

        let body: PinningResponse = response
            .json()
            .await
            .map_err(|e| PinningError::MalformedResponse(e.to_string()))?;

        if body.ipfs_hash.is_empty() {
            return Err(PinningError::MalformedResponse(
                "provider returned an empty CID".to_string(),
            ));
        }

        tracing::info!(cid = %body.ipfs_hash, filename = filename, "File pinned");

        Ok(PinResult {
            cid: body.ipfs_hash,
        })
    }
}
