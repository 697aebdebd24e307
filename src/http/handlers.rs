//! Request handlers for the gateway endpoints.
//!
//! # Responsibilities
//! - `POST /upload`: multipart file → temp spool → pinning provider → CID
//! - `GET /decode-input`: transaction hash → explorer page → decoded text
//! - Map each subsystem condition to a status code and a JSON body
//!
//! # Design Decisions
//! - Provider error detail is logged, not forwarded to the caller
//! - Each request spools to its own uniquely named temp file; the file
//!   is removed when the guard drops, on success and failure alike

use axum::{
    body::Bytes,
    extract::{Multipart, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tempfile::NamedTempFile;

use crate::explorer::DecodeError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::storage::PinningError;

#[derive(Serialize)]
pub struct UploadResponse {
    pub cid: String,
}

#[derive(Serialize)]
pub struct DecodeResponse {
    #[serde(rename = "decodedInput")]
    pub decoded_input: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct ServiceStatus {
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Deserialize)]
pub struct DecodeQuery {
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Spool uploaded bytes to a per-request unique temp file.
///
/// The returned guard removes the file when dropped.
pub(crate) fn spool_to_temp(data: &[u8]) -> std::io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(data)?;
    file.flush()?;
    Ok(file)
}

/// `POST /upload`: pin exactly one multipart `file` field.
pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let request_id = request_id(&headers).to_string();

    let mut uploaded: Option<(String, Bytes)> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("file") {
                    continue;
                }
                let filename = field.file_name().unwrap_or("upload.bin").to_string();
                match field.bytes().await {
                    Ok(data) => {
                        uploaded = Some((filename, data));
                        break;
                    }
                    Err(e) => {
                        tracing::warn!(request_id = %request_id, error = %e, "Failed to read multipart field");
                        metrics::record_upload("failed");
                        return error_response(StatusCode::BAD_REQUEST, "File upload failed");
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(request_id = %request_id, error = %e, "Malformed multipart request");
                metrics::record_upload("failed");
                return error_response(StatusCode::BAD_REQUEST, "File upload failed");
            }
        }
    }

    let Some((filename, data)) = uploaded else {
        metrics::record_upload("no_file");
        return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
    };

    // Transient on-disk copy, unique per request; removed when the
    // guard drops on every path out of this function.
    let spool = match spool_to_temp(&data) {
        Ok(file) => file,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to spool upload to disk");
            metrics::record_upload("failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "File upload failed");
        }
    };

    let file_bytes = match tokio::fs::read(spool.path()).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to read spooled upload");
            metrics::record_upload("failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "File upload failed");
        }
    };

    let result = state.pinning.pin(file_bytes, &filename).await;
    drop(spool);

    match result {
        Ok(pinned) => {
            tracing::info!(request_id = %request_id, cid = %pinned.cid, "Upload pinned");
            metrics::record_upload("pinned");
            (StatusCode::OK, Json(UploadResponse { cid: pinned.cid })).into_response()
        }
        Err(PinningError::EmptyFile) => {
            metrics::record_upload("failed");
            error_response(StatusCode::BAD_REQUEST, "Empty file uploaded")
        }
        Err(e) => {
            // Provider detail stays in the logs; the caller gets a
            // generic failure.
            tracing::error!(request_id = %request_id, error = %e, "Pinning failed");
            metrics::record_upload("failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Pinata upload failed")
        }
    }
}

/// `GET /decode-input?txHash=<hash>`: decoded call data for a transaction.
pub async fn decode_input(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DecodeQuery>,
) -> Response {
    let request_id = request_id(&headers).to_string();

    let Some(tx_hash) = query.tx_hash.filter(|h| !h.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "Transaction hash is required");
    };

    match state.fetcher.decode(&tx_hash).await {
        Ok(result) => (
            StatusCode::OK,
            Json(DecodeResponse {
                decoded_input: result.decoded.to_string(),
            }),
        )
            .into_response(),
        Err(DecodeError::EmptyHash) => {
            error_response(StatusCode::BAD_REQUEST, "Transaction hash is required")
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, tx_hash = %tx_hash, error = %e, "Explorer fetch failed");
            metrics::record_decode("failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch data from Etherscan",
            )
        }
    }
}

/// `GET /health`: liveness probe.
pub async fn health() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}
