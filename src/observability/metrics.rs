//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_uploads_total` (counter): upload outcomes by result
//! - `gateway_mints_total` (counter): mint outcomes by result
//! - `gateway_decodes_total` (counter): decode outcomes by result
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic increments)
//! - The Prometheus exporter is optional; recorders are no-ops when it
//!   is not installed

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus exporter on the given address.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of an upload request ("pinned", "no_file", "failed").
pub fn record_upload(outcome: &'static str) {
    counter!("gateway_uploads_total", "outcome" => outcome).increment(1);
}

/// Record the outcome of a mint ("confirmed", "failed", "timeout").
pub fn record_mint(outcome: &'static str) {
    counter!("gateway_mints_total", "outcome" => outcome).increment(1);
}

/// Record the outcome of a decode lookup ("found", "not_found", "failed").
pub fn record_decode(outcome: &'static str) {
    counter!("gateway_decodes_total", "outcome" => outcome).increment(1);
}
