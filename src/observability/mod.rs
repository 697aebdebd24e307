//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (pin/mint/decode outcome counters)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request IDs flow through handler logs
//! - Metrics are cheap (atomic increments) and optional
//! - Every external-system failure is logged with enough detail to
//!   name which system failed

pub mod logging;
pub mod metrics;
