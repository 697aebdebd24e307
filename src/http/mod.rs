//! HTTP boundary service.
//!
//! # Responsibilities
//! - Expose the upload gateway (`POST /upload`) and the decode lookup
//!   (`GET /decode-input`)
//! - Translate subsystem errors into HTTP statuses: client errors to
//!   4xx, provider/network failures to 5xx
//! - Wire up middleware (timeout, tracing, CORS, request IDs)

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer, ServerError};
