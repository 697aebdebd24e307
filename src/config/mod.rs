//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment credential overlay)
//!     → validation.rs (semantic checks, fail fast)
//!     → GatewayConfig (validated, immutable)
//!     → passed by reference to client constructors
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the pipeline is stateless so
//!   there is no reload path
//! - All fields have defaults to allow minimal configs
//! - Credentials come from the environment and are required at
//!   startup, never at first use

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::{
    BlockchainConfig, ExplorerConfig, GatewayConfig, ListenerConfig, ObservabilityConfig,
    PinningConfig, TimeoutConfig,
};
