//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command-line flags / HELLO_HTTPD_* environment
//!     → loader.rs (clap parse → ServerConfig)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → handed to startup, listener and server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults matching the stock server
//! - Validation separates syntactic (clap) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigArgs, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, ServerConfig, ShutdownConfig, TimeoutConfig,
};
