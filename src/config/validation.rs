//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (clap handles syntactic)
//! - Validate value ranges (backlog > 0, timeouts > 0)
//! - Check the log filter parses before logging is installed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>

use tracing_subscriber::EnvFilter;

use crate::config::schema::ServerConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("host `{0}` is not an IP address")]
    InvalidHost(String),
    #[error("backlog must be greater than zero")]
    ZeroBacklog,
    #[error("max_connections must be greater than zero")]
    ZeroMaxConnections,
    #[error("header read timeout must be greater than zero")]
    ZeroHeaderReadTimeout,
    #[error("invalid log level `{level}`: {reason}")]
    InvalidLogLevel { level: String, reason: String },
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.socket_addr().is_none() {
        errors.push(ValidationError::InvalidHost(config.listener.host.clone()));
    }
    if config.listener.backlog == 0 {
        errors.push(ValidationError::ZeroBacklog);
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::ZeroMaxConnections);
    }
    if config.timeouts.header_read_secs == 0 {
        errors.push(ValidationError::ZeroHeaderReadTimeout);
    }
    if let Err(e) = EnvFilter::try_new(&config.observability.log_level) {
        errors.push(ValidationError::InvalidLogLevel {
            level: config.observability.log_level.clone(),
            reason: e.to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
