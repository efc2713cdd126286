//! Configuration loading from command-line flags and environment.

use clap::Parser;

use crate::config::schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, ServerConfig, ShutdownConfig, TimeoutConfig,
};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Command-line arguments. Each flag falls back to an environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "hello-httpd")]
#[command(about = "Minimal HTTP server exposing a single root resource", long_about = None)]
pub struct ConfigArgs {
    /// IP address to bind.
    #[arg(long, env = "HELLO_HTTPD_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind.
    #[arg(short, long, env = "HELLO_HTTPD_PORT", default_value_t = 9000)]
    pub port: u16,

    /// Accept backlog.
    #[arg(long, env = "HELLO_HTTPD_BACKLOG", default_value_t = 10)]
    pub backlog: u32,

    /// Maximum concurrent connections.
    #[arg(long, env = "HELLO_HTTPD_MAX_CONNECTIONS", default_value_t = 10_000)]
    pub max_connections: usize,

    /// Seconds allowed to receive a request head.
    #[arg(long, env = "HELLO_HTTPD_HEADER_READ_TIMEOUT_SECS", default_value_t = 30)]
    pub header_read_timeout_secs: u64,

    /// Seconds to wait for in-flight connections on shutdown.
    #[arg(long, env = "HELLO_HTTPD_SHUTDOWN_GRACE_SECS", default_value_t = 0)]
    pub shutdown_grace_secs: u64,

    /// Log level or filter directive. `RUST_LOG` takes precedence.
    #[arg(long, env = "HELLO_HTTPD_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, env = "HELLO_HTTPD_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl From<ConfigArgs> for ServerConfig {
    fn from(args: ConfigArgs) -> Self {
        Self {
            listener: ListenerConfig {
                host: args.host,
                port: args.port,
                backlog: args.backlog,
                max_connections: args.max_connections,
            },
            timeouts: TimeoutConfig {
                header_read_secs: args.header_read_timeout_secs,
            },
            shutdown: ShutdownConfig {
                grace_secs: args.shutdown_grace_secs,
            },
            observability: ObservabilityConfig {
                log_level: args.log_level,
                log_format: args.log_format,
            },
        }
    }
}

/// Build and validate configuration from parsed arguments.
pub fn load_config(args: ConfigArgs) -> Result<ServerConfig, ConfigError> {
    let config = ServerConfig::from(args);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
