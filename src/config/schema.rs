//! Configuration schema definitions.
//!
//! Every field has a default matching the server's stock behavior, so a
//! `ServerConfig::default()` serves `0.0.0.0:9000` with a backlog of 10.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::ValueEnum;

/// Root configuration for the server.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, backlog, connection limit).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Shutdown behavior.
    pub shutdown: ShutdownConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Host to bind, as an IP address literal.
    pub host: String,

    /// Port to bind. Zero picks an ephemeral port.
    pub port: u16,

    /// Maximum queued pending connections before accept.
    pub backlog: u32,

    /// Maximum concurrent connections (backpressure).
    pub max_connections: usize,
}

impl ListenerConfig {
    /// Resolve host and port into a socket address.
    ///
    /// Returns `None` when the host is not an IP address literal.
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        let ip: IpAddr = self.host.parse().ok()?;
        Some(SocketAddr::new(ip, self.port))
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9000,
            backlog: 10,
            max_connections: 10_000,
        }
    }
}

/// Timeout configuration for connection handling.
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Time allowed for a client to send a complete request head, in seconds.
    pub header_read_secs: u64,
}

impl TimeoutConfig {
    pub fn header_read(&self) -> Duration {
        Duration::from_secs(self.header_read_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            header_read_secs: 30,
        }
    }
}

/// Shutdown configuration.
#[derive(Debug, Clone, Default)]
pub struct ShutdownConfig {
    /// How long to wait for in-flight connections after the listener stops.
    /// Zero stops immediately.
    pub grace_secs: u64,
}

impl ShutdownConfig {
    pub fn grace(&self) -> Duration {
        Duration::from_secs(self.grace_secs)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_listener() {
        let config = ServerConfig::default();
        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.listener.port, 9000);
        assert_eq!(config.listener.backlog, 10);
        assert_eq!(config.shutdown.grace(), Duration::ZERO);
    }

    #[test]
    fn socket_addr_requires_ip_literal() {
        let mut listener = ListenerConfig::default();
        assert_eq!(
            listener.socket_addr(),
            Some("0.0.0.0:9000".parse().unwrap())
        );

        listener.host = "::1".to_string();
        listener.port = 0;
        assert_eq!(listener.socket_addr(), Some("[::1]:0".parse().unwrap()));

        listener.host = "localhost".to_string();
        assert_eq!(listener.socket_addr(), None);
    }
}
