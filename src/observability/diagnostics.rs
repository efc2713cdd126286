//! Diagnostics sink for recoverable exchange failures.
//!
//! The dispatcher and the connection tasks never log through a global
//! directly: they hold a [`Diagnostics`] handed to them at construction.
//! [`TracingDiagnostics`] forwards to `tracing`; tests substitute their own.

use std::fmt;
use std::sync::Arc;

use crate::net::ConnectionId;

/// An I/O failure during a single exchange. Never fatal to the server.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    /// Reading and discarding the request body failed.
    #[error("Failed to read request body: {0}")]
    BodyDrain(#[source] axum::Error),
    /// The connection failed while reading a request or writing a response.
    #[error("Connection failed: {0}")]
    Transport(#[source] hyper::Error),
}

/// Where an exchange failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeContext {
    /// Inside the request handler, before the response was handed back.
    Handler,
    /// On a specific connection, while the transport was reading or writing.
    Connection(ConnectionId),
}

impl fmt::Display for ExchangeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeContext::Handler => f.write_str("handler"),
            ExchangeContext::Connection(id) => id.fmt(f),
        }
    }
}

/// Receives warnings about failed exchanges.
pub trait Diagnostics: Send + Sync + fmt::Debug + 'static {
    /// Report a recoverable exchange failure.
    fn exchange_failed(&self, context: ExchangeContext, error: &ExchangeError);
}

/// Default sink: a `tracing` warning per failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn exchange_failed(&self, context: ExchangeContext, error: &ExchangeError) {
        tracing::warn!(context = %context, error = %error, "Exchange failed");
    }
}

/// Shared handle to a diagnostics sink.
pub type SharedDiagnostics = Arc<dyn Diagnostics>;

#[cfg(test)]
pub(crate) use recording::RecordingDiagnostics;
