//! Startup orchestration.
//!
//! # Responsibilities
//! - Bind the listener (failure is fatal: nothing is served)
//! - Build the server and run it until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is returned to the entry point
//! - The caller owns the `Shutdown` handle and subscribes before any signal
//!   can fire; no implicit runtime hooks

use tokio::sync::broadcast;

use crate::config::ServerConfig;
use crate::http::HttpServer;
use crate::net::{Listener, ListenerError};

/// Error type for startup and the serving loop.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Listener(#[from] ListenerError),
    #[error("Server failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Bind and serve until a shutdown message arrives on `shutdown`.
///
/// A message already queued on `shutdown` stops the server right after bind.
pub async fn serve(
    config: ServerConfig,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), StartupError> {
    let listener = Listener::bind(&config.listener)?;
    let server = HttpServer::new(config);
    server.run(listener, shutdown).await?;

    Ok(())
}
