//! hello-httpd entry point.
//!
//! ```text
//! flags/env → ServerConfig → logging → signal listener
//!     → bind 0.0.0.0:9000 (backlog 10) → serve → exit
//! ```

use clap::Parser;

use hello_httpd::config::{load_config, ConfigArgs};
use hello_httpd::lifecycle::{self, signals, Shutdown};
use hello_httpd::observability::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(ConfigArgs::parse())?;

    init_logging(&config.observability)?;

    tracing::info!("hello-httpd v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        host = %config.listener.host,
        port = config.listener.port,
        backlog = config.listener.backlog,
        shutdown_grace_secs = config.shutdown.grace_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    if let Err(e) = lifecycle::serve(config, shutdown_rx).await {
        tracing::error!(error = %e, "Server failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
