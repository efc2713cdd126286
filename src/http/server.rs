//! HTTP server setup and accept loop.
//!
//! # Responsibilities
//! - Create the Axum router around the dispatcher
//! - Serve each accepted connection over HTTP/1.1 (keep-alive, pipelining)
//! - Report connection failures to the diagnostics sink
//! - Stop accepting on shutdown and drain live connections for the grace period

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::response::Response;
use axum::Router;
use hyper::server::conn::http1;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpStream;
use tokio::sync::{broadcast, watch};
use tower::util::MapResponse;
use tower_http::trace::TraceLayer;
use tracing::Instrument;

use crate::config::ServerConfig;
use crate::http::handler::{dispatch, Dispatcher};
use crate::http::response::defer_empty_length;
use crate::net::{ConnectionPermit, ConnectionTracker, Listener, ListenerError};
use crate::observability::{
    ExchangeContext, ExchangeError, SharedDiagnostics, TracingDiagnostics,
};

/// Pause after an accept failure, so a persistent error (e.g. out of file
/// descriptors) doesn't spin the loop.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// The service each connection runs: the router, with empty-body lengths
/// left to hyper.
pub type RootService = MapResponse<Router, fn(Response) -> Response>;

/// HTTP server for the root resource.
pub struct HttpServer {
    service: RootService,
    config: ServerConfig,
    diagnostics: SharedDiagnostics,
}

impl HttpServer {
    /// Create a server that reports exchange failures through `tracing`.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_diagnostics(config, Arc::new(TracingDiagnostics))
    }

    /// Create a server with an explicit diagnostics sink.
    pub fn with_diagnostics(config: ServerConfig, diagnostics: SharedDiagnostics) -> Self {
        let dispatcher = Dispatcher::new(diagnostics.clone());
        let service = MapResponse::new(
            Self::build_router(dispatcher),
            defer_empty_length as fn(Response) -> Response,
        );
        Self {
            service,
            config,
            diagnostics,
        }
    }

    /// Build the Axum router. Every path and method lands on the dispatcher.
    fn build_router(dispatcher: Dispatcher) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(dispatcher)
            .layer(TraceLayer::new_for_http())
    }

    /// The per-connection service, for driving it without a socket.
    pub fn service(&self) -> RootService {
        self.service.clone()
    }

    /// Run the server until `shutdown` fires.
    ///
    /// The listener is closed as soon as the signal arrives. Live connections
    /// are then asked to drain and are awaited for at most the configured
    /// grace period; with a zero grace period they are not awaited at all.
    pub async fn run(
        self,
        listener: Listener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let tracker = ConnectionTracker::new();
        let mut http = http1::Builder::new();
        http.timer(TokioTimer::new())
            .header_read_timeout(self.config.timeouts.header_read())
            .keep_alive(true);

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown signal received, closing listener");
                    break;
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer, permit)) => {
                        self.spawn_connection(&http, &tracker, stream, peer, permit);
                    }
                    Err(ListenerError::Closed) => break,
                    Err(e) => {
                        tracing::warn!(error = %e, "Accept failed");
                        if accept_backoff(&mut shutdown).await {
                            tracing::info!("Shutdown signal received, closing listener");
                            break;
                        }
                    }
                },
            }
        }

        drop(listener);
        tracker.begin_drain();

        let grace = self.config.shutdown.grace();
        if !grace.is_zero() && tracker.active_count() > 0 {
            tracing::info!(
                active_connections = tracker.active_count(),
                grace_secs = grace.as_secs(),
                "Waiting for connections to drain"
            );
            if tokio::time::timeout(grace, tracker.wait_for_idle())
                .await
                .is_err()
            {
                tracing::warn!(
                    active_connections = tracker.active_count(),
                    "Grace period elapsed with connections still open"
                );
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    fn spawn_connection(
        &self,
        http: &http1::Builder,
        tracker: &ConnectionTracker,
        stream: TcpStream,
        peer: SocketAddr,
        permit: ConnectionPermit,
    ) {
        let guard = tracker.track();
        let id = guard.id();
        let mut drain = tracker.drain_receiver();
        let diagnostics = self.diagnostics.clone();
        let service = TowerToHyperService::new(self.service.clone());
        let conn = http.serve_connection(TokioIo::new(stream), service);

        let span = tracing::debug_span!("connection", connection_id = %id, peer = %peer);
        tokio::spawn(
            async move {
                // Released on every exit path, including panics.
                let _guard = guard;
                let _permit = permit;

                let mut conn = std::pin::pin!(conn);
                let result = tokio::select! {
                    result = conn.as_mut() => result,
                    _ = drain_requested(&mut drain) => {
                        conn.as_mut().graceful_shutdown();
                        conn.await
                    }
                };

                if let Err(e) = result {
                    diagnostics.exchange_failed(
                        ExchangeContext::Connection(id),
                        &ExchangeError::Transport(e),
                    );
                }
            }
            .instrument(span),
        );
    }
}

/// Sit out an accept failure. Returns `true` if shutdown arrived first.
async fn accept_backoff(shutdown: &mut broadcast::Receiver<()>) -> bool {
    tokio::select! {
        _ = shutdown.recv() => true,
        _ = tokio::time::sleep(ACCEPT_ERROR_BACKOFF) => false,
    }
}

/// Resolves once a drain is requested, or the tracker is gone.
async fn drain_requested(drain: &mut watch::Receiver<bool>) {
    let _ = drain.wait_for(|draining| *draining).await;
}
