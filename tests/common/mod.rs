//! Shared harness for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hello_httpd::config::ServerConfig;
use hello_httpd::http::HttpServer;
use hello_httpd::lifecycle::Shutdown;
use hello_httpd::net::Listener;
use hello_httpd::observability::{Diagnostics, ExchangeContext, ExchangeError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

/// Diagnostics sink that keeps every report for later assertions.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    reports: Mutex<Vec<(ExchangeContext, String)>>,
}

impl RecordingDiagnostics {
    /// `(context, rendered error)` pairs reported so far.
    pub fn reports(&self) -> Vec<(ExchangeContext, String)> {
        self.reports.lock().unwrap().clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn exchange_failed(&self, context: ExchangeContext, error: &ExchangeError) {
        self.reports
            .lock()
            .unwrap()
            .push((context, error.to_string()));
    }
}

/// A server running on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub diagnostics: Arc<RecordingDiagnostics>,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for `run` to return.
    #[allow(dead_code)]
    pub async fn stop(self) -> Duration {
        let started = std::time::Instant::now();
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(10), self.handle)
            .await
            .expect("server did not stop")
            .expect("server task panicked")
            .expect("server returned an error");
        started.elapsed()
    }
}

/// Start a server with default settings.
#[allow(dead_code)]
pub async fn start_server() -> TestServer {
    start_server_with(ServerConfig::default()).await
}

/// Start a server; host and port are forced to 127.0.0.1:0.
pub async fn start_server_with(mut config: ServerConfig) -> TestServer {
    config.listener.host = "127.0.0.1".to_string();
    config.listener.port = 0;

    // Bound before spawning, so early connections wait in the backlog.
    let listener = Listener::bind(&config.listener).unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let diagnostics = Arc::new(RecordingDiagnostics::default());
    let server = HttpServer::with_diagnostics(config, diagnostics.clone());
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    TestServer {
        addr,
        shutdown,
        diagnostics,
        handle,
    }
}

/// Write raw bytes on a fresh connection and read until the server closes it.
#[allow(dead_code)]
pub async fn raw_exchange(addr: SocketAddr, request: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();

    let mut response = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response))
        .await
        .expect("server did not close the connection")
        .unwrap();
    String::from_utf8(response).unwrap()
}
