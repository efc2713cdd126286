//! Minimal HTTP server exposing a single root resource.
//!
//! `GET /` answers `Hello World\n`; `HEAD` and `OPTIONS` on `/` answer
//! empty 200s; any other method on `/` is a 405 and any other path a 404.
//! Request bodies are always drained so keep-alive and pipelined
//! connections stay usable.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
