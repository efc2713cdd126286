//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Accepted TCP connection
//!     → server.rs (hyper HTTP/1.1 connection, Axum router)
//!     → handler.rs (Dispatcher: classify, drain body)
//!     → dispatch.rs (target + method → Reply)
//!     → response.rs (Reply → text/plain response)
//!     → Send to client
//! ```

pub mod dispatch;
pub mod handler;
pub mod method;
pub mod response;
pub mod server;

pub use dispatch::{route, Reply, GREETING, ROOT_PATH};
pub use handler::Dispatcher;
pub use method::{RootMethod, ALLOWED_METHODS};
pub use response::TEXT_PLAIN;
pub use server::HttpServer;
