//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher and connection tasks
//!     → diagnostics.rs (injected sink for exchange failures)
//!     → tracing events
//!     → logging.rs (subscriber: filter + pretty/JSON fmt)
//!     → stdout
//! ```

pub mod diagnostics;
pub mod logging;

pub use diagnostics::{
    Diagnostics, ExchangeContext, ExchangeError, SharedDiagnostics, TracingDiagnostics,
};
pub use logging::init_logging;
