//! Logging abstraction used at component boundaries.
//!
//! The resolver, the sync engine and the map session never call `tracing`
//! directly. They hold an `Arc<dyn Logger>` so tests can swap in a silent or
//! recording implementation:
//!
//! - [`TracingLogger`]: forwards to the `tracing` macros (production)
//! - [`NoOpLogger`]: discards everything
//! - [`MemoryLogger`]: keeps every record for assertions
//!
//! ```
//! use mapsync::log::{Logger, MemoryLogger};
//! use mapsync::log_warn;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(MemoryLogger::new());
//! log_warn!(logger, "catalog unavailable: {}", "timeout");
//! assert!(logger.contains("catalog unavailable"));
//! ```

mod memory;
mod noop;
mod tracing_adapter;
mod r#trait;

pub use memory::{LogRecord, MemoryLogger};
pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;

use std::sync::Arc;

/// Shared logger handle used throughout the crate.
pub type SharedLogger = Arc<dyn Logger>;

/// Default logger for components constructed without one.
pub fn default_logger() -> SharedLogger {
    Arc::new(TracingLogger)
}
