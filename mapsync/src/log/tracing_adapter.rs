//! Adapter from [`Logger`] to the `tracing` macros.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Forwards records to whatever `tracing` subscriber is installed.
///
/// See [`crate::logging::init_logging`] for the subscriber the CLI uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "mapsync", "{}", args),
            LogLevel::Debug => tracing::debug!(target: "mapsync", "{}", args),
            LogLevel::Info => tracing::info!(target: "mapsync", "{}", args),
            LogLevel::Warn => tracing::warn!(target: "mapsync", "{}", args),
            LogLevel::Error => tracing::error!(target: "mapsync", "{}", args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_logger_without_subscriber() {
        // No subscriber installed: records are dropped silently.
        let logger: Box<dyn Logger> = Box::new(TracingLogger);
        logger.warn(format_args!("catalog fetch failed"));
    }
}
