//! Logger that drops every record.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Discards all messages. Handy for benchmarks and CLI `--quiet` runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _args: Arguments<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_logger_as_trait_object() {
        let logger: Box<dyn Logger> = Box::new(NoOpLogger);
        logger.info(format_args!("layer {} added", "road"));
        logger.error(format_args!("dropped"));
    }
}
