//! The [`Logger`] seam and its `log_*!` macros.

use std::fmt::{self, Arguments};

/// Severity of a log record, least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the resolver, sync engine and session send their diagnostics.
///
/// Implementors supply [`Logger::log`]. Call sites use the `log_*!` macros,
/// which need this trait in scope:
///
/// ```
/// use mapsync::log::{Logger, SharedLogger, NoOpLogger};
/// use mapsync::log_info;
/// use std::sync::Arc;
///
/// let logger: SharedLogger = Arc::new(NoOpLogger);
/// log_info!(logger, "sync: {} added", 2);
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, args: Arguments<'_>);

    fn trace(&self, args: Arguments<'_>) {
        self.log(LogLevel::Trace, args);
    }

    fn debug(&self, args: Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    fn info(&self, args: Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    fn warn(&self, args: Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    fn error(&self, args: Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }
}

/// `log_trace!(logger, "...", args)`; the other levels follow the same shape.
#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)*) => {
        $logger.trace(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(LogLevel::Warn.to_string(), "warn");
        assert_eq!(format!("[{}]", LogLevel::Error), "[error]");
    }

    #[test]
    fn test_helpers_route_to_level() {
        use std::sync::Mutex;

        struct LastLevel(Mutex<Option<LogLevel>>);
        impl Logger for LastLevel {
            fn log(&self, level: LogLevel, _args: Arguments<'_>) {
                *self.0.lock().unwrap() = Some(level);
            }
        }

        let logger = LastLevel(Mutex::new(None));
        logger.warn(format_args!("w"));
        assert_eq!(*logger.0.lock().unwrap(), Some(LogLevel::Warn));
        logger.trace(format_args!("t"));
        assert_eq!(*logger.0.lock().unwrap(), Some(LogLevel::Trace));
    }
}
