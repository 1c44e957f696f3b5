//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use mapsync::catalog::CatalogError;
use mapsync::config::ConfigError;
use mapsync::loader::LoadError;
use mapsync::platform::PlatformError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Failed to create the HTTP client
    Http(PlatformError),
    /// Config document could not be read or parsed
    Config(ConfigError),
    /// Layer loading failed
    Load(LoadError),
    /// Failed to read a local input file
    FileRead { path: String, error: std::io::Error },
    /// Local catalog file could not be parsed
    Catalog { path: String, error: CatalogError },
    /// Location id not in the town table
    UnknownLocation(String),
    /// Failed to serialize output
    Output(serde_json::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Load(_) | CliError::Config(ConfigError::Fetch { .. }) => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. The config URL must be absolute when fetched from the CLI");
                eprintln!("  2. Use a local file path to inspect a config without a server");
            }
            CliError::UnknownLocation(_) => {
                eprintln!();
                eprintln!("Run 'mapsync locations' to list known towns.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Http(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Load(e) => write!(f, "{}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read file '{}': {}", path, error)
            }
            CliError::Catalog { path, error } => {
                write!(f, "Failed to read catalog '{}': {}", path, error)
            }
            CliError::UnknownLocation(id) => write!(f, "Unknown location '{}'", id),
            CliError::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Runtime(e) => Some(e),
            CliError::Http(e) => Some(e),
            CliError::Config(e) => Some(e),
            CliError::Load(e) => Some(e),
            CliError::FileRead { error, .. } => Some(error),
            CliError::Catalog { error, .. } => Some(error),
            CliError::Output(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<LoadError> for CliError {
    fn from(e: LoadError) -> Self {
        CliError::Load(e)
    }
}
