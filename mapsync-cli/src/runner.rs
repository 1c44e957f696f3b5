//! CLI runner for common setup and operations.
//!
//! Encapsulates logging initialization, the async runtime and layer loading
//! to reduce duplication across command handlers.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use mapsync::catalog::{CatalogError, CollectionsResponse, LayerCatalogResolver, RemoteCatalog};
use mapsync::config::{resolve_tipg_url, AppConfig, ConfigError};
use mapsync::loader::{load_layers, resolve_loaded, LoadedLayers};
use mapsync::log::{SharedLogger, TracingLogger};
use mapsync::logging::{default_log_file, init_logging, LoggingGuard};
use mapsync::platform::{Platform, ReqwestPlatform};

use crate::error::CliError;

/// Where to read layers from, shared by `layers` and `preview`.
#[derive(Debug, Clone, clap::Args)]
pub struct SourceArgs {
    /// Config document: a local file or an http(s) URL
    #[arg(long, short = 'c')]
    pub config: String,

    /// Local tipg `/collections` document used instead of querying tipg
    #[arg(long)]
    pub catalog: Option<String>,

    /// Do not query tipg; resolve from config keys only
    #[arg(long, conflicts_with = "catalog")]
    pub offline: bool,
}

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    runtime: tokio::runtime::Runtime,
    logger: SharedLogger,
}

impl CliRunner {
    /// Initialize logging under `log_dir` and start a current-thread runtime.
    pub fn new(log_dir: &str, verbose: bool) -> Result<Self, CliError> {
        let level = if verbose { "mapsync=debug" } else { "warn" };
        let logging_guard = init_logging(log_dir, default_log_file(), level)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CliError::Runtime)?;

        Ok(Self {
            logging_guard,
            runtime,
            logger: Arc::new(TracingLogger),
        })
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("mapsync v{}", mapsync::VERSION);
        info!("mapsync CLI: {} command", command);
    }

    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Load and resolve layers as described by `source`.
    pub fn load(&self, source: &SourceArgs) -> Result<LoadedLayers, CliError> {
        let platform = ReqwestPlatform::new().map_err(CliError::Http)?;

        if is_url(&source.config) && source.catalog.is_none() && !source.offline {
            return Ok(self.block_on(load_layers(&platform, &source.config, &self.logger))?);
        }

        let config = if is_url(&source.config) {
            let body = self
                .block_on(platform.http_get(&source.config))
                .map_err(|e| ConfigError::Fetch {
                    url: source.config.clone(),
                    source: e,
                })?;
            AppConfig::from_slice(&body)?
        } else {
            AppConfig::load_from(Path::new(&source.config))?
        };

        if source.offline {
            return Ok(self.resolve_with(&platform, config, None));
        }

        match &source.catalog {
            Some(path) => {
                let catalog = read_catalog(path, &config.schema_prefix, &self.logger)?;
                Ok(self.resolve_with(&platform, config, Some(&catalog)))
            }
            None => Ok(self.block_on(resolve_loaded(&platform, config, &self.logger))),
        }
    }

    fn resolve_with(
        &self,
        platform: &ReqwestPlatform,
        config: AppConfig,
        catalog: Option<&RemoteCatalog>,
    ) -> LoadedLayers {
        let layers = LayerCatalogResolver::new(self.logger.clone()).resolve(&config, catalog);
        LoadedLayers {
            layers,
            tipg_url: resolve_tipg_url(config.tipg_url.as_deref(), platform),
            default_enabled_layers: config.default_enabled_layers,
            schema_prefix: config.schema_prefix,
        }
    }
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Read a saved `/collections` document.
pub fn read_catalog(
    path: &str,
    preferred_schema: &str,
    logger: &SharedLogger,
) -> Result<RemoteCatalog, CliError> {
    let text = std::fs::read_to_string(path).map_err(|error| CliError::FileRead {
        path: path.to_string(),
        error,
    })?;
    let response: CollectionsResponse =
        serde_json::from_str(&text).map_err(|e| CliError::Catalog {
            path: path.to_string(),
            error: CatalogError::Parse(e),
        })?;
    Ok(RemoteCatalog::from_response(&response, preferred_schema, logger))
}
