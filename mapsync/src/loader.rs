//! End-to-end layer loading: config document, catalog, resolution.
//!
//! Only the config document is required. The catalog request is
//! best-effort; when it fails the config keys alone decide which layers
//! exist.

use serde::Serialize;
use thiserror::Error;

use crate::catalog::{fetch_catalog, LayerCatalogResolver, ResolvedLayerList};
use crate::config::{resolve_tipg_url, AppConfig, ConfigError};
use crate::log::{Logger, SharedLogger};
use crate::platform::Platform;
use crate::{log_info, log_warn};

/// Fatal failure of a layer load. The host shows it with a retry action.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load layer configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Everything a session needs after a successful load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedLayers {
    pub layers: ResolvedLayerList,
    pub default_enabled_layers: Vec<String>,
    pub tipg_url: String,
    pub schema_prefix: String,
}

/// Make a root-relative URL absolute against the page origin, if known.
pub fn absolute_url<P: Platform>(platform: &P, url: &str) -> String {
    match platform.current_origin() {
        Some(origin) if url.starts_with('/') => {
            format!("{}{}", origin.trim_end_matches('/'), url)
        }
        _ => url.to_string(),
    }
}

/// Fetch the config document at `config_url` and resolve the layer list.
pub async fn load_layers<P: Platform>(
    platform: &P,
    config_url: &str,
    logger: &SharedLogger,
) -> Result<LoadedLayers, LoadError> {
    let url = absolute_url(platform, config_url);
    let body = platform
        .http_get(&url)
        .await
        .map_err(|source| ConfigError::Fetch {
            url: url.clone(),
            source,
        })?;
    let config = AppConfig::from_slice(&body)?;

    Ok(resolve_loaded(platform, config, logger).await)
}

/// Resolve an already parsed config document.
///
/// Never fails: a missing catalog only narrows resolution to config keys.
pub async fn resolve_loaded<P: Platform>(
    platform: &P,
    config: AppConfig,
    logger: &SharedLogger,
) -> LoadedLayers {
    let tipg_url = resolve_tipg_url(config.tipg_url.as_deref(), platform);
    let catalog_base = absolute_url(platform, &tipg_url);

    let catalog = match fetch_catalog(platform, &catalog_base, &config.schema_prefix, logger).await
    {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            log_warn!(
                logger,
                "collection catalog unavailable, using config only: {}",
                e
            );
            None
        }
    };

    let layers = LayerCatalogResolver::new(logger.clone()).resolve(&config, catalog.as_ref());
    log_info!(
        logger,
        "loaded {} layers (tipg {}, schema {})",
        layers.len(),
        tipg_url,
        config.schema_prefix
    );

    LoadedLayers {
        layers,
        default_enabled_layers: config.default_enabled_layers,
        tipg_url,
        schema_prefix: config.schema_prefix,
    }
}
