//! Merge of remote discovery and local overrides.

use std::collections::HashSet;

use serde::Serialize;

use super::remote::RemoteCatalog;
use crate::config::{AppConfig, LayerConfig, DEFAULT_LAYER_COLOR, DEFAULT_LAYER_ORDER};
use crate::log::{default_logger, Logger, SharedLogger};
use crate::{log_debug, log_info};

/// Ordered layers ready for rendering.
///
/// Ids are unique, entries are sorted by `order` (stable), every entry has a
/// geometry type and none is hidden. Only [`LayerCatalogResolver`] builds
/// non-empty lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedLayerList {
    layers: Vec<LayerConfig>,
}

impl ResolvedLayerList {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LayerConfig> {
        self.layers.iter()
    }

    pub fn as_slice(&self) -> &[LayerConfig] {
        &self.layers
    }

    pub fn get(&self, id: &str) -> Option<&LayerConfig> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResolvedLayerList {
    type Item = &'a LayerConfig;
    type IntoIter = std::slice::Iter<'a, LayerConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}

/// Builds the [`ResolvedLayerList`] for a session.
pub struct LayerCatalogResolver {
    logger: SharedLogger,
}

impl Default for LayerCatalogResolver {
    fn default() -> Self {
        Self::new(default_logger())
    }
}

impl LayerCatalogResolver {
    pub fn new(logger: SharedLogger) -> Self {
        Self { logger }
    }

    /// Resolve the layer list.
    ///
    /// A non-empty `remote` catalog decides which ids exist; otherwise the
    /// config's own keys do. Never fails: no candidates means an empty list.
    pub fn resolve(&self, config: &AppConfig, remote: Option<&RemoteCatalog>) -> ResolvedLayerList {
        let (candidates, source): (Vec<&str>, &str) = match remote {
            Some(catalog) if !catalog.is_empty() => (catalog.ids().collect(), "catalog"),
            _ => (config.layers.keys().map(String::as_str).collect(), "config"),
        };

        let mut seen = HashSet::new();
        let mut layers = Vec::with_capacity(candidates.len());

        for id in candidates {
            if !seen.insert(id) {
                continue;
            }
            if config.hidden_collections.contains(id) {
                log_debug!(self.logger, "layer '{}' hidden by config", id);
                continue;
            }
            let Some(layer_override) = config.layers.get(id) else {
                log_debug!(self.logger, "layer '{}' has no override, skipped", id);
                continue;
            };
            let Some(geometry_type) = layer_override.geometry_type else {
                log_debug!(self.logger, "layer '{}' has no geometryType, skipped", id);
                continue;
            };

            layers.push(LayerConfig {
                id: id.to_string(),
                name: layer_override
                    .name
                    .clone()
                    .unwrap_or_else(|| id.to_string()),
                geometry_type,
                color: layer_override
                    .color
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LAYER_COLOR.to_string()),
                order: layer_override.order.unwrap_or(DEFAULT_LAYER_ORDER),
            });
        }

        layers.sort_by_key(|layer| layer.order);

        log_info!(
            self.logger,
            "resolved {} layers from {} ids",
            layers.len(),
            source
        );

        ResolvedLayerList { layers }
    }
}
