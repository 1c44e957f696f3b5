//! Desired-vs-actual reconciliation.

use super::style::{build_sublayers, sublayer_ids, tile_url};
use crate::catalog::ResolvedLayerList;
use crate::config::LayerConfig;
use crate::log::{default_logger, Logger, SharedLogger};
use crate::map::{MapError, MapSurface, SourceSpec};
use crate::state::EnabledLayerSet;
use crate::{log_debug, log_error, log_info, log_warn};

/// A layer whose add or remove was rejected by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    pub layer_id: String,
    pub error: MapError,
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub failed: Vec<SyncFailure>,
}

impl SyncReport {
    /// True when the pass left the map untouched.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.failed.is_empty()
    }

    /// Append the outcome of a later pass.
    pub fn merge(&mut self, later: SyncReport) {
        self.added.extend(later.added);
        self.removed.extend(later.removed);
        self.failed.extend(later.failed);
    }
}

/// Brings a map's vector sources and sublayers in line with the enabled set.
///
/// The engine holds no record of what it added. Every decision is made from
/// `has_source` / `has_layer` on the map itself, so repeated or overlapping
/// passes converge on the same state.
pub struct LayerSyncEngine {
    tipg_url: String,
    schema_prefix: String,
    logger: SharedLogger,
}

impl LayerSyncEngine {
    pub fn new(tipg_url: impl Into<String>, schema_prefix: impl Into<String>) -> Self {
        Self::with_logger(tipg_url, schema_prefix, default_logger())
    }

    pub fn with_logger(
        tipg_url: impl Into<String>,
        schema_prefix: impl Into<String>,
        logger: SharedLogger,
    ) -> Self {
        Self {
            tipg_url: tipg_url.into(),
            schema_prefix: schema_prefix.into(),
            logger,
        }
    }

    pub fn tipg_url(&self) -> &str {
        &self.tipg_url
    }

    pub fn schema_prefix(&self) -> &str {
        &self.schema_prefix
    }

    /// Run one pass over every resolved layer.
    ///
    /// Enabled layers without a source are added, disabled layers with a
    /// source are removed, everything else is left alone. A failure on one
    /// layer is logged and reported without stopping the others.
    pub fn reconcile<M: MapSurface + ?Sized>(
        &self,
        map: &mut M,
        desired: &EnabledLayerSet,
        layers: &ResolvedLayerList,
    ) -> SyncReport {
        let mut report = SyncReport::default();

        for layer in layers {
            let wanted = desired.contains(&layer.id);
            let present = map.has_source(&layer.id);

            if wanted == present {
                continue;
            }

            let outcome = if wanted {
                self.add(map, layer)
            } else {
                self.remove(map, layer)
            };

            match outcome {
                Ok(()) if wanted => report.added.push(layer.id.clone()),
                Ok(()) => report.removed.push(layer.id.clone()),
                Err(error) => {
                    log_error!(
                        self.logger,
                        "failed to {} layer '{}': {}",
                        if wanted { "add" } else { "remove" },
                        layer.id,
                        error
                    );
                    report.failed.push(SyncFailure {
                        layer_id: layer.id.clone(),
                        error,
                    });
                }
            }
        }

        if !report.is_noop() {
            log_info!(
                self.logger,
                "sync: {} added, {} removed, {} failed",
                report.added.len(),
                report.removed.len(),
                report.failed.len()
            );
        }

        report
    }

    /// Clear layers drawn from `previous` that a new resolution does not
    /// keep unchanged.
    ///
    /// A layer survives only if it is still enabled, still resolves to the
    /// same config, and `next` builds the same tile URL for it. Anything else
    /// is removed with its previous config, so the old sublayer ids are
    /// found; the next [`LayerSyncEngine::reconcile`] by `next` re-adds what
    /// is still wanted.
    pub fn retire<M: MapSurface + ?Sized>(
        &self,
        map: &mut M,
        previous: &ResolvedLayerList,
        next: &LayerSyncEngine,
        desired: &EnabledLayerSet,
        layers: &ResolvedLayerList,
    ) -> SyncReport {
        let mut report = SyncReport::default();

        for layer in previous {
            if !map.has_source(&layer.id) {
                continue;
            }
            let unchanged = desired.contains(&layer.id)
                && layers.get(&layer.id) == Some(layer)
                && self.layer_url(&layer.id) == next.layer_url(&layer.id);
            if unchanged {
                continue;
            }

            log_debug!(self.logger, "retiring layer '{}' after reload", layer.id);
            match self.remove(map, layer) {
                Ok(()) => report.removed.push(layer.id.clone()),
                Err(error) => {
                    log_error!(
                        self.logger,
                        "failed to retire layer '{}': {}",
                        layer.id,
                        error
                    );
                    report.failed.push(SyncFailure {
                        layer_id: layer.id.clone(),
                        error,
                    });
                }
            }
        }

        report
    }

    fn layer_url(&self, layer_id: &str) -> String {
        tile_url(&self.tipg_url, &self.schema_prefix, layer_id)
    }

    fn add<M: MapSurface + ?Sized>(&self, map: &mut M, layer: &LayerConfig) -> Result<(), MapError> {
        let url = self.layer_url(&layer.id);
        log_debug!(self.logger, "adding layer '{}' from {}", layer.id, url);

        map.add_source(&layer.id, SourceSpec::Vector { tiles: vec![url] })?;

        for sublayer in build_sublayers(layer) {
            if let Err(e) = map.add_layer(sublayer) {
                self.roll_back(map, layer);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Remove every sublayer, then the source.
    ///
    /// Each sublayer is attempted even when an earlier one fails. The source
    /// goes only once none of its sublayers is left; otherwise the first
    /// error is returned and the layer is retried on a later pass.
    fn remove<M: MapSurface + ?Sized>(
        &self,
        map: &mut M,
        layer: &LayerConfig,
    ) -> Result<(), MapError> {
        let mut first_error = None;
        for id in sublayer_ids(layer) {
            if !map.has_layer(&id) {
                continue;
            }
            if let Err(e) = map.remove_layer(&id) {
                log_warn!(self.logger, "failed to remove sublayer '{}': {}", id, e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => map.remove_source(&layer.id),
        }
    }

    /// Undo a half-finished add so the next pass starts from scratch.
    fn roll_back<M: MapSurface + ?Sized>(&self, map: &mut M, layer: &LayerConfig) {
        if let Err(e) = self.remove(map, layer) {
            log_warn!(
                self.logger,
                "rollback of layer '{}' incomplete: {}",
                layer.id,
                e
            );
        }
    }
}
