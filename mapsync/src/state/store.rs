//! Revisioned store for layer state.

use std::sync::Arc;

use tokio::sync::watch;

use super::EnabledLayerSet;
use crate::catalog::ResolvedLayerList;

#[derive(Debug, Default)]
struct LayerState {
    layers: Arc<ResolvedLayerList>,
    enabled: EnabledLayerSet,
    ready: bool,
}

/// Single-owner store publishing a revision counter on every change.
///
/// Receivers from [`LayerStateStore::subscribe`] only see the latest
/// revision, so several writes between two observations collapse into one
/// notification.
#[derive(Debug)]
pub struct LayerStateStore {
    state: LayerState,
    revision: u64,
    revision_tx: watch::Sender<u64>,
}

impl Default for LayerStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStateStore {
    pub fn new() -> Self {
        let (revision_tx, _revision_rx) = watch::channel(0);
        Self {
            state: LayerState::default(),
            revision: 0,
            revision_tx,
        }
    }

    /// Receiver that is notified whenever the revision moves.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision_tx.subscribe()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn layers(&self) -> &Arc<ResolvedLayerList> {
        &self.state.layers
    }

    pub fn enabled(&self) -> &EnabledLayerSet {
        &self.state.enabled
    }

    /// Whether the rendering surface has finished loading.
    pub fn is_ready(&self) -> bool {
        self.state.ready
    }

    pub fn set_layers(&mut self, layers: ResolvedLayerList) {
        self.batch(|w| w.set_layers(layers));
    }

    pub fn set_enabled(&mut self, enabled: EnabledLayerSet) {
        self.batch(|w| w.set_enabled(enabled));
    }

    pub fn toggle(&mut self, id: &str) {
        self.batch(|w| w.toggle(id));
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.batch(|w| w.set_ready(ready));
    }

    /// Apply several writes and publish a single revision.
    ///
    /// Nothing is published when the closure writes nothing.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut StateWriter<'_>) -> R) -> R {
        let mut writer = StateWriter {
            state: &mut self.state,
            dirty: false,
        };
        let result = f(&mut writer);
        if writer.dirty {
            self.revision += 1;
            self.revision_tx.send_replace(self.revision);
        }
        result
    }
}

/// Write access handed to [`LayerStateStore::batch`].
pub struct StateWriter<'a> {
    state: &'a mut LayerState,
    dirty: bool,
}

impl StateWriter<'_> {
    pub fn set_layers(&mut self, layers: ResolvedLayerList) {
        self.state.layers = Arc::new(layers);
        self.dirty = true;
    }

    pub fn set_enabled(&mut self, enabled: EnabledLayerSet) {
        self.state.enabled = enabled;
        self.dirty = true;
    }

    pub fn toggle(&mut self, id: &str) {
        self.state.enabled = self.state.enabled.toggled(id);
        self.dirty = true;
    }

    pub fn set_ready(&mut self, ready: bool) {
        if self.state.ready != ready {
            self.state.ready = ready;
            self.dirty = true;
        }
    }

    pub fn enabled(&self) -> &EnabledLayerSet {
        &self.state.enabled
    }
}
