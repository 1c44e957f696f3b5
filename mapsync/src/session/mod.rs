//! Host-side orchestration of one map view.
//!
//! [`MapSession`] owns the rendering surface and wires the components
//! together the way a UI host does:
//!
//! 1. [`MapSession::load`] fetches and resolves the layer configuration.
//!    Retries dispatch a new [`RequestToken`]; results for older tokens are
//!    dropped.
//! 2. [`MapSession::attach_map`] hands over the surface, and
//!    [`MapSession::map_ready`] marks it usable once its load event fired.
//! 3. User actions (`toggle_layer`, `set_base_map`, `go_to`, `click`,
//!    `pointer_move`) update state; [`MapSession::sync`] reconciles the map
//!    whenever that state moved.
//!
//! Dropping the session unsubscribes its event handlers and releases the
//! surface.

mod load;

#[cfg(test)]
mod tests;

pub use load::{LoadState, RequestToken};

use tokio::sync::watch;

use crate::basemap::BaseMapController;
use crate::catalog::ResolvedLayerList;
use crate::config::BaseMapType;
use crate::loader::{load_layers, LoadError, LoadedLayers};
use crate::log::{default_logger, Logger, SharedLogger};
use crate::map::{Cursor, LngLat, MapEvent, MapSurface, ScreenPoint, SubscriptionId};
use crate::navigator::LocationNavigator;
use crate::picker::{hover_cursor, pick_click, pick_hover, SelectedFeature};
use crate::platform::Platform;
use crate::state::{EnabledLayerSet, LayerStateStore};
use crate::sync::{LayerSyncEngine, SyncReport};
use crate::{log_debug, log_error, log_info, log_warn};

const SUBSCRIBED_EVENTS: [MapEvent; 3] = [MapEvent::Load, MapEvent::Click, MapEvent::PointerMove];

/// One map view and the layer state driving it.
pub struct MapSession<M: MapSurface> {
    map: Option<M>,
    subscriptions: Vec<SubscriptionId>,
    store: LayerStateStore,
    revisions: watch::Receiver<u64>,
    load_state: LoadState,
    last_token: Option<RequestToken>,
    engine: Option<LayerSyncEngine>,
    /// Removals made while applying a reload, reported with the next pass.
    retired: SyncReport,
    basemap: BaseMapController,
    navigator: LocationNavigator,
    selected: Option<SelectedFeature>,
    cursor: Cursor,
    logger: SharedLogger,
}

impl<M: MapSurface> Default for MapSession<M> {
    fn default() -> Self {
        Self::new(default_logger())
    }
}

impl<M: MapSurface> MapSession<M> {
    pub fn new(logger: SharedLogger) -> Self {
        let store = LayerStateStore::new();
        let revisions = store.subscribe();
        Self {
            map: None,
            subscriptions: Vec::new(),
            store,
            revisions,
            load_state: LoadState::Idle,
            last_token: None,
            engine: None,
            retired: SyncReport::default(),
            basemap: BaseMapController::new(),
            navigator: LocationNavigator::new(),
            selected: None,
            cursor: Cursor::Default,
            logger,
        }
    }

    // ---- configuration -------------------------------------------------

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Dispatch a new load and return its token.
    ///
    /// Any earlier request still in flight becomes stale.
    pub fn begin_load(&mut self) -> RequestToken {
        let token = self
            .last_token
            .map_or_else(RequestToken::first, RequestToken::next);
        self.last_token = Some(token);
        self.load_state = LoadState::Loading { token };
        log_debug!(self.logger, "config load {:?} dispatched", token);
        token
    }

    /// Apply the result of the load identified by `token`.
    ///
    /// Returns `false` and changes nothing when a newer load has been
    /// dispatched since, or when no load is pending.
    pub fn complete_load(
        &mut self,
        token: RequestToken,
        result: Result<LoadedLayers, LoadError>,
    ) -> bool {
        if self.load_state.pending_token() != Some(token) {
            log_debug!(self.logger, "discarding stale config load {:?}", token);
            return false;
        }

        match result {
            Ok(loaded) => {
                log_info!(
                    self.logger,
                    "config loaded: {} layers, {} enabled by default",
                    loaded.layers.len(),
                    loaded.default_enabled_layers.len()
                );
                let engine = LayerSyncEngine::with_logger(
                    loaded.tipg_url,
                    loaded.schema_prefix,
                    self.logger.clone(),
                );
                let enabled = EnabledLayerSet::from_ids(loaded.default_enabled_layers);
                self.retire_previous(&engine, &enabled, &loaded.layers);
                self.engine = Some(engine);
                self.store.batch(|w| {
                    w.set_layers(loaded.layers);
                    w.set_enabled(enabled);
                });
                self.load_state = LoadState::Ready;
            }
            Err(e) => {
                log_error!(self.logger, "config load failed: {}", e);
                self.load_state = LoadState::Failed(e);
            }
        }
        true
    }

    /// Take down what the previous configuration drew and the next one
    /// will not keep, while the previous layer list is still at hand.
    fn retire_previous(
        &mut self,
        next: &LayerSyncEngine,
        enabled: &EnabledLayerSet,
        layers: &ResolvedLayerList,
    ) {
        if !self.store.is_ready() {
            return;
        }
        let (Some(map), Some(previous)) = (self.map.as_mut(), self.engine.as_ref()) else {
            return;
        };
        let report = previous.retire(map, self.store.layers(), next, enabled, layers);
        if !report.is_noop() {
            log_info!(
                self.logger,
                "reload retired {} layers, {} failed",
                report.removed.len(),
                report.failed.len()
            );
        }
        self.retired.merge(report);
    }

    /// Fetch the config document and apply it. Also used for retries.
    pub async fn load<P: Platform>(&mut self, platform: &P, config_url: &str) -> &LoadState {
        let token = self.begin_load();
        let result = load_layers(platform, config_url, &self.logger).await;
        self.complete_load(token, result);
        &self.load_state
    }

    pub fn layers(&self) -> &ResolvedLayerList {
        self.store.layers()
    }

    pub fn enabled_layers(&self) -> &EnabledLayerSet {
        self.store.enabled()
    }

    pub fn store(&self) -> &LayerStateStore {
        &self.store
    }

    // ---- map lifecycle -------------------------------------------------

    /// Take ownership of a freshly created surface.
    ///
    /// A previously attached surface is torn down first.
    pub fn attach_map(&mut self, mut map: M) {
        self.teardown();
        self.subscriptions = SUBSCRIBED_EVENTS
            .iter()
            .map(|event| map.subscribe(*event))
            .collect();
        self.map = Some(map);
    }

    pub fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }

    pub fn map_mut(&mut self) -> Option<&mut M> {
        self.map.as_mut()
    }

    /// Whether the attached surface has fired its load event.
    pub fn is_map_ready(&self) -> bool {
        self.store.is_ready()
    }

    /// Handle the surface's load event.
    ///
    /// Installs the hidden satellite and terrain layers and applies the
    /// selected base map. Does nothing without an attached surface.
    pub fn map_ready(&mut self) {
        let Some(map) = self.map.as_mut() else {
            log_warn!(self.logger, "map ready signalled with no map attached");
            return;
        };

        if let Err(e) = self
            .basemap
            .install(map)
            .and_then(|()| self.basemap.apply(map))
        {
            log_error!(self.logger, "failed to install base maps: {}", e);
        }
        self.store.set_ready(true);
    }

    /// Reconcile the map if state changed since the last pass.
    ///
    /// Returns `None` when nothing was due: the map is not ready, no config
    /// is loaded, or no revision was published since the previous pass.
    pub fn sync(&mut self) -> Option<SyncReport> {
        if !self.revisions.has_changed().unwrap_or(false) {
            return None;
        }
        let report = self.reconcile()?;
        self.revisions.borrow_and_update();
        Some(report)
    }

    /// Reconcile now, whether or not state changed.
    ///
    /// Useful to retry layers whose add failed in an earlier pass.
    pub fn resync(&mut self) -> Option<SyncReport> {
        let report = self.reconcile()?;
        self.revisions.borrow_and_update();
        Some(report)
    }

    fn reconcile(&mut self) -> Option<SyncReport> {
        if !self.store.is_ready() {
            return None;
        }
        let (Some(map), Some(engine)) = (self.map.as_mut(), self.engine.as_ref()) else {
            return None;
        };
        let mut report = std::mem::take(&mut self.retired);
        report.merge(engine.reconcile(map, self.store.enabled(), self.store.layers()));
        Some(report)
    }

    // ---- user actions --------------------------------------------------

    pub fn toggle_layer(&mut self, id: &str) {
        self.store.toggle(id);
    }

    pub fn set_enabled_layers(&mut self, enabled: EnabledLayerSet) {
        self.store.set_enabled(enabled);
    }

    pub fn base_map(&self) -> BaseMapType {
        self.basemap.current()
    }

    /// Select a base map. Applied immediately once the map is ready,
    /// otherwise on [`MapSession::map_ready`].
    pub fn set_base_map(&mut self, kind: BaseMapType) {
        match self.map.as_mut() {
            Some(map) if self.store.is_ready() => {
                if let Err(e) = self.basemap.switch_to(map, kind) {
                    log_error!(self.logger, "failed to switch base map to {}: {}", kind, e);
                }
            }
            _ => self.basemap.select(kind),
        }
    }

    /// Fly to a town. Returns `false` for unknown ids or without a map.
    pub fn go_to(&mut self, location_id: &str) -> bool {
        self.navigator.go_to(self.map.as_mut(), location_id)
    }

    // ---- pointer -------------------------------------------------------

    /// Handle a click. A hit replaces the selected feature; a miss keeps
    /// the current one.
    pub fn click(&mut self, point: ScreenPoint, lng_lat: LngLat) -> Option<&SelectedFeature> {
        if !self.store.is_ready() {
            return None;
        }
        let map = self.map.as_ref()?;
        if let Some(feature) =
            pick_click(map, point, lng_lat, self.store.enabled(), self.store.layers())
        {
            log_debug!(self.logger, "selected feature on '{}'", feature.layer_id);
            self.selected = Some(feature);
        }
        self.selected.as_ref()
    }

    /// Handle a pointer move and return the cursor to show.
    pub fn pointer_move(&mut self, point: ScreenPoint) -> Cursor {
        let hit = match self.map.as_ref() {
            Some(map) if self.store.is_ready() => {
                pick_hover(map, point, self.store.enabled(), self.store.layers())
            }
            _ => false,
        };
        self.cursor = hover_cursor(hit);
        self.cursor
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn selected_feature(&self) -> Option<&SelectedFeature> {
        self.selected.as_ref()
    }

    pub fn close_popup(&mut self) {
        self.selected = None;
    }

    // ---- teardown ------------------------------------------------------

    /// Detach the surface without releasing it.
    pub fn detach_map(&mut self) -> Option<M> {
        let mut map = self.map.take()?;
        for id in self.subscriptions.drain(..) {
            map.unsubscribe(id);
        }
        self.store.set_ready(false);
        Some(map)
    }

    fn teardown(&mut self) {
        if let Some(mut map) = self.detach_map() {
            map.release();
            log_debug!(self.logger, "map released");
        }
    }
}

impl<M: MapSurface> Drop for MapSession<M> {
    fn drop(&mut self) {
        self.teardown();
    }
}
