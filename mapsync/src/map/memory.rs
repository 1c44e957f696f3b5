//! Headless rendering surface.

use std::cell::Cell;
use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;
use serde_json::Value;

use super::surface::{MapError, MapEvent, MapSurface, SubscriptionId};
use super::types::{
    CameraAnimation, Paint, RenderedFeature, ScreenPoint, SourceSpec, StyleLayer, Visibility,
};
use crate::config::{base_map, BaseMapType};

/// Pixel radius within which a placed feature counts as under the pointer.
pub const HIT_RADIUS_PX: f64 = 4.0;

#[derive(Debug, Clone)]
struct PlacedFeature {
    layer_id: String,
    at: ScreenPoint,
    properties: IndexMap<String, Value>,
}

/// In-memory [`MapSurface`].
///
/// Behaves like a style-spec renderer where it matters to the engine:
/// layers need their source, a source cannot be removed while a layer still
/// draws from it, ids are unique, and queries return the topmost layer first.
/// Features are "rendered" by placing them at a screen point with
/// [`MemoryMap::place_feature`].
#[derive(Debug, Default)]
pub struct MemoryMap {
    sources: IndexMap<String, SourceSpec>,
    /// Bottom to top.
    layers: Vec<StyleLayer>,
    features: Vec<PlacedFeature>,
    failing_sources: HashSet<String>,
    failing_layers: HashSet<String>,
    failing_removals: HashSet<String>,
    camera: Vec<CameraAnimation>,
    subscriptions: BTreeMap<SubscriptionId, MapEvent>,
    next_subscription: u64,
    query_count: Cell<usize>,
    released: bool,
}

impl MemoryMap {
    /// An empty map with no style at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// A map whose initial style holds the street base map, as the host
    /// creates it before the load event.
    pub fn with_default_style() -> Self {
        let mut map = Self::new();
        let street = base_map(BaseMapType::Street);
        map.sources.insert(
            street.source_id.to_string(),
            SourceSpec::Raster {
                tiles: street.tiles.iter().map(|t| t.to_string()).collect(),
                tile_size: street.tile_size,
                attribution: Some(street.attribution.to_string()),
            },
        );
        map.layers.push(StyleLayer {
            id: street.layer_id.to_string(),
            source: street.source_id.to_string(),
            source_layer: None,
            paint: Paint::Raster,
            visibility: Visibility::Visible,
        });
        map
    }

    /// Make the next `add_source(id, ..)` calls fail with an engine error.
    pub fn fail_source(&mut self, id: &str) {
        self.failing_sources.insert(id.to_string());
    }

    /// Make the next `add_layer` calls for `id` fail with an engine error.
    pub fn fail_layer(&mut self, id: &str) {
        self.failing_layers.insert(id.to_string());
    }

    /// Make `remove_layer(id)` fail with an engine error.
    pub fn fail_remove_layer(&mut self, id: &str) {
        self.failing_removals.insert(id.to_string());
    }

    pub fn clear_failures(&mut self) {
        self.failing_sources.clear();
        self.failing_layers.clear();
        self.failing_removals.clear();
    }

    /// Render a feature of `layer_id` at `at`.
    pub fn place_feature(
        &mut self,
        layer_id: &str,
        at: ScreenPoint,
        properties: IndexMap<String, Value>,
    ) {
        self.features.push(PlacedFeature {
            layer_id: layer_id.to_string(),
            at,
            properties,
        });
    }

    pub fn source(&self, id: &str) -> Option<&SourceSpec> {
        self.sources.get(id)
    }

    pub fn source_ids(&self) -> Vec<String> {
        self.sources.keys().cloned().collect()
    }

    pub fn layer(&self, id: &str) -> Option<&StyleLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Style layers, bottom to top.
    pub fn layers(&self) -> &[StyleLayer] {
        &self.layers
    }

    pub fn layer_ids(&self) -> Vec<String> {
        self.layers.iter().map(|l| l.id.clone()).collect()
    }

    pub fn visibility(&self, layer_id: &str) -> Option<Visibility> {
        self.layer(layer_id).map(|l| l.visibility)
    }

    /// Camera animations issued so far, oldest first.
    pub fn camera_history(&self) -> &[CameraAnimation] {
        &self.camera
    }

    /// Number of rendered-feature queries served.
    pub fn query_count(&self) -> usize {
        self.query_count.get()
    }

    pub fn active_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn stack_index(&self, layer_id: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.id == layer_id)
    }
}

impl MapSurface for MemoryMap {
    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn add_source(&mut self, id: &str, source: SourceSpec) -> Result<(), MapError> {
        if self.failing_sources.contains(id) {
            return Err(MapError::Engine(format!("source '{}' rejected", id)));
        }
        if self.sources.contains_key(id) {
            return Err(MapError::DuplicateSource(id.to_string()));
        }
        self.sources.insert(id.to_string(), source);
        Ok(())
    }

    fn remove_source(&mut self, id: &str) -> Result<(), MapError> {
        if !self.sources.contains_key(id) {
            return Err(MapError::UnknownSource(id.to_string()));
        }
        if let Some(user) = self.layers.iter().find(|l| l.source == id) {
            return Err(MapError::Engine(format!(
                "source '{}' is still used by layer '{}'",
                id, user.id
            )));
        }
        self.sources.shift_remove(id);
        Ok(())
    }

    fn has_layer(&self, id: &str) -> bool {
        self.stack_index(id).is_some()
    }

    fn add_layer(&mut self, layer: StyleLayer) -> Result<(), MapError> {
        if self.failing_layers.contains(&layer.id) {
            return Err(MapError::Engine(format!("layer '{}' rejected", layer.id)));
        }
        if self.has_layer(&layer.id) {
            return Err(MapError::DuplicateLayer(layer.id));
        }
        if !self.sources.contains_key(&layer.source) {
            return Err(MapError::UnknownSource(layer.source));
        }
        self.layers.push(layer);
        Ok(())
    }

    fn remove_layer(&mut self, id: &str) -> Result<(), MapError> {
        if self.failing_removals.contains(id) {
            return Err(MapError::Engine(format!("layer '{}' cannot be removed", id)));
        }
        let index = self
            .stack_index(id)
            .ok_or_else(|| MapError::UnknownLayer(id.to_string()))?;
        self.layers.remove(index);
        Ok(())
    }

    fn set_visibility(&mut self, layer_id: &str, visibility: Visibility) -> Result<(), MapError> {
        let layer = self
            .layers
            .iter_mut()
            .find(|l| l.id == layer_id)
            .ok_or_else(|| MapError::UnknownLayer(layer_id.to_string()))?;
        layer.visibility = visibility;
        Ok(())
    }

    fn query_rendered_features(
        &self,
        point: ScreenPoint,
        layer_ids: &[String],
    ) -> Vec<RenderedFeature> {
        self.query_count.set(self.query_count.get() + 1);

        let mut hits: Vec<(usize, usize, &PlacedFeature)> = self
            .features
            .iter()
            .enumerate()
            .filter(|(_, f)| layer_ids.iter().any(|id| *id == f.layer_id))
            .filter(|(_, f)| f.at.distance_to(&point) <= HIT_RADIUS_PX)
            .filter_map(|(order, f)| {
                let layer = self.layer(&f.layer_id)?;
                if layer.visibility == Visibility::Hidden {
                    return None;
                }
                Some((self.stack_index(&f.layer_id)?, order, f))
            })
            .collect();

        // Topmost layer first; within a layer, the last drawn first.
        hits.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

        hits.into_iter()
            .map(|(_, _, f)| RenderedFeature {
                layer_id: f.layer_id.clone(),
                properties: f.properties.clone(),
            })
            .collect()
    }

    fn fly_to(&mut self, animation: CameraAnimation) {
        self.camera.push(animation);
    }

    fn subscribe(&mut self, event: MapEvent) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscriptions.insert(id, event);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscriptions.remove(&id);
    }

    fn release(&mut self) {
        self.subscriptions.clear();
        self.released = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector() -> SourceSpec {
        SourceSpec::Vector {
            tiles: vec!["http://t/{z}/{x}/{y}".to_string()],
        }
    }

    fn line_layer(id: &str, source: &str) -> StyleLayer {
        StyleLayer {
            id: id.to_string(),
            source: source.to_string(),
            source_layer: Some("default".to_string()),
            paint: Paint::Line {
                color: "#000000".to_string(),
                width: 2.0,
                opacity: None,
            },
            visibility: Visibility::Visible,
        }
    }

    fn props(name: &str) -> IndexMap<String, Value> {
        let mut p = IndexMap::new();
        p.insert("name".to_string(), Value::String(name.to_string()));
        p
    }

    #[test]
    fn test_default_style_has_osm() {
        let map = MemoryMap::with_default_style();
        assert!(map.has_source("osm"));
        assert!(map.has_layer("osm"));
        assert_eq!(map.visibility("osm"), Some(Visibility::Visible));
    }

    #[test]
    fn test_layer_requires_source() {
        let mut map = MemoryMap::new();
        let err = map.add_layer(line_layer("road-line", "road")).unwrap_err();
        assert_eq!(err, MapError::UnknownSource("road".to_string()));
    }

    #[test]
    fn test_duplicates_rejected() {
        let mut map = MemoryMap::new();
        map.add_source("road", vector()).unwrap();
        assert_eq!(
            map.add_source("road", vector()),
            Err(MapError::DuplicateSource("road".to_string()))
        );
        map.add_layer(line_layer("road-line", "road")).unwrap();
        assert_eq!(
            map.add_layer(line_layer("road-line", "road")),
            Err(MapError::DuplicateLayer("road-line".to_string()))
        );
    }

    #[test]
    fn test_source_in_use_cannot_be_removed() {
        let mut map = MemoryMap::new();
        map.add_source("road", vector()).unwrap();
        map.add_layer(line_layer("road-line", "road")).unwrap();

        assert!(matches!(map.remove_source("road"), Err(MapError::Engine(_))));
        map.remove_layer("road-line").unwrap();
        map.remove_source("road").unwrap();
        assert!(!map.has_source("road"));
    }

    #[test]
    fn test_query_topmost_first_within_radius() {
        let mut map = MemoryMap::new();
        map.add_source("a", vector()).unwrap();
        map.add_source("b", vector()).unwrap();
        map.add_layer(line_layer("a-line", "a")).unwrap();
        map.add_layer(line_layer("b-line", "b")).unwrap();

        let here = ScreenPoint::new(10.0, 10.0);
        map.place_feature("a-line", here, props("lower"));
        map.place_feature("b-line", ScreenPoint::new(12.0, 10.0), props("upper"));
        map.place_feature("b-line", ScreenPoint::new(100.0, 100.0), props("far"));

        let ids = vec!["a-line".to_string(), "b-line".to_string()];
        let hits = map.query_rendered_features(here, &ids);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].layer_id, "b-line");
        assert_eq!(hits[1].layer_id, "a-line");
        assert_eq!(map.query_count(), 1);
    }

    #[test]
    fn test_query_skips_hidden_and_unrequested_layers() {
        let mut map = MemoryMap::new();
        map.add_source("a", vector()).unwrap();
        map.add_layer(line_layer("a-line", "a")).unwrap();
        let here = ScreenPoint::new(0.0, 0.0);
        map.place_feature("a-line", here, props("x"));

        assert!(map.query_rendered_features(here, &[]).is_empty());

        map.set_visibility("a-line", Visibility::Hidden).unwrap();
        assert!(map
            .query_rendered_features(here, &["a-line".to_string()])
            .is_empty());
    }

    #[test]
    fn test_injected_failures() {
        let mut map = MemoryMap::new();
        map.fail_source("bad");
        assert!(matches!(map.add_source("bad", vector()), Err(MapError::Engine(_))));
        map.clear_failures();
        map.add_source("bad", vector()).unwrap();
    }

    #[test]
    fn test_release_drops_subscriptions() {
        let mut map = MemoryMap::new();
        let click = map.subscribe(MapEvent::Click);
        map.subscribe(MapEvent::PointerMove);
        assert_eq!(map.active_subscriptions(), 2);

        map.unsubscribe(click);
        assert_eq!(map.active_subscriptions(), 1);

        map.release();
        assert_eq!(map.active_subscriptions(), 0);
        assert!(map.is_released());
    }
}
