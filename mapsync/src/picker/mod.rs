//! Click and hover hit-testing against enabled layers.
//!
//! Only sublayers that belong to an enabled, resolved layer and currently
//! exist on the map are queried. When none qualify, no query is issued.

mod feature;

pub use feature::SelectedFeature;

use crate::catalog::ResolvedLayerList;
use crate::map::{Cursor, LngLat, MapSurface, ScreenPoint};
use crate::state::EnabledLayerSet;
use crate::sync::sublayer_ids;

/// Sublayers eligible for picking, in resolved-list order.
pub fn pickable_sublayers<M: MapSurface + ?Sized>(
    map: &M,
    desired: &EnabledLayerSet,
    layers: &ResolvedLayerList,
) -> Vec<String> {
    layers
        .iter()
        .filter(|layer| desired.contains(&layer.id))
        .flat_map(sublayer_ids)
        .filter(|id| map.has_layer(id))
        .collect()
}

/// Topmost feature under a click, if any.
pub fn pick_click<M: MapSurface + ?Sized>(
    map: &M,
    point: ScreenPoint,
    lng_lat: LngLat,
    desired: &EnabledLayerSet,
    layers: &ResolvedLayerList,
) -> Option<SelectedFeature> {
    let candidates = pickable_sublayers(map, desired, layers);
    if candidates.is_empty() {
        return None;
    }

    map.query_rendered_features(point, &candidates)
        .into_iter()
        .next()
        .map(|hit| SelectedFeature {
            properties: hit.properties,
            lng_lat,
            layer_id: hit.layer_id,
        })
}

/// Whether any pickable feature is under the pointer.
pub fn pick_hover<M: MapSurface + ?Sized>(
    map: &M,
    point: ScreenPoint,
    desired: &EnabledLayerSet,
    layers: &ResolvedLayerList,
) -> bool {
    let candidates = pickable_sublayers(map, desired, layers);
    if candidates.is_empty() {
        return false;
    }
    !map.query_rendered_features(point, &candidates).is_empty()
}

/// Cursor to show after a hover test.
pub fn hover_cursor(hit: bool) -> Cursor {
    if hit {
        Cursor::Pointer
    } else {
        Cursor::Default
    }
}
