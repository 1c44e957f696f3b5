//! Base map selection.
//!
//! Exactly one of the three raster base layers is visible at a time. The
//! street layer ships with the initial style; satellite and terrain are
//! installed hidden once the map is ready.

use crate::config::{base_map, BaseMapConfig, BaseMapType};
use crate::map::{MapError, MapSurface, Paint, SourceSpec, StyleLayer, Visibility};

/// Tracks the active base map and applies it to a surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseMapController {
    current: BaseMapType,
}

impl BaseMapController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> BaseMapType {
        self.current
    }

    /// Add the satellite and terrain layers, hidden, without touching the
    /// street layer. Layers that already exist are left as they are.
    pub fn install<M: MapSurface + ?Sized>(&self, map: &mut M) -> Result<(), MapError> {
        for kind in [BaseMapType::Satellite, BaseMapType::Terrain] {
            install_one(map, base_map(kind))?;
        }
        Ok(())
    }

    /// Make `kind` the visible base map.
    ///
    /// Layers that do not exist yet are skipped, so this may be called
    /// before [`BaseMapController::install`]; the choice is remembered and
    /// applied in full by a later [`BaseMapController::apply`].
    pub fn switch_to<M: MapSurface + ?Sized>(
        &mut self,
        map: &mut M,
        kind: BaseMapType,
    ) -> Result<(), MapError> {
        self.current = kind;
        self.apply(map)
    }

    /// Re-apply the current selection.
    pub fn apply<M: MapSurface + ?Sized>(&self, map: &mut M) -> Result<(), MapError> {
        for kind in BaseMapType::ALL {
            let layer_id = base_map(kind).layer_id;
            if !map.has_layer(layer_id) {
                continue;
            }
            let visibility = if kind == self.current {
                Visibility::Visible
            } else {
                Visibility::Hidden
            };
            map.set_visibility(layer_id, visibility)?;
        }
        Ok(())
    }

    /// Remember a selection without a map to apply it to.
    pub fn select(&mut self, kind: BaseMapType) {
        self.current = kind;
    }
}

fn install_one<M: MapSurface + ?Sized>(map: &mut M, config: &BaseMapConfig) -> Result<(), MapError> {
    if !map.has_source(config.source_id) {
        map.add_source(
            config.source_id,
            SourceSpec::Raster {
                tiles: config.tiles.iter().map(|t| t.to_string()).collect(),
                tile_size: config.tile_size,
                attribution: Some(config.attribution.to_string()),
            },
        )?;
    }
    if !map.has_layer(config.layer_id) {
        map.add_layer(StyleLayer {
            id: config.layer_id.to_string(),
            source: config.source_id.to_string(),
            source_layer: None,
            paint: Paint::Raster,
            visibility: Visibility::Hidden,
        })?;
    }
    Ok(())
}
