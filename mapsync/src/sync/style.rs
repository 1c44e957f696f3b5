//! Per-geometry styling rules and sublayer naming.

use crate::config::{GeometryType, LayerConfig};
use crate::map::{Paint, StyleLayer, Visibility};

/// Name of the single layer inside tipg vector tiles.
pub const SOURCE_LAYER: &str = "default";

pub const CIRCLE_RADIUS: f64 = 6.0;
pub const CIRCLE_STROKE_COLOR: &str = "#fff";
pub const CIRCLE_STROKE_WIDTH: f64 = 1.0;

pub const LINE_WIDTH: f64 = 2.0;

pub const POLYGON_FILL_OPACITY: f64 = 0.3;
pub const POLYGON_OUTLINE_WIDTH: f64 = 1.0;

/// Jurisdiction boundaries ignore their configured color.
pub const JURISDICTIONS_LAYER_ID: &str = "jurisdictions";
pub const JURISDICTIONS_FILL_COLOR: &str = "#9b59b6";
pub const JURISDICTIONS_FILL_OPACITY: f64 = 0.15;
pub const JURISDICTIONS_OUTLINE_COLOR: &str = "#8e44ad";
pub const JURISDICTIONS_OUTLINE_WIDTH: f64 = 2.0;
pub const JURISDICTIONS_OUTLINE_OPACITY: f64 = 0.8;

/// Role of a sublayer within its logical layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SublayerKind {
    Circle,
    Line,
    Fill,
    Outline,
}

impl SublayerKind {
    pub const ALL: [SublayerKind; 4] = [Self::Circle, Self::Line, Self::Fill, Self::Outline];

    /// Suffix appended to the layer id, including the dash.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Circle => "-circle",
            Self::Line => "-line",
            Self::Fill => "-fill",
            Self::Outline => "-outline",
        }
    }

    /// Sublayers drawn for `geometry`, bottom to top.
    pub fn for_geometry(geometry: GeometryType) -> &'static [SublayerKind] {
        match geometry {
            GeometryType::Point => &[Self::Circle],
            GeometryType::LineString => &[Self::Line],
            GeometryType::Polygon => &[Self::Fill, Self::Outline],
        }
    }

    pub fn sublayer_id(&self, layer_id: &str) -> String {
        format!("{}{}", layer_id, self.suffix())
    }
}

/// Ids of the sublayers that render `layer`.
pub fn sublayer_ids(layer: &LayerConfig) -> Vec<String> {
    SublayerKind::for_geometry(layer.geometry_type)
        .iter()
        .map(|kind| kind.sublayer_id(&layer.id))
        .collect()
}

/// Recover the logical layer id from a sublayer id.
pub fn base_layer_id(sublayer_id: &str) -> Option<&str> {
    SublayerKind::ALL
        .iter()
        .find_map(|kind| sublayer_id.strip_suffix(kind.suffix()))
        .filter(|base| !base.is_empty())
}

/// Vector tile URL template for a collection.
pub fn tile_url(tipg_url: &str, schema_prefix: &str, layer_id: &str) -> String {
    format!(
        "{}/collections/{}.{}/tiles/WebMercatorQuad/{{z}}/{{x}}/{{y}}",
        tipg_url.trim_end_matches('/'),
        schema_prefix,
        layer_id
    )
}

/// Build the style layers for `layer`, bottom to top.
pub fn build_sublayers(layer: &LayerConfig) -> Vec<StyleLayer> {
    SublayerKind::for_geometry(layer.geometry_type)
        .iter()
        .map(|kind| StyleLayer {
            id: kind.sublayer_id(&layer.id),
            source: layer.id.clone(),
            source_layer: Some(SOURCE_LAYER.to_string()),
            paint: paint_for(layer, *kind),
            visibility: Visibility::Visible,
        })
        .collect()
}

fn paint_for(layer: &LayerConfig, kind: SublayerKind) -> Paint {
    let jurisdictions = layer.id == JURISDICTIONS_LAYER_ID;
    match kind {
        SublayerKind::Circle => Paint::Circle {
            color: layer.color.clone(),
            radius: CIRCLE_RADIUS,
            stroke_color: CIRCLE_STROKE_COLOR.to_string(),
            stroke_width: CIRCLE_STROKE_WIDTH,
        },
        SublayerKind::Line => Paint::Line {
            color: layer.color.clone(),
            width: LINE_WIDTH,
            opacity: None,
        },
        SublayerKind::Fill if jurisdictions => Paint::Fill {
            color: JURISDICTIONS_FILL_COLOR.to_string(),
            opacity: JURISDICTIONS_FILL_OPACITY,
        },
        SublayerKind::Fill => Paint::Fill {
            color: layer.color.clone(),
            opacity: POLYGON_FILL_OPACITY,
        },
        SublayerKind::Outline if jurisdictions => Paint::Line {
            color: JURISDICTIONS_OUTLINE_COLOR.to_string(),
            width: JURISDICTIONS_OUTLINE_WIDTH,
            opacity: Some(JURISDICTIONS_OUTLINE_OPACITY),
        },
        SublayerKind::Outline => Paint::Line {
            color: layer.color.clone(),
            width: POLYGON_OUTLINE_WIDTH,
            opacity: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(id: &str, geometry_type: GeometryType, color: &str) -> LayerConfig {
        LayerConfig {
            id: id.to_string(),
            name: id.to_string(),
            geometry_type,
            color: color.to_string(),
            order: 999,
        }
    }

    #[test]
    fn test_sublayer_ids_per_geometry() {
        assert_eq!(
            sublayer_ids(&layer("address", GeometryType::Point, "#e41a1c")),
            vec!["address-circle"]
        );
        assert_eq!(
            sublayer_ids(&layer("road", GeometryType::LineString, "#ff6600")),
            vec!["road-line"]
        );
        assert_eq!(
            sublayer_ids(&layer("towns", GeometryType::Polygon, "#377eb8")),
            vec!["towns-fill", "towns-outline"]
        );
    }

    #[test]
    fn test_base_layer_id() {
        assert_eq!(base_layer_id("road-line"), Some("road"));
        assert_eq!(base_layer_id("tax-parcels-outline"), Some("tax-parcels"));
        assert_eq!(base_layer_id("address-circle"), Some("address"));
        assert_eq!(base_layer_id("osm"), None);
        assert_eq!(base_layer_id("-fill"), None);
    }

    #[test]
    fn test_tile_url_template() {
        assert_eq!(
            tile_url("http://localhost:8000", "gunnison", "road"),
            "http://localhost:8000/collections/gunnison.road/tiles/WebMercatorQuad/{z}/{x}/{y}"
        );
    }

    #[test]
    fn test_point_paint() {
        let built = build_sublayers(&layer("address", GeometryType::Point, "#e41a1c"));
        assert_eq!(built.len(), 1);
        assert_eq!(built[0].source, "address");
        assert_eq!(built[0].source_layer.as_deref(), Some("default"));
        assert_eq!(
            built[0].paint,
            Paint::Circle {
                color: "#e41a1c".to_string(),
                radius: 6.0,
                stroke_color: "#fff".to_string(),
                stroke_width: 1.0,
            }
        );
    }

    #[test]
    fn test_polygon_paint_uses_configured_color() {
        let built = build_sublayers(&layer("towns", GeometryType::Polygon, "#377eb8"));
        assert_eq!(
            built[0].paint,
            Paint::Fill {
                color: "#377eb8".to_string(),
                opacity: 0.3
            }
        );
        assert_eq!(
            built[1].paint,
            Paint::Line {
                color: "#377eb8".to_string(),
                width: 1.0,
                opacity: None
            }
        );
    }

    #[test]
    fn test_jurisdictions_paint_ignores_color() {
        let built = build_sublayers(&layer("jurisdictions", GeometryType::Polygon, "#ff7f00"));
        assert_eq!(
            built[0].paint,
            Paint::Fill {
                color: "#9b59b6".to_string(),
                opacity: 0.15
            }
        );
        assert_eq!(
            built[1].paint,
            Paint::Line {
                color: "#8e44ad".to_string(),
                width: 2.0,
                opacity: Some(0.8)
            }
        );
    }

    #[test]
    fn test_jurisdictions_exception_is_polygon_only() {
        let built = build_sublayers(&layer("jurisdictions", GeometryType::LineString, "#ff7f00"));
        assert_eq!(
            built[0].paint,
            Paint::Line {
                color: "#ff7f00".to_string(),
                width: 2.0,
                opacity: None
            }
        );
    }
}
