//! Value types exchanged with the rendering surface.

use std::fmt;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Geographic position, longitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl fmt::Display for LngLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lng, self.lat)
    }
}

/// Pixel position on the map canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &ScreenPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Layout `visibility` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

impl Visibility {
    /// Style-spec spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "none",
        }
    }
}

/// Source definition handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// Vector tiles from URL templates.
    Vector { tiles: Vec<String> },
    /// Raster tiles, used by base maps.
    Raster {
        tiles: Vec<String>,
        tile_size: u32,
        attribution: Option<String>,
    },
}

impl SourceSpec {
    pub fn tiles(&self) -> &[String] {
        match self {
            Self::Vector { tiles } | Self::Raster { tiles, .. } => tiles,
        }
    }
}

/// Paint properties for one style layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Circle {
        color: String,
        radius: f64,
        stroke_color: String,
        stroke_width: f64,
    },
    Line {
        color: String,
        width: f64,
        /// `None` leaves the renderer default (fully opaque).
        opacity: Option<f64>,
    },
    Fill {
        color: String,
        opacity: f64,
    },
    Raster,
}

impl Paint {
    /// Style-spec layer `type`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Circle { .. } => "circle",
            Self::Line { .. } => "line",
            Self::Fill { .. } => "fill",
            Self::Raster => "raster",
        }
    }
}

/// One style layer (sublayer) drawn from a source.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleLayer {
    pub id: String,
    pub source: String,
    /// Named layer inside vector tiles; `None` for raster sources.
    pub source_layer: Option<String>,
    pub paint: Paint,
    pub visibility: Visibility,
}

/// A feature returned by a rendered-features query.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFeature {
    /// Style layer the feature was drawn by.
    pub layer_id: String,
    pub properties: IndexMap<String, Value>,
}

/// Camera transition request.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraAnimation {
    pub center: LngLat,
    pub zoom: f64,
    pub duration: Duration,
    /// Run even when the user prefers reduced motion or the map is idle.
    pub essential: bool,
}

/// Pointer style over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}
