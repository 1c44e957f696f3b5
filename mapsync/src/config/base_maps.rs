//! Background raster maps. Exactly one is visible at a time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Selectable base map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseMapType {
    #[default]
    Street,
    Satellite,
    Terrain,
}

impl BaseMapType {
    /// All variants in menu order.
    pub const ALL: [BaseMapType; 3] = [Self::Street, Self::Satellite, Self::Terrain];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Street => "street",
            Self::Satellite => "satellite",
            Self::Terrain => "terrain",
        }
    }
}

impl fmt::Display for BaseMapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BaseMapType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "street" => Ok(Self::Street),
            "satellite" => Ok(Self::Satellite),
            "terrain" => Ok(Self::Terrain),
            other => Err(format!(
                "unknown base map '{}' (expected street, satellite or terrain)",
                other
            )),
        }
    }
}

/// Raster source and layer backing one base map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseMapConfig {
    pub kind: BaseMapType,
    pub name: &'static str,
    pub source_id: &'static str,
    pub layer_id: &'static str,
    pub tiles: &'static [&'static str],
    pub tile_size: u32,
    pub attribution: &'static str,
}

/// Base map table. `street` reuses the `osm` source and layer that exist in
/// the initial style, so it is present before the map is ready.
pub static BASE_MAPS: [BaseMapConfig; 3] = [
    BaseMapConfig {
        kind: BaseMapType::Street,
        name: "Street",
        source_id: "osm",
        layer_id: "osm",
        tiles: &["https://tile.openstreetmap.org/{z}/{x}/{y}.png"],
        tile_size: 256,
        attribution: "© OpenStreetMap contributors",
    },
    BaseMapConfig {
        kind: BaseMapType::Satellite,
        name: "Satellite",
        source_id: "satellite",
        layer_id: "satellite",
        tiles: &["https://services.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"],
        tile_size: 256,
        attribution: "© Esri",
    },
    BaseMapConfig {
        kind: BaseMapType::Terrain,
        name: "Terrain",
        source_id: "terrain",
        layer_id: "terrain",
        tiles: &[
            "https://a.tile.opentopomap.org/{z}/{x}/{y}.png",
            "https://b.tile.opentopomap.org/{z}/{x}/{y}.png",
            "https://c.tile.opentopomap.org/{z}/{x}/{y}.png",
        ],
        tile_size: 256,
        attribution: "© OpenTopoMap contributors",
    },
];

/// Look up the table entry for `kind`.
pub fn base_map(kind: BaseMapType) -> &'static BaseMapConfig {
    match kind {
        BaseMapType::Street => &BASE_MAPS[0],
        BaseMapType::Satellite => &BASE_MAPS[1],
        BaseMapType::Terrain => &BASE_MAPS[2],
    }
}
