//! Serde models for `config.json` and the resolved layer record.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::defaults::DEFAULT_SCHEMA_PREFIX;

/// Geometry carried by a vector collection. Decides which sublayers render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point => write!(f, "Point"),
            Self::LineString => write!(f, "LineString"),
            Self::Polygon => write!(f, "Polygon"),
        }
    }
}

/// Local per-layer settings. Every field is optional; the map key is the id.
///
/// An override without `geometry_type` is not renderable and never makes it
/// into the resolved list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry_type: Option<GeometryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

/// The static application config document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// tipg base URL. `None` means derive it from the page location.
    #[serde(default)]
    pub tipg_url: Option<String>,

    /// Database schema the collections live in (`{schema}.{layer}`).
    #[serde(default = "default_schema_prefix")]
    pub schema_prefix: String,

    /// Layers switched on when the session starts.
    #[serde(default, deserialize_with = "null_as_default")]
    pub default_enabled_layers: Vec<String>,

    /// Collections never shown, even when configured.
    #[serde(default, deserialize_with = "null_as_default")]
    pub hidden_collections: BTreeSet<String>,

    /// Overrides keyed by layer id, in document order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub layers: IndexMap<String, LayerOverride>,
}

/// `null` reads the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_schema_prefix() -> String {
    DEFAULT_SCHEMA_PREFIX.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tipg_url: None,
            schema_prefix: default_schema_prefix(),
            default_enabled_layers: Vec::new(),
            hidden_collections: BTreeSet::new(),
            layers: IndexMap::new(),
        }
    }
}

/// A fully resolved, renderable layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerConfig {
    /// Stable id; also the vector tile collection name.
    pub id: String,
    pub name: String,
    pub geometry_type: GeometryType,
    /// `#rrggbb`
    pub color: String,
    /// Relative sort key, not unique.
    pub order: i32,
}
