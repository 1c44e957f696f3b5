//! Configuration for the layer engine.
//!
//! - [`AppConfig`]: the static `config.json` document served next to the app
//! - [`LayerOverride`] / [`LayerConfig`]: per-layer partial and resolved forms
//! - [`BaseMapConfig`] / [`LocationConfig`]: static tables compiled into the crate
//!
//! ```
//! use mapsync::config::{AppConfig, GeometryType};
//!
//! let config = AppConfig::from_json(r##"{
//!     "schemaPrefix": "gunnison",
//!     "layers": { "road": { "geometryType": "LineString", "color": "#ff6600" } }
//! }"##).unwrap();
//!
//! assert_eq!(config.layers["road"].geometry_type, Some(GeometryType::LineString));
//! ```

mod base_maps;
mod defaults;
mod file;
mod locations;
mod tipg;
mod types;

pub use base_maps::{base_map, BaseMapConfig, BaseMapType, BASE_MAPS};
pub use defaults::*;
pub use file::ConfigError;
pub use locations::{find_location, LocationConfig, LOCATIONS};
pub use tipg::resolve_tipg_url;
pub use types::{AppConfig, GeometryType, LayerConfig, LayerOverride};
