//! Default values applied when `config.json` leaves a field out.

use crate::map::LngLat;

/// Color for layers whose override has no `color`.
pub const DEFAULT_LAYER_COLOR: &str = "#3388ff";

/// Sort key for layers whose override has no `order`.
pub const DEFAULT_LAYER_ORDER: i32 = 999;

/// tipg's default database schema.
pub const DEFAULT_SCHEMA_PREFIX: &str = "public";

/// Port of the local frontend dev server.
pub const DEV_SERVER_PORT: u16 = 5173;

/// tipg address used while running behind the dev server.
pub const DEV_TIPG_URL: &str = "http://localhost:8000";

/// Path under the page origin where tipg is proxied in deployments.
pub const TIPG_PROXY_PATH: &str = "/api";

/// Map center on first load (Gunnison County).
pub const INITIAL_CENTER: LngLat = LngLat::new(-106.9, 38.6);

pub const INITIAL_ZOOM: f64 = 9.0;

/// Where the host serves the config document, relative to the page origin.
pub const DEFAULT_CONFIG_URL: &str = "/config.json";
