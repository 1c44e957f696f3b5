//! mapsync - vector layer catalog and map-state reconciliation
//!
//! This library resolves which tipg collections a map viewer should offer,
//! keeps a rendering surface in step with the layers the user enabled, and
//! handles the surrounding interactions: feature picking, base map
//! switching and camera jumps to named towns.
//!
//! # High-Level API
//!
//! [`session::MapSession`] drives a whole map view:
//!
//! ```ignore
//! use mapsync::map::MemoryMap;
//! use mapsync::platform::ReqwestPlatform;
//! use mapsync::session::MapSession;
//!
//! let platform = ReqwestPlatform::new()?;
//! let mut session = MapSession::default();
//! session.load(&platform, "https://maps.example.org/config.json").await;
//!
//! session.attach_map(MemoryMap::with_default_style());
//! session.map_ready();
//! session.toggle_layer("road");
//! session.sync();
//! ```

pub mod basemap;
pub mod catalog;
pub mod config;
pub mod loader;
pub mod log;
pub mod logging;
pub mod map;
pub mod navigator;
pub mod picker;
pub mod platform;
pub mod scale;
pub mod session;
pub mod state;
pub mod sync;

/// Version of the mapsync library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
