//! The rendering surface the engine drives.
//!
//! The real renderer lives outside this crate (a MapLibre-style engine in the
//! host UI). [`MapSurface`] is the narrow slice of it the engine relies on:
//! source and style-layer bookkeeping, layout visibility, rendered feature
//! queries, camera animation and event subscriptions.
//!
//! [`MemoryMap`] is a headless implementation used by the CLI and tests.

mod memory;
mod surface;
mod types;

pub use memory::MemoryMap;
pub use surface::{MapError, MapEvent, MapSurface, SubscriptionId};
pub use types::{
    CameraAnimation, Cursor, LngLat, Paint, RenderedFeature, ScreenPoint, SourceSpec, StyleLayer,
    Visibility,
};
