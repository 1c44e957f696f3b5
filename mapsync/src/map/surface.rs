//! Rendering surface trait.

use thiserror::Error;

use super::types::{CameraAnimation, RenderedFeature, ScreenPoint, SourceSpec, StyleLayer, Visibility};

/// Failures reported by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("source '{0}' already exists")]
    DuplicateSource(String),

    #[error("layer '{0}' already exists")]
    DuplicateLayer(String),

    #[error("source '{0}' does not exist")]
    UnknownSource(String),

    #[error("layer '{0}' does not exist")]
    UnknownLayer(String),

    /// Anything else the engine rejects (bad tile URL, style validation...).
    #[error("map engine error: {0}")]
    Engine(String),
}

/// Events a host can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapEvent {
    Load,
    Click,
    PointerMove,
}

/// Handle returned by [`MapSurface::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// The operations the engine performs on a live map.
///
/// Calls are synchronous and made from the single UI thread. Implementations
/// must not be used for add/remove before their own load has completed; the
/// session enforces that.
pub trait MapSurface {
    fn has_source(&self, id: &str) -> bool;

    fn add_source(&mut self, id: &str, source: SourceSpec) -> Result<(), MapError>;

    fn remove_source(&mut self, id: &str) -> Result<(), MapError>;

    fn has_layer(&self, id: &str) -> bool;

    /// Add a style layer on top of the existing ones.
    fn add_layer(&mut self, layer: StyleLayer) -> Result<(), MapError>;

    fn remove_layer(&mut self, id: &str) -> Result<(), MapError>;

    fn set_visibility(&mut self, layer_id: &str, visibility: Visibility) -> Result<(), MapError>;

    /// Features under `point` drawn by any of `layer_ids`, topmost first.
    fn query_rendered_features(
        &self,
        point: ScreenPoint,
        layer_ids: &[String],
    ) -> Vec<RenderedFeature>;

    fn fly_to(&mut self, animation: CameraAnimation);

    fn subscribe(&mut self, event: MapEvent) -> SubscriptionId;

    fn unsubscribe(&mut self, id: SubscriptionId);

    /// Tear down the renderer. Called once when the owning view goes away.
    fn release(&mut self) {}
}

impl<T: MapSurface + ?Sized> MapSurface for &mut T {
    fn has_source(&self, id: &str) -> bool {
        (**self).has_source(id)
    }

    fn add_source(&mut self, id: &str, source: SourceSpec) -> Result<(), MapError> {
        (**self).add_source(id, source)
    }

    fn remove_source(&mut self, id: &str) -> Result<(), MapError> {
        (**self).remove_source(id)
    }

    fn has_layer(&self, id: &str) -> bool {
        (**self).has_layer(id)
    }

    fn add_layer(&mut self, layer: StyleLayer) -> Result<(), MapError> {
        (**self).add_layer(layer)
    }

    fn remove_layer(&mut self, id: &str) -> Result<(), MapError> {
        (**self).remove_layer(id)
    }

    fn set_visibility(&mut self, layer_id: &str, visibility: Visibility) -> Result<(), MapError> {
        (**self).set_visibility(layer_id, visibility)
    }

    fn query_rendered_features(
        &self,
        point: ScreenPoint,
        layer_ids: &[String],
    ) -> Vec<RenderedFeature> {
        (**self).query_rendered_features(point, layer_ids)
    }

    fn fly_to(&mut self, animation: CameraAnimation) {
        (**self).fly_to(animation)
    }

    fn subscribe(&mut self, event: MapEvent) -> SubscriptionId {
        (**self).subscribe(event)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        (**self).unsubscribe(id)
    }

    fn release(&mut self) {
        (**self).release()
    }
}
