//! Camera jumps to named towns.

use std::time::Duration;

use crate::config::{find_location, LocationConfig};
use crate::map::{CameraAnimation, MapSurface};

/// Length of every go-to animation.
pub const FLY_DURATION: Duration = Duration::from_millis(2000);

/// Flies the camera to entries of the static location table.
///
/// Holds no state: a chosen location is turned into one camera animation and
/// then forgotten.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationNavigator;

impl LocationNavigator {
    pub fn new() -> Self {
        Self
    }

    /// Animate to `location_id`.
    ///
    /// Returns `false` without side effects when the id is unknown or there
    /// is no map yet.
    pub fn go_to<M: MapSurface + ?Sized>(&self, map: Option<&mut M>, location_id: &str) -> bool {
        let (Some(location), Some(map)) = (find_location(location_id), map) else {
            return false;
        };
        map.fly_to(animation_for(location));
        true
    }
}

/// The camera move for `location`.
pub fn animation_for(location: &LocationConfig) -> CameraAnimation {
    CameraAnimation {
        center: location.center,
        zoom: location.zoom,
        duration: FLY_DURATION,
        essential: true,
    }
}
