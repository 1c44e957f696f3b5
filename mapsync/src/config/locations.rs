//! Towns the camera can jump to.

use crate::map::LngLat;

/// A named camera target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationConfig {
    pub id: &'static str,
    pub label: &'static str,
    pub center: LngLat,
    pub zoom: f64,
}

pub static LOCATIONS: [LocationConfig; 6] = [
    LocationConfig {
        id: "gunnison",
        label: "Gunnison",
        center: LngLat::new(-106.9253, 38.5458),
        zoom: 13.0,
    },
    LocationConfig {
        id: "crested-butte",
        label: "Crested Butte",
        center: LngLat::new(-106.9878, 38.8697),
        zoom: 13.0,
    },
    LocationConfig {
        id: "mount-crested-butte",
        label: "Mount Crested Butte",
        center: LngLat::new(-106.9703, 38.8997),
        zoom: 13.0,
    },
    LocationConfig {
        id: "marble",
        label: "Marble",
        center: LngLat::new(-107.1914, 39.0714),
        zoom: 13.0,
    },
    LocationConfig {
        id: "pitkin",
        label: "Pitkin",
        center: LngLat::new(-106.5167, 38.6083),
        zoom: 13.0,
    },
    LocationConfig {
        id: "somerset",
        label: "Somerset",
        center: LngLat::new(-107.3667, 38.9167),
        zoom: 13.0,
    },
];

pub fn find_location(id: &str) -> Option<&'static LocationConfig> {
    LOCATIONS.iter().find(|loc| loc.id == id)
}
