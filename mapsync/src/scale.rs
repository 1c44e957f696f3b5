//! Scale bar text for the current view.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Ground resolution of a Web Mercator tile pixel at the equator, zoom 0.
pub const EQUATOR_METERS_PER_PIXEL: f64 = 156_543.033_92;

const METERS_PER_MILE: f64 = 1609.34;
const FEET_PER_METER: f64 = 3.28084;

/// Measurement system for the scale label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleUnit {
    #[default]
    Imperial,
    Metric,
}

impl FromStr for ScaleUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "imperial" => Ok(Self::Imperial),
            "metric" => Ok(Self::Metric),
            other => Err(format!("unknown unit '{}'", other)),
        }
    }
}

/// Meters covered by one screen pixel at `lat` and `zoom`.
pub fn meters_per_pixel(lat: f64, zoom: f64) -> f64 {
    EQUATOR_METERS_PER_PIXEL * (lat * PI / 180.0).cos() / 2f64.powf(zoom)
}

/// Width of the viewport expressed as a distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBar {
    meters: f64,
}

impl ScaleBar {
    /// Scale for a viewport `width_px` wide centered on `lat`.
    pub fn for_view(lat: f64, zoom: f64, width_px: f64) -> Self {
        Self {
            meters: meters_per_pixel(lat, zoom) * width_px,
        }
    }

    pub fn meters(&self) -> f64 {
        self.meters
    }

    /// Label text: miles or feet, kilometres or meters, switching at one
    /// whole unit.
    pub fn label(&self, unit: ScaleUnit) -> String {
        match unit {
            ScaleUnit::Imperial => {
                let miles = self.meters / METERS_PER_MILE;
                if miles >= 1.0 {
                    format!("{:.1} mi", miles)
                } else {
                    format!("{} ft", (self.meters * FEET_PER_METER).round())
                }
            }
            ScaleUnit::Metric => {
                let km = self.meters / 1000.0;
                if km >= 1.0 {
                    format!("{:.1} km", km)
                } else {
                    format!("{} m", self.meters.round())
                }
            }
        }
    }
}

impl fmt::Display for ScaleBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label(ScaleUnit::default()))
    }
}
