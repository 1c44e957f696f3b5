//! Locations command - list the town table.

use mapsync::config::LOCATIONS;

/// Run the locations command.
pub fn run() {
    println!("{:<22} {:<22} {:>10} {:>9} {:>5}", "ID", "LABEL", "LNG", "LAT", "ZOOM");
    for location in LOCATIONS.iter() {
        println!(
            "{:<22} {:<22} {:>10.4} {:>9.4} {:>5}",
            location.id, location.label, location.center.lng, location.center.lat, location.zoom
        );
    }
}
