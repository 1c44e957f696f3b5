//! Preview command - drive a headless map session and print the map.
//!
//! Loads layers exactly like a browser session would, renders them into a
//! [`MemoryMap`] and reports the resulting sources, style layers and camera.

use mapsync::config::{find_location, BaseMapType, INITIAL_CENTER, INITIAL_ZOOM};
use mapsync::map::{MemoryMap, Paint, SourceSpec, Visibility};
use mapsync::scale::{ScaleBar, ScaleUnit};
use mapsync::session::MapSession;
use mapsync::sync::SyncReport;

use crate::error::CliError;
use crate::runner::{CliRunner, SourceArgs};

/// Arguments for the preview command.
#[derive(Debug, clap::Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Enable a layer in addition to the defaults (repeatable)
    #[arg(long = "enable", value_name = "ID")]
    pub enable: Vec<String>,

    /// Disable a default layer (repeatable)
    #[arg(long = "disable", value_name = "ID")]
    pub disable: Vec<String>,

    /// Base map: street, satellite or terrain
    #[arg(long)]
    pub base_map: Option<BaseMapType>,

    /// Fly to a town (see `mapsync locations`)
    #[arg(long, value_name = "LOCATION")]
    pub goto: Option<String>,

    /// Scale bar units: imperial or metric
    #[arg(long, default_value = "imperial")]
    pub unit: ScaleUnit,

    /// Viewport width in pixels used for the scale bar
    #[arg(long, default_value_t = 1024.0)]
    pub width: f64,
}

/// Run the preview command.
pub fn run(runner: &CliRunner, args: PreviewArgs) -> Result<(), CliError> {
    runner.log_startup("preview");

    if let Some(id) = &args.goto {
        if find_location(id).is_none() {
            return Err(CliError::UnknownLocation(id.clone()));
        }
    }

    let loaded = runner.load(&args.source)?;

    let mut session = MapSession::new(runner.logger().clone());
    let token = session.begin_load();
    session.complete_load(token, Ok(loaded));
    session.attach_map(MemoryMap::with_default_style());
    session.map_ready();

    for id in &args.enable {
        warn_if_unresolved(&session, id);
        if !session.enabled_layers().contains(id) {
            session.toggle_layer(id);
        }
    }
    for id in &args.disable {
        if session.enabled_layers().contains(id) {
            session.toggle_layer(id);
        }
    }
    if let Some(kind) = args.base_map {
        session.set_base_map(kind);
    }
    if let Some(id) = &args.goto {
        session.go_to(id);
    }

    let report = session.sync().unwrap_or_default();
    print_session(&session, &report, args.unit, args.width);
    Ok(())
}

fn warn_if_unresolved(session: &MapSession<MemoryMap>, id: &str) {
    if !session.layers().contains(id) {
        eprintln!("Warning: '{}' is not a resolved layer and will not be drawn", id);
    }
}

fn print_session(session: &MapSession<MemoryMap>, report: &SyncReport, unit: ScaleUnit, width: f64) {
    let Some(map) = session.map() else {
        return;
    };

    println!("Base map: {}", session.base_map());
    let enabled: Vec<&str> = session.enabled_layers().iter().collect();
    println!("Enabled:  {}", if enabled.is_empty() { "-".to_string() } else { enabled.join(", ") });
    println!();

    println!("Sources:");
    for id in map.source_ids() {
        if let Some(source) = map.source(&id) {
            let (kind, tiles) = match source {
                SourceSpec::Vector { tiles } => ("vector", tiles),
                SourceSpec::Raster { tiles, .. } => ("raster", tiles),
            };
            println!("  {:<16} {:<7} {}", id, kind, tiles.join(" "));
        }
    }
    println!();

    println!("Style layers (bottom to top):");
    for layer in map.layers() {
        println!(
            "  {:<24} {:<7} {:<38} {}",
            layer.id,
            layer.paint.kind(),
            describe_paint(&layer.paint),
            match layer.visibility {
                Visibility::Visible => "visible",
                Visibility::Hidden => "hidden",
            }
        );
    }
    println!();

    let (center, zoom) = match map.camera_history().last() {
        Some(flight) => {
            println!(
                "Camera:   {} zoom {} over {} ms",
                flight.center,
                flight.zoom,
                flight.duration.as_millis()
            );
            (flight.center, flight.zoom)
        }
        None => {
            println!("Camera:   {} zoom {} (initial view)", INITIAL_CENTER, INITIAL_ZOOM);
            (INITIAL_CENTER, INITIAL_ZOOM)
        }
    };
    let scale = ScaleBar::for_view(center.lat, zoom, width);
    println!("Scale:    {} across {} px", scale.label(unit), width);

    if !report.failed.is_empty() {
        println!();
        println!("Failed layers:");
        for failure in &report.failed {
            println!("  {}: {}", failure.layer_id, failure.error);
        }
    }
}

fn describe_paint(paint: &Paint) -> String {
    match paint {
        Paint::Circle {
            color,
            radius,
            stroke_color,
            stroke_width,
        } => format!(
            "{} r={} stroke {} w={}",
            color, radius, stroke_color, stroke_width
        ),
        Paint::Line {
            color,
            width,
            opacity,
        } => match opacity {
            Some(opacity) => format!("{} w={} @{}", color, width, opacity),
            None => format!("{} w={}", color, width),
        },
        Paint::Fill { color, opacity } => format!("{} @{}", color, opacity),
        Paint::Raster => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_paint() {
        let fill = Paint::Fill {
            color: "#9b59b6".to_string(),
            opacity: 0.15,
        };
        assert_eq!(describe_paint(&fill), "#9b59b6 @0.15");

        let line = Paint::Line {
            color: "#ff6600".to_string(),
            width: 2.0,
            opacity: None,
        };
        assert_eq!(describe_paint(&line), "#ff6600 w=2");
        assert_eq!(describe_paint(&Paint::Raster), "");
    }
}
