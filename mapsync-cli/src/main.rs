//! mapsync CLI - Command-line interface
//!
//! Inspects layer configurations and previews the map state a viewer would
//! build from them, without a browser.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::layers::LayersArgs;
use commands::preview::PreviewArgs;
use error::CliError;
use mapsync::logging::default_log_dir;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "mapsync")]
#[command(version = mapsync::VERSION)]
#[command(about = "Resolve tipg layer catalogs and preview map state", long_about = None)]
struct Cli {
    /// Directory for the session log file
    #[arg(long, global = true, default_value_t = default_log_dir().to_string())]
    log_dir: String,

    /// Enable debug logging for the library
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the layers a viewer would offer
    Layers(LayersArgs),

    /// Run a headless map session and print sources, style layers and camera
    Preview(PreviewArgs),

    /// List the towns available to `preview --goto`
    Locations,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Locations => {
            commands::locations::run();
            Ok(())
        }
        Commands::Layers(args) => {
            let runner = CliRunner::new(&cli.log_dir, cli.verbose)?;
            commands::layers::run(&runner, args)
        }
        Commands::Preview(args) => {
            let runner = CliRunner::new(&cli.log_dir, cli.verbose)?;
            commands::preview::run(&runner, args)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_preview_arguments() {
        let cli = Cli::try_parse_from([
            "mapsync",
            "preview",
            "--config",
            "config.json",
            "--offline",
            "--enable",
            "road",
            "--enable",
            "towns",
            "--base-map",
            "terrain",
            "--goto",
            "marble",
            "--unit",
            "metric",
        ])
        .unwrap();

        let Commands::Preview(args) = cli.command else {
            panic!("expected preview");
        };
        assert_eq!(args.enable, vec!["road", "towns"]);
        assert_eq!(args.base_map, Some(mapsync::config::BaseMapType::Terrain));
        assert_eq!(args.goto.as_deref(), Some("marble"));
        assert_eq!(args.unit, mapsync::scale::ScaleUnit::Metric);
        assert!(args.source.offline);
        assert_eq!(cli.log_dir, "logs");
    }

    #[test]
    fn test_offline_conflicts_with_catalog() {
        let result = Cli::try_parse_from([
            "mapsync",
            "layers",
            "--config",
            "config.json",
            "--offline",
            "--catalog",
            "collections.json",
        ]);
        assert!(result.is_err());
    }
}
