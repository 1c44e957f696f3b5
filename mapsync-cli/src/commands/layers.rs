//! Layers command - print the resolved layer list.

use crate::error::CliError;
use crate::runner::{CliRunner, SourceArgs};

/// Arguments for the layers command.
#[derive(Debug, clap::Args)]
pub struct LayersArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the load result as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Run the layers command.
pub fn run(runner: &CliRunner, args: LayersArgs) -> Result<(), CliError> {
    runner.log_startup("layers");
    let loaded = runner.load(&args.source)?;

    if args.json {
        let text = serde_json::to_string_pretty(&loaded).map_err(CliError::Output)?;
        println!("{}", text);
        return Ok(());
    }

    println!("tipg:   {}", loaded.tipg_url);
    println!("schema: {}", loaded.schema_prefix);
    println!();

    if loaded.layers.is_empty() {
        println!("No renderable layers.");
        return Ok(());
    }

    println!(
        "{:>5}  {:<24} {:<10} {:<8} {:<7} NAME",
        "ORDER", "ID", "GEOMETRY", "COLOR", "DEFAULT"
    );
    for layer in &loaded.layers {
        let default_on = loaded.default_enabled_layers.contains(&layer.id);
        println!(
            "{:>5}  {:<24} {:<10} {:<8} {:<7} {}",
            layer.order,
            layer.id,
            layer.geometry_type.to_string(),
            layer.color,
            if default_on { "on" } else { "" },
            layer.name
        );
    }
    println!();
    println!("{} layers", loaded.layers.len());

    Ok(())
}
