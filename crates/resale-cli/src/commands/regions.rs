//! Regions command - list the region overlays drawn on the map.

use std::path::PathBuf;

use colored::Colorize;
use resale::{RegionDataset, render_map};

pub fn run(
    geodata_path: PathBuf,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = RegionDataset::load(&geodata_path)?;
    let view = render_map(&dataset)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Regions in".cyan().bold(),
        geodata_path.display().to_string().white()
    );
    println!();

    for record in dataset.records()? {
        println!(
            "  {:<20} population {}",
            record.name.white().bold(),
            record.population
        );
        if verbose {
            let kind = record
                .geometry
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or("unknown");
            println!("  {:<20} geometry {}", "", kind);
        }
    }

    println!();
    println!(
        "{} overlays centred on ({}, {}), zoom {}",
        view.overlays.len().to_string().green(),
        view.center[0],
        view.center[1],
        view.zoom
    );

    Ok(())
}
