//! Serve command - open the interactive estimation form.

use std::path::PathBuf;

use colored::Colorize;
use resale::{Estimator, Regressor, ResaleConfig};

use crate::server::{app, state::AppState};

pub fn run(
    model_path: PathBuf,
    geodata_path: PathBuf,
    port: u16,
    no_open: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ResaleConfig {
        model_path,
        geodata_path,
        ..ResaleConfig::default()
    };

    // Missing or corrupt resources abort before anything is served
    let estimator = Estimator::load(config)?;

    if verbose {
        if let Some(metadata) = estimator.model_metadata() {
            println!(
                "Loaded model {} from {} ({}, {} nodes, depth {})",
                estimator.model().name(),
                metadata.path.display(),
                metadata.hash,
                metadata.node_count,
                metadata.depth
            );
        }
        println!(
            "Loaded {} regions from {}",
            estimator.regions().len(),
            estimator.config().geodata_path.display()
        );
    }

    if let Err(e) = estimator.map_view() {
        println!(
            "{} {} (the map will show this error; predictions still work)",
            "Warning:".yellow(),
            e
        );
    }

    let model_file = estimator.config().model_path.clone();
    let geodata_file = estimator.config().geodata_path.clone();
    let state = AppState::new(estimator, verbose);

    // Print server info
    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting estimator at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Model:   {}", model_file.display());
    println!("  Regions: {}", geodata_file.display());
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    // Open browser if requested
    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            println!();
            println!("{}", "Shutting down...".yellow());
            std::process::exit(0);
        });

        if let Err(e) = app::run_server(state, port).await {
            eprintln!("Server error: {}", e);
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../data")
            .join(name)
    }

    #[test]
    fn test_missing_model_fails_before_serving() {
        let err = run(
            PathBuf::from("/nonexistent/decision_tree_model.json"),
            data_path("sample.geojson"),
            0,
            true,
            false,
        )
        .unwrap_err();

        assert!(err.to_string().starts_with("Failed to load"));
        assert!(err.to_string().contains("decision_tree_model.json"));
    }

    #[test]
    fn test_missing_geodata_fails_before_serving() {
        let err = run(
            data_path("decision_tree_model.json"),
            PathBuf::from("/nonexistent/sample.geojson"),
            0,
            true,
            false,
        )
        .unwrap_err();

        assert!(err.to_string().contains("sample.geojson"));
    }
}
