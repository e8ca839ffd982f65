//! Predict command - estimate the resale price of one flat.

use std::path::PathBuf;

use colored::Colorize;
use resale::{DecisionTreeRegressor, PropertyInputs, Regressor, build_and_predict};

use crate::fmt::format_price;

pub fn run(
    model_path: PathBuf,
    inputs: PropertyInputs,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (model, metadata) = DecisionTreeRegressor::load(&model_path)?;

    if verbose && !json_output {
        println!(
            "Loaded model {} ({}, {} nodes)",
            metadata.file,
            metadata.hash,
            metadata.node_count
        );
    }

    let encoded = inputs.encode()?;
    let price = build_and_predict(&model, &inputs)?;

    if json_output {
        let report = serde_json::json!({
            "input": inputs,
            "encoded": encoded,
            "predicted_price": price,
            "model": {
                "name": model.name(),
                "file": metadata.file,
                "hash": metadata.hash,
            },
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Predicted Resale Price:".cyan().bold(),
        format_price(price).white().bold()
    );

    if verbose {
        println!();
        println!("{}", "Encoded record:".yellow().bold());
        for (name, value) in encoded.to_record() {
            println!("  {:<24} {}", name, value);
        }
    }

    Ok(())
}
