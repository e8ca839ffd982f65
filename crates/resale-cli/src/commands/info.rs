//! Info command - describe the model artifact and category tables.

use std::path::PathBuf;

use colored::Colorize;
use resale::{CategoryKind, DecisionTreeRegressor, FEATURE_NAMES, Regressor};

pub fn run(
    model_path: PathBuf,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (model, metadata) = DecisionTreeRegressor::load(&model_path)?;

    let matches_layout = model
        .feature_names()
        .iter()
        .map(String::as_str)
        .eq(FEATURE_NAMES.iter().copied());

    if json_output {
        let tables: serde_json::Map<String, serde_json::Value> = CategoryKind::ALL
            .iter()
            .map(|kind| (kind.name().to_string(), serde_json::json!(kind.labels())))
            .collect();
        let info = serde_json::json!({
            "name": model.name(),
            "metadata": metadata,
            "leaf_count": model.leaf_count(),
            "feature_names": model.feature_names(),
            "matches_feature_layout": matches_layout,
            "category_tables": tables,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Model".cyan().bold(),
        model.name().white().bold()
    );
    println!();
    println!("  File:   {}", metadata.path.display());
    println!("  Hash:   {}", metadata.hash);
    println!("  Size:   {} bytes", metadata.size_bytes);
    println!(
        "  Tree:   {} nodes, {} leaves, depth {}",
        metadata.node_count,
        model.leaf_count(),
        metadata.depth
    );
    println!();

    println!("{}", "Features:".yellow().bold());
    for (position, name) in model.feature_names().iter().enumerate() {
        println!("  {:>2}. {}", position, name);
    }
    println!();

    if matches_layout {
        println!("{}", "Feature layout matches the prediction record.".green());
    } else {
        println!(
            "{} Feature layout differs from the prediction record; every prediction will fail.",
            "Warning:".yellow().bold()
        );
    }
    println!();

    println!("{}", "Category tables:".yellow().bold());
    for kind in CategoryKind::ALL {
        println!("  {:<14} {} labels", kind.name(), kind.len());
        if verbose {
            for (code, label) in kind.labels().iter().enumerate() {
                println!("    {:>2} {}", code, label);
            }
        }
    }

    Ok(())
}
