//! Resale CLI - flat resale price estimator.

mod cli;
mod commands;
mod fmt;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            model,
            geodata,
            port,
            no_open,
        } => commands::serve::run(model.path, geodata.path, port, no_open, cli.verbose),

        Commands::Predict {
            model,
            property,
            json,
        } => commands::predict::run(model.path, property.into(), json, cli.verbose),

        Commands::Sweep {
            model,
            property,
            min,
            max,
            format,
            output,
        } => commands::sweep::run(
            model.path,
            property.into(),
            min,
            max,
            format,
            output,
            cli.verbose,
        ),

        Commands::Regions { geodata, json } => {
            commands::regions::run(geodata.path, json, cli.verbose)
        }

        Commands::Info { model, json } => commands::info::run(model.path, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
