//! Sweep command - estimate the price across holding periods.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use colored::Colorize;
use resale::{DecisionTreeRegressor, PropertyInputs, SweepSeries, sweep_years_holding};

use crate::cli::SweepFormat;
use crate::fmt::format_price;

/// Width of the bar drawn next to each price in table output.
const BAR_WIDTH: usize = 30;

pub fn run(
    model_path: PathBuf,
    inputs: PropertyInputs,
    min_years: u32,
    max_years: u32,
    format: SweepFormat,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if min_years > max_years {
        return Err(format!(
            "Empty sweep range: --min {} is greater than --max {}",
            min_years, max_years
        )
        .into());
    }

    let (model, metadata) = DecisionTreeRegressor::load(&model_path)?;
    if verbose {
        eprintln!("Loaded model {} ({})", metadata.file, metadata.hash);
    }

    let series = sweep_years_holding(&model, &inputs, min_years, max_years)?;

    match output {
        Some(path) => {
            let file = File::create(&path)
                .map_err(|e| format!("Failed to create '{}': {}", path.display(), e))?;
            write_series(&series, &format, BufWriter::new(file), false)?;
            println!(
                "{} {} points to {}",
                "Wrote".green().bold(),
                series.len(),
                path.display().to_string().cyan()
            );
        }
        None => write_series(&series, &format, io::stdout().lock(), true)?,
    }

    Ok(())
}

fn write_series<W: Write>(
    series: &SweepSeries,
    format: &SweepFormat,
    mut writer: W,
    colorize: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        SweepFormat::Csv => series.write_csv(writer)?,
        SweepFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, series)?;
            writeln!(writer)?;
        }
        SweepFormat::Table => {
            let (lo, hi) = series.price_range().unwrap_or((0.0, 0.0));
            let span = hi - lo;
            writeln!(writer, "{:>5}  {:>12}", "Years", "Price")?;
            for point in series.iter() {
                let filled = if span > 0.0 {
                    (((point.predicted_price - lo) / span) * BAR_WIDTH as f64).round() as usize
                } else {
                    BAR_WIDTH
                };
                let bar = "█".repeat(filled.max(1));
                let bar = if colorize {
                    bar.cyan().to_string()
                } else {
                    bar
                };
                writeln!(
                    writer,
                    "{:>5}  {:>12}  {}",
                    point.years_holding,
                    format_price(point.predicted_price),
                    bar
                )?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use resale::SweepPoint;

    fn series() -> SweepSeries {
        SweepSeries {
            points: vec![
                SweepPoint {
                    years_holding: 0,
                    predicted_price: 300000.0,
                },
                SweepPoint {
                    years_holding: 1,
                    predicted_price: 250000.0,
                },
            ],
        }
    }

    #[test]
    fn test_table_output() {
        let mut buffer = Vec::new();
        write_series(&series(), &SweepFormat::Table, &mut buffer, false).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("$300,000"));
        assert!(lines[1].ends_with(&"█".repeat(BAR_WIDTH)));
        assert!(lines[2].contains("$250,000"));
    }

    #[test]
    fn test_writes_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let model = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../data")
            .join("decision_tree_model.json");
        let output = dir.path().join("sweep.csv");

        run(
            model,
            PropertyInputs::default(),
            0,
            60,
            SweepFormat::Csv,
            Some(output.clone()),
            false,
        )
        .unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "years_holding,predicted_price");
        assert_eq!(lines.len(), 62);
        assert!(lines[61].starts_with("60,"));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = run(
            PathBuf::from("unused.json"),
            PropertyInputs::default(),
            10,
            5,
            SweepFormat::Table,
            None,
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Empty sweep range"));
    }

    #[test]
    fn test_json_output() {
        let mut buffer = Vec::new();
        write_series(&series(), &SweepFormat::Json, &mut buffer, false).unwrap();
        let parsed: SweepSeries = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed, series());
    }
}
