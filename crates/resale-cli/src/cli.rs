//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::builder::RangedI64ValueParser;
use clap::{Args, Parser, Subcommand};
use resale::bounds::{self, NumericBounds};
use resale::{
    Category, DEFAULT_GEODATA_PATH, DEFAULT_MODEL_PATH, FlatModel, FlatType, PropertyInputs,
    StoreyRange, Town,
};

/// Resale: flat resale price estimator
#[derive(Parser)]
#[command(name = "resale")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the interactive estimation form
    Serve {
        #[command(flatten)]
        model: ModelArgs,

        #[command(flatten)]
        geodata: GeodataArgs,

        /// Port for web server
        #[arg(short, long, default_value = "8501")]
        port: u16,

        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Estimate the resale price of one flat
    Predict {
        #[command(flatten)]
        model: ModelArgs,

        #[command(flatten)]
        property: PropertyArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Estimate the price across a range of holding periods
    Sweep {
        #[command(flatten)]
        model: ModelArgs,

        #[command(flatten)]
        property: PropertyArgs,

        /// First holding period in the sweep
        #[arg(long, default_value_t = bounds::YEARS_HOLDING.min, value_parser = bounded(bounds::YEARS_HOLDING))]
        min: u32,

        /// Last holding period in the sweep (inclusive)
        #[arg(long, default_value_t = bounds::YEARS_HOLDING.max, value_parser = bounded(bounds::YEARS_HOLDING))]
        max: u32,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: SweepFormat,

        /// Write the series to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the region overlays drawn on the map
    Regions {
        #[command(flatten)]
        geodata: GeodataArgs,

        /// Output the map view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Describe the model artifact and category tables
    Info {
        #[command(flatten)]
        model: ModelArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Location of the model artifact.
#[derive(Args, Clone, Debug)]
pub struct ModelArgs {
    /// Path to the decision tree model (JSON)
    #[arg(id = "model", short = 'm', long = "model", value_name = "FILE", default_value = DEFAULT_MODEL_PATH)]
    pub path: PathBuf,
}

/// Location of the region boundaries.
#[derive(Args, Clone, Debug)]
pub struct GeodataArgs {
    /// Path to the region boundaries (GeoJSON)
    #[arg(id = "geodata", short = 'g', long = "geodata", value_name = "FILE", default_value = DEFAULT_GEODATA_PATH)]
    pub path: PathBuf,
}

/// Property attributes, constrained the same way as the form widgets.
#[derive(Args, Clone, Debug)]
pub struct PropertyArgs {
    /// Town (e.g. "JURONG WEST")
    #[arg(long, default_value = Town::LABELS[0])]
    pub town: Town,

    /// Flat type (e.g. "4 ROOM")
    #[arg(long, default_value = FlatType::LABELS[0])]
    pub flat_type: FlatType,

    /// Storey range (e.g. "10 TO 12")
    #[arg(long, default_value = StoreyRange::LABELS[0])]
    pub storey_range: StoreyRange,

    /// Floor area in square metres (0-500)
    #[arg(long, default_value_t = bounds::FLOOR_AREA_SQM.default, value_parser = parse_floor_area)]
    pub floor_area: f64,

    /// Flat model (e.g. "IMPROVED")
    #[arg(long, default_value = FlatModel::LABELS[0])]
    pub flat_model: FlatModel,

    /// Lease commencement year (1966-2022)
    #[arg(long, default_value_t = bounds::LEASE_COMMENCE_DATE.default, value_parser = bounded(bounds::LEASE_COMMENCE_DATE))]
    pub lease_commence_year: u32,

    /// Remaining lease in years (40-99)
    #[arg(long, default_value_t = bounds::REMAINING_LEASE.default, value_parser = bounded(bounds::REMAINING_LEASE))]
    pub remaining_lease: u32,

    /// Price per square metre (160-7960 in steps of 100)
    #[arg(long, default_value_t = bounds::PRICE_PER_SQM_MIN, value_parser = parse_price_per_sqm)]
    pub price_per_sqm: u32,

    /// Years holding (0-60)
    #[arg(long, default_value_t = bounds::YEARS_HOLDING.default, value_parser = bounded(bounds::YEARS_HOLDING))]
    pub years_holding: u32,

    /// Current remaining lease in years (40-97)
    #[arg(long, default_value_t = bounds::CURRENT_REMAINING_LEASE.default, value_parser = bounded(bounds::CURRENT_REMAINING_LEASE))]
    pub current_remaining_lease: u32,

    /// Age of the property in years (2-58)
    #[arg(long = "age", default_value_t = bounds::AGE_OF_PROPERTY.default, value_parser = bounded(bounds::AGE_OF_PROPERTY))]
    pub age_of_property: u32,
}

impl From<PropertyArgs> for PropertyInputs {
    fn from(args: PropertyArgs) -> Self {
        PropertyInputs {
            town: args.town.label().to_string(),
            flat_type: args.flat_type.label().to_string(),
            storey_range: args.storey_range.label().to_string(),
            floor_area_sqm: args.floor_area,
            flat_model: args.flat_model.label().to_string(),
            lease_commence_date: args.lease_commence_year,
            remaining_lease: args.remaining_lease,
            price_per_sqm: args.price_per_sqm,
            years_holding: args.years_holding,
            current_remaining_lease: args.current_remaining_lease,
            age_of_property: args.age_of_property,
        }
    }
}

/// Integer parser limited to the widget's bounds.
fn bounded(bounds: NumericBounds<u32>) -> RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(i64::from(bounds.min)..=i64::from(bounds.max))
}

fn parse_floor_area(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !bounds::FLOOR_AREA_SQM.contains(value) {
        return Err(format!(
            "{} is not in {}..={}",
            value,
            bounds::FLOOR_AREA_SQM.min,
            bounds::FLOOR_AREA_SQM.max
        ));
    }
    Ok(value)
}

fn parse_price_per_sqm(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a whole number", s))?;
    if !bounds::is_price_per_sqm_option(value) {
        return Err(format!(
            "{} is not one of {}, {}, ..., up to {} in steps of {}",
            value,
            bounds::PRICE_PER_SQM_MIN,
            bounds::PRICE_PER_SQM_MIN + bounds::PRICE_PER_SQM_STEP,
            bounds::PRICE_PER_SQM_MAX,
            bounds::PRICE_PER_SQM_STEP
        ));
    }
    Ok(value)
}

/// Output format for the sweep command.
#[derive(Clone, Debug, Default)]
pub enum SweepFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl std::str::FromStr for SweepFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(SweepFormat::Table),
            "csv" => Ok(SweepFormat::Csv),
            "json" => Ok(SweepFormat::Json),
            _ => Err(format!("Unknown format: {}. Use table, csv, or json.", s)),
        }
    }
}

impl std::fmt::Display for SweepFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SweepFormat::Table => write!(f, "table"),
            SweepFormat::Csv => write!(f, "csv"),
            SweepFormat::Json => write!(f, "json"),
        }
    }
}
