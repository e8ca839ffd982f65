//! Main Estimator struct and public API.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::bounds;
use crate::error::Result;
use crate::input::{PredictionInput, PropertyInputs};
use crate::model::{DecisionTreeRegressor, ModelMetadata, Regressor};
use crate::predict::predict_encoded;
use crate::region::{MapView, RegionDataset, render_map};
use crate::sweep::{SweepSeries, sweep_years_holding};

/// Default location of the model artifact.
pub const DEFAULT_MODEL_PATH: &str = "data/decision_tree_model.json";

/// Default location of the region boundaries.
pub const DEFAULT_GEODATA_PATH: &str = "data/sample.geojson";

/// Inclusive range of holding periods covered by the trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SweepRange {
    pub min_years: u32,
    pub max_years: u32,
}

impl Default for SweepRange {
    fn default() -> Self {
        Self {
            min_years: bounds::YEARS_HOLDING.min,
            max_years: bounds::YEARS_HOLDING.max,
        }
    }
}

/// Configuration for the estimator.
#[derive(Debug, Clone)]
pub struct ResaleConfig {
    /// Path to the model artifact.
    pub model_path: PathBuf,
    /// Path to the GeoJSON region boundaries.
    pub geodata_path: PathBuf,
    /// Holding periods to sweep for the trend chart.
    pub sweep: SweepRange,
}

impl Default for ResaleConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            geodata_path: PathBuf::from(DEFAULT_GEODATA_PATH),
            sweep: SweepRange::default(),
        }
    }
}

/// Result of a full estimate: the price plus its trend over holding periods.
#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    /// Inputs as submitted.
    pub input: PropertyInputs,
    /// The encoded record the model saw.
    pub encoded: PredictionInput,
    /// Estimated resale price.
    pub predicted_price: f64,
    /// Price across the configured holding range.
    pub series: SweepSeries,
    /// Name of the model that produced the estimate.
    pub model: String,
    /// When the estimate was made.
    pub estimated_at: DateTime<Utc>,
}

/// Loaded model and region data, shared read-only.
///
/// Cloning is cheap; clones share the same model and dataset.
#[derive(Clone)]
pub struct Estimator {
    config: ResaleConfig,
    model: Arc<dyn Regressor>,
    model_metadata: Option<ModelMetadata>,
    regions: Arc<RegionDataset>,
}

impl Estimator {
    /// Create an estimator around an in-memory model with no regions.
    pub fn new(model: impl Regressor + 'static) -> Self {
        Self {
            config: ResaleConfig::default(),
            model: Arc::new(model),
            model_metadata: None,
            regions: Arc::new(RegionDataset::default()),
        }
    }

    /// Load the model and region data named by `config`.
    ///
    /// Either file being missing or corrupt is a `ResourceLoad` error; callers
    /// treat it as fatal.
    pub fn load(config: ResaleConfig) -> Result<Self> {
        let (model, metadata) = DecisionTreeRegressor::load(&config.model_path)?;
        let regions = RegionDataset::load(&config.geodata_path)?;

        Ok(Self {
            config,
            model: Arc::new(model),
            model_metadata: Some(metadata),
            regions: Arc::new(regions),
        })
    }

    /// Replace the region dataset.
    pub fn with_regions(mut self, regions: RegionDataset) -> Self {
        self.regions = Arc::new(regions);
        self
    }

    /// Replace the configuration (paths are not reloaded).
    pub fn with_config(mut self, config: ResaleConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ResaleConfig {
        &self.config
    }

    /// The loaded model.
    pub fn model(&self) -> &dyn Regressor {
        self.model.as_ref()
    }

    /// Metadata of the model file, when loaded from disk.
    pub fn model_metadata(&self) -> Option<&ModelMetadata> {
        self.model_metadata.as_ref()
    }

    /// The region dataset.
    pub fn regions(&self) -> &RegionDataset {
        &self.regions
    }

    /// Estimate the price for one set of inputs.
    pub fn predict(&self, inputs: &PropertyInputs) -> Result<f64> {
        let encoded = PredictionInput::from_inputs(inputs)?;
        predict_encoded(self.model(), &encoded)
    }

    /// Sweep the configured holding range.
    pub fn sweep(&self, inputs: &PropertyInputs) -> Result<SweepSeries> {
        sweep_years_holding(
            self.model(),
            inputs,
            self.config.sweep.min_years,
            self.config.sweep.max_years,
        )
    }

    /// Predict the price and build the trend series in one go.
    pub fn estimate(&self, inputs: &PropertyInputs) -> Result<Estimate> {
        let encoded = PredictionInput::from_inputs(inputs)?;
        let predicted_price = predict_encoded(self.model(), &encoded)?;
        let series = self.sweep(inputs)?;

        Ok(Estimate {
            input: inputs.clone(),
            encoded,
            predicted_price,
            series,
            model: self.model.name().to_string(),
            estimated_at: Utc::now(),
        })
    }

    /// Build the map view from the region dataset.
    pub fn map_view(&self) -> Result<MapView> {
        render_map(&self.regions)
    }
}
