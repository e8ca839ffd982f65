//! Resale: price estimation for resale flats.
//!
//! A user picks the attributes of a flat (town, size, lease details and so on);
//! the categorical ones are encoded with fixed tables, the record is fed to a
//! pre-trained regression model, and the estimate is shown next to a trend
//! over holding periods and a map of the region.
//!
//! # Core Principles
//!
//! - **Closed tables**: category labels are enums with checked encoding
//! - **Fixed feature order**: every record is laid out exactly as at training time
//! - **Read-only resources**: the model and region data are loaded once and shared
//!
//! # Example
//!
//! ```no_run
//! use resale::{Estimator, PropertyInputs, ResaleConfig};
//!
//! let estimator = Estimator::load(ResaleConfig::default()).unwrap();
//! let estimate = estimator.estimate(&PropertyInputs::default()).unwrap();
//!
//! println!("Predicted price: {:.0}", estimate.predicted_price);
//! println!("Trend points: {}", estimate.series.len());
//! ```

pub mod bounds;
pub mod categories;
pub mod error;
pub mod input;
pub mod markup;
pub mod model;
pub mod region;

mod estimator;
mod predict;
mod sweep;

pub use crate::estimator::{
    DEFAULT_GEODATA_PATH, DEFAULT_MODEL_PATH, Estimate, Estimator, ResaleConfig, SweepRange,
};
pub use categories::{Category, CategoryKind, FlatModel, FlatType, StoreyRange, Town, encode};
pub use error::{ResaleError, Result};
pub use input::{FEATURE_NAMES, FeatureRecord, PredictionInput, PropertyInputs};
pub use model::{DecisionTreeRegressor, MockRegressor, ModelMetadata, Regressor};
pub use predict::{build_and_predict, predict_encoded};
pub use region::{MapView, RegionDataset, RegionOverlay, RegionRecord, render_map};
pub use sweep::{SweepPoint, SweepSeries, sweep_years_holding};
