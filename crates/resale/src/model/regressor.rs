//! Regressor trait.

use crate::error::Result;
use crate::input::FeatureRecord;

/// A pre-trained regression model.
///
/// Implementations must be thread-safe (Send + Sync) so one loaded model can
/// be shared read-only across requests.
pub trait Regressor: Send + Sync {
    /// Get the name of this model (for display).
    fn name(&self) -> &str;

    /// Feature names the model was trained on, in order.
    fn feature_names(&self) -> &[String];

    /// Run inference on a single record.
    ///
    /// Returns one value per target; a price model yields a singleton.
    /// Fails with `Inference` when the record does not have the feature
    /// names and order the model expects.
    fn predict(&self, record: &FeatureRecord) -> Result<Vec<f64>>;
}
