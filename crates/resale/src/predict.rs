//! Prediction request builder.

use crate::error::{ResaleError, Result};
use crate::input::{PredictionInput, PropertyInputs};
use crate::model::Regressor;

/// Encode `inputs`, run the model and return the estimated resale price.
///
/// Fails with `UnknownCategory` for a label outside its table and with
/// `Inference` when the model rejects the record or does not answer with
/// exactly one finite value.
pub fn build_and_predict(model: &dyn Regressor, inputs: &PropertyInputs) -> Result<f64> {
    let input = PredictionInput::from_inputs(inputs)?;
    predict_encoded(model, &input)
}

/// Run the model on an already encoded record.
pub fn predict_encoded(model: &dyn Regressor, input: &PredictionInput) -> Result<f64> {
    let output = model.predict(&input.to_record())?;

    match output.as_slice() {
        [price] if price.is_finite() => Ok(*price),
        [price] => Err(ResaleError::Inference(format!(
            "model '{}' returned a non-finite price ({price})",
            model.name()
        ))),
        other => Err(ResaleError::Inference(format!(
            "model '{}' returned {} values, expected 1",
            model.name(),
            other.len()
        ))),
    }
}
