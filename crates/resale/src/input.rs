//! Property inputs and the encoded record handed to the model.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::bounds;
use crate::categories::{Category, FlatModel, FlatType, StoreyRange, Town};
use crate::error::Result;

/// Feature names in the order the model was trained on.
///
/// The model is order-sensitive on its feature vector; every record it sees
/// is laid out exactly like this.
pub const FEATURE_NAMES: [&str; 11] = [
    "town",
    "flat_type",
    "storey_range",
    "floor_area_sqm",
    "flat_model",
    "lease_commence_date",
    "remaining_lease",
    "price_per_sqm",
    "years_holding",
    "current_remaining_lease",
    "age_of_property",
];

/// Named, ordered feature values passed to a model.
pub type FeatureRecord = IndexMap<&'static str, f64>;

/// One form submission: category labels plus the numeric fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInputs {
    pub town: String,
    pub flat_type: String,
    pub storey_range: String,
    pub floor_area_sqm: f64,
    pub flat_model: String,
    pub lease_commence_date: u32,
    pub remaining_lease: u32,
    pub price_per_sqm: u32,
    pub years_holding: u32,
    pub current_remaining_lease: u32,
    pub age_of_property: u32,
}

impl Default for PropertyInputs {
    /// The values the form starts with.
    fn default() -> Self {
        Self {
            town: Town::ALL[0].label().to_string(),
            flat_type: FlatType::ALL[0].label().to_string(),
            storey_range: StoreyRange::ALL[0].label().to_string(),
            floor_area_sqm: bounds::FLOOR_AREA_SQM.default,
            flat_model: FlatModel::ALL[0].label().to_string(),
            lease_commence_date: bounds::LEASE_COMMENCE_DATE.default,
            remaining_lease: bounds::REMAINING_LEASE.default,
            price_per_sqm: bounds::PRICE_PER_SQM_MIN,
            years_holding: bounds::YEARS_HOLDING.default,
            current_remaining_lease: bounds::CURRENT_REMAINING_LEASE.default,
            age_of_property: bounds::AGE_OF_PROPERTY.default,
        }
    }
}

impl PropertyInputs {
    /// Copy of these inputs with a different holding period.
    pub fn with_years_holding(&self, years_holding: u32) -> Self {
        Self {
            years_holding,
            ..self.clone()
        }
    }

    /// Encode the category labels and assemble the model record.
    pub fn encode(&self) -> Result<PredictionInput> {
        PredictionInput::from_inputs(self)
    }
}

/// The encoded feature record, fields in model order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub town: u32,
    pub flat_type: u32,
    pub storey_range: u32,
    pub floor_area_sqm: f64,
    pub flat_model: u32,
    pub lease_commence_date: u32,
    pub remaining_lease: u32,
    pub price_per_sqm: u32,
    pub years_holding: u32,
    pub current_remaining_lease: u32,
    pub age_of_property: u32,
}

impl PredictionInput {
    /// Encode a form submission.
    ///
    /// Fails with `UnknownCategory` if any label is outside its table.
    pub fn from_inputs(inputs: &PropertyInputs) -> Result<Self> {
        Ok(Self {
            town: Town::encode(&inputs.town)?,
            flat_type: FlatType::encode(&inputs.flat_type)?,
            storey_range: StoreyRange::encode(&inputs.storey_range)?,
            floor_area_sqm: inputs.floor_area_sqm,
            flat_model: FlatModel::encode(&inputs.flat_model)?,
            lease_commence_date: inputs.lease_commence_date,
            remaining_lease: inputs.remaining_lease,
            price_per_sqm: inputs.price_per_sqm,
            years_holding: inputs.years_holding,
            current_remaining_lease: inputs.current_remaining_lease,
            age_of_property: inputs.age_of_property,
        })
    }

    /// Copy of this record with a different holding period.
    pub fn with_years_holding(self, years_holding: u32) -> Self {
        Self {
            years_holding,
            ..self
        }
    }

    /// Feature values in [`FEATURE_NAMES`] order.
    pub fn features(&self) -> [f64; 11] {
        [
            f64::from(self.town),
            f64::from(self.flat_type),
            f64::from(self.storey_range),
            self.floor_area_sqm,
            f64::from(self.flat_model),
            f64::from(self.lease_commence_date),
            f64::from(self.remaining_lease),
            f64::from(self.price_per_sqm),
            f64::from(self.years_holding),
            f64::from(self.current_remaining_lease),
            f64::from(self.age_of_property),
        ]
    }

    /// Named record as the model consumes it.
    pub fn to_record(&self) -> FeatureRecord {
        FEATURE_NAMES.into_iter().zip(self.features()).collect()
    }
}
