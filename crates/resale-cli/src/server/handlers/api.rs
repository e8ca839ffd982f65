//! JSON API handlers.

use axum::{Json, extract::State};
use resale::bounds::{self, NumericBounds};
use resale::{
    CategoryKind, Estimate, MapView, ModelMetadata, PredictionInput, PropertyInputs, Regressor,
    SweepSeries,
};
use serde::Serialize;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Response for a single prediction.
#[derive(Serialize)]
pub struct PredictResponse {
    /// Estimated resale price.
    pub predicted_price: f64,
    /// The encoded record the model saw.
    pub input: PredictionInput,
}

/// Response describing the loaded model.
#[derive(Serialize)]
pub struct ModelResponse {
    pub name: String,
    pub feature_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ModelMetadata>,
}

/// One category table as offered by a selection widget.
#[derive(Serialize)]
pub struct CategoryOptions {
    pub table: CategoryKind,
    pub labels: &'static [&'static str],
}

/// Everything a client needs to build the form.
#[derive(Serialize)]
pub struct FormResponse {
    pub categories: Vec<CategoryOptions>,
    pub price_per_sqm: Vec<u32>,
    pub floor_area_sqm: NumericBounds<f64>,
    pub age_of_property: NumericBounds<u32>,
    pub lease_commence_date: NumericBounds<u32>,
    pub current_remaining_lease: NumericBounds<u32>,
    pub remaining_lease: NumericBounds<u32>,
    pub years_holding: NumericBounds<u32>,
    pub defaults: PropertyInputs,
}

/// POST /api/predict
pub async fn predict(
    State(state): State<AppState>,
    Json(inputs): Json<PropertyInputs>,
) -> Result<Json<PredictResponse>, ApiError> {
    let input = inputs.encode()?;
    let predicted_price = state.estimator.predict(&inputs)?;
    Ok(Json(PredictResponse {
        predicted_price,
        input,
    }))
}

/// POST /api/sweep
pub async fn sweep(
    State(state): State<AppState>,
    Json(inputs): Json<PropertyInputs>,
) -> Result<Json<SweepSeries>, ApiError> {
    Ok(Json(state.estimator.sweep(&inputs)?))
}

/// POST /api/estimate - price and trend in one call.
pub async fn estimate(
    State(state): State<AppState>,
    Json(inputs): Json<PropertyInputs>,
) -> Result<Json<Estimate>, ApiError> {
    Ok(Json(state.estimator.estimate(&inputs)?))
}

/// GET /api/regions
pub async fn get_regions(State(state): State<AppState>) -> Result<Json<MapView>, ApiError> {
    Ok(Json(state.estimator.map_view()?))
}

/// GET /api/model
pub async fn get_model(State(state): State<AppState>) -> Json<ModelResponse> {
    let model = state.estimator.model();
    Json(ModelResponse {
        name: model.name().to_string(),
        feature_names: model.feature_names().to_vec(),
        metadata: state.estimator.model_metadata().cloned(),
    })
}

/// GET /api/form
pub async fn get_form() -> Json<FormResponse> {
    Json(FormResponse {
        categories: CategoryKind::ALL
            .iter()
            .map(|kind| CategoryOptions {
                table: *kind,
                labels: kind.labels(),
            })
            .collect(),
        price_per_sqm: bounds::price_per_sqm_options(),
        floor_area_sqm: bounds::FLOOR_AREA_SQM,
        age_of_property: bounds::AGE_OF_PROPERTY,
        lease_commence_date: bounds::LEASE_COMMENCE_DATE,
        current_remaining_lease: bounds::CURRENT_REMAINING_LEASE,
        remaining_lease: bounds::REMAINING_LEASE,
        years_holding: bounds::YEARS_HOLDING,
        defaults: PropertyInputs::default(),
    })
}
