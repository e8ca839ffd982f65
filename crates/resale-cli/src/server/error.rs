//! API error types and handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use resale::ResaleError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Error from the resale library.
    Resale(ResaleError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Resale(ResaleError::UnknownCategory { .. }) => {
                (StatusCode::BAD_REQUEST, "unknown_category")
            }
            ApiError::Resale(ResaleError::Inference(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "inference_error")
            }
            ApiError::Resale(ResaleError::MissingField { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "missing_field")
            }
            ApiError::Resale(ResaleError::ResourceLoad { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "resource_load_error")
            }
            ApiError::Resale(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_code();
        let message = match self {
            ApiError::Resale(e) => e.to_string(),
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<ResaleError> for ApiError {
    fn from(err: ResaleError) -> Self {
        ApiError::Resale(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Resale(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {}
