//! Mock regressor for testing.

use std::sync::Mutex;

use crate::error::{ResaleError, Result};
use crate::input::{FEATURE_NAMES, FeatureRecord};

use super::regressor::Regressor;

/// Mock model that returns predictable prices and records every call.
///
/// The price is a weighted sum of the features, so changing any single
/// input changes the output.
pub struct MockRegressor {
    feature_names: Vec<String>,
    weights: Vec<f64>,
    output_len: usize,
    fail_with: Option<String>,
    calls: Mutex<Vec<FeatureRecord>>,
}

impl MockRegressor {
    /// Create a mock that accepts the standard feature layout.
    pub fn new() -> Self {
        Self {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            weights: vec![
                1_000.0, 25_000.0, 8_000.0, 2_500.0, 3_000.0, 50.0, 1_200.0, 60.0, -1_500.0,
                900.0, -700.0,
            ],
            output_len: 1,
            fail_with: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A mock that rejects every record with an inference error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::new()
        }
    }

    /// A mock that returns `len` copies of the price instead of a singleton.
    pub fn with_output_len(mut self, len: usize) -> Self {
        self.output_len = len;
        self
    }

    /// Records seen so far, in call order.
    pub fn calls(&self) -> Vec<FeatureRecord> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Number of predictions made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }
}

impl Default for MockRegressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Regressor for MockRegressor {
    fn name(&self) -> &str {
        "mock"
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, record: &FeatureRecord) -> Result<Vec<f64>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(record.clone());
        }

        if let Some(message) = &self.fail_with {
            return Err(ResaleError::Inference(message.clone()));
        }

        let names: Vec<&str> = record.keys().copied().collect();
        if names != self.feature_names {
            return Err(ResaleError::Inference(format!(
                "unexpected feature layout: {names:?}"
            )));
        }

        let price = 50_000.0
            + record
                .values()
                .zip(&self.weights)
                .map(|(value, weight)| value * weight)
                .sum::<f64>();

        Ok(vec![price; self.output_len])
    }
}
