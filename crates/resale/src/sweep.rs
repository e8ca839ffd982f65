//! Sensitivity sweep over the holding period.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::{PredictionInput, PropertyInputs};
use crate::model::Regressor;
use crate::predict::predict_encoded;

/// One point of the trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub years_holding: u32,
    pub predicted_price: f64,
}

/// Predicted prices across a range of holding periods, ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepSeries {
    pub points: Vec<SweepPoint>,
}

impl SweepSeries {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the points in ascending holding order.
    pub fn iter(&self) -> impl Iterator<Item = &SweepPoint> {
        self.points.iter()
    }

    /// Smallest and largest predicted price, or `None` for an empty series.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.points.iter().map(|p| p.predicted_price).fold(None, |acc, price| {
            Some(match acc {
                None => (price, price),
                Some((lo, hi)) => (lo.min(price), hi.max(price)),
            })
        })
    }

    /// Write the series as CSV with a `years_holding,predicted_price` header.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for point in &self.points {
            csv_writer.serialize(point)?;
        }
        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

/// Predict the price for every whole number of years in
/// `min_years..=max_years`, keeping every other input from `base`.
///
/// The labels are encoded once; each step copies the encoded record with only
/// `years_holding` replaced. An empty range gives an empty series, and the first
/// failed prediction aborts the sweep.
pub fn sweep_years_holding(
    model: &dyn Regressor,
    base: &PropertyInputs,
    min_years: u32,
    max_years: u32,
) -> Result<SweepSeries> {
    let base = PredictionInput::from_inputs(base)?;

    let points = (min_years..=max_years)
        .map(|years_holding| {
            let predicted_price = predict_encoded(model, &base.with_years_holding(years_holding))?;
            Ok(SweepPoint {
                years_holding,
                predicted_price,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SweepSeries { points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResaleError;
    use crate::model::MockRegressor;

    #[test]
    fn test_full_range() {
        let model = MockRegressor::new();
        let series = sweep_years_holding(&model, &PropertyInputs::default(), 0, 60).unwrap();

        assert_eq!(series.len(), 61);
        let years: Vec<u32> = series.iter().map(|p| p.years_holding).collect();
        assert_eq!(years, (0..=60).collect::<Vec<_>>());
        assert_eq!(model.call_count(), 61);
    }

    #[test]
    fn test_only_years_holding_varies() {
        let model = MockRegressor::new();
        let base = PropertyInputs {
            years_holding: 17,
            ..PropertyInputs::default()
        };
        sweep_years_holding(&model, &base, 3, 9).unwrap();

        let calls = model.calls();
        let reference = base.encode().unwrap().to_record();
        for (offset, record) in calls.iter().enumerate() {
            for (name, value) in record {
                if *name == "years_holding" {
                    assert_eq!(*value, (3 + offset) as f64);
                } else {
                    assert_eq!(*value, reference[name], "field {name} changed");
                }
            }
        }
    }

    #[test]
    fn test_prices_match_single_predictions() {
        let model = MockRegressor::new();
        let base = PropertyInputs::default();
        let series = sweep_years_holding(&model, &base, 0, 4).unwrap();

        for point in series.iter() {
            let single =
                crate::build_and_predict(&model, &base.with_years_holding(point.years_holding))
                    .unwrap();
            assert_eq!(point.predicted_price, single);
        }
    }

    #[test]
    fn test_empty_range() {
        let model = MockRegressor::new();
        let series = sweep_years_holding(&model, &PropertyInputs::default(), 5, 4).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.price_range(), None);
        assert_eq!(model.call_count(), 0);
    }

    #[test]
    fn test_failure_aborts_sweep() {
        let model = MockRegressor::failing("no");
        let err = sweep_years_holding(&model, &PropertyInputs::default(), 0, 60).unwrap_err();
        assert!(matches!(err, ResaleError::Inference(_)));
        assert_eq!(model.call_count(), 1);
    }

    #[test]
    fn test_price_range() {
        let series = SweepSeries {
            points: vec![
                SweepPoint {
                    years_holding: 0,
                    predicted_price: 300.0,
                },
                SweepPoint {
                    years_holding: 1,
                    predicted_price: 100.0,
                },
                SweepPoint {
                    years_holding: 2,
                    predicted_price: 200.0,
                },
            ],
        };
        assert_eq!(series.price_range(), Some((100.0, 300.0)));
    }

    #[test]
    fn test_write_csv() {
        let series = SweepSeries {
            points: vec![
                SweepPoint {
                    years_holding: 0,
                    predicted_price: 410000.0,
                },
                SweepPoint {
                    years_holding: 1,
                    predicted_price: 408500.5,
                },
            ],
        };
        let mut buffer = Vec::new();
        series.write_csv(&mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "years_holding,predicted_price\n0,410000.0\n1,408500.5\n"
        );
    }
}
