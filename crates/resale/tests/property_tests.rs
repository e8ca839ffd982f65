//! Property-based tests for encoding, prediction and sweeps.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p resale --test property_tests
//! PROPTEST_CASES=10000 cargo test -p resale --test property_tests
//! ```

use std::collections::HashSet;

use proptest::prelude::*;

use resale::bounds::{self, price_per_sqm_options};
use resale::{
    Category, CategoryKind, FlatModel, FlatType, MockRegressor, PropertyInputs, StoreyRange, Town,
    build_and_predict, encode, sweep_years_holding,
};

// =============================================================================
// Test Strategies
// =============================================================================

fn label_of<C: Category>() -> impl Strategy<Value = String> {
    prop::sample::select(C::LABELS).prop_map(String::from)
}

/// Inputs the form could submit.
fn property_inputs() -> impl Strategy<Value = PropertyInputs> {
    (
        (
            label_of::<Town>(),
            label_of::<FlatType>(),
            label_of::<StoreyRange>(),
            bounds::FLOOR_AREA_SQM.min..=bounds::FLOOR_AREA_SQM.max,
            label_of::<FlatModel>(),
            bounds::LEASE_COMMENCE_DATE.range(),
        ),
        (
            bounds::REMAINING_LEASE.range(),
            prop::sample::select(price_per_sqm_options()),
            bounds::YEARS_HOLDING.range(),
            bounds::CURRENT_REMAINING_LEASE.range(),
            bounds::AGE_OF_PROPERTY.range(),
        ),
    )
        .prop_map(
            |(
                (town, flat_type, storey_range, floor_area_sqm, flat_model, lease_commence_date),
                (
                    remaining_lease,
                    price_per_sqm,
                    years_holding,
                    current_remaining_lease,
                    age_of_property,
                ),
            )| PropertyInputs {
                town,
                flat_type,
                storey_range,
                floor_area_sqm,
                flat_model,
                lease_commence_date,
                remaining_lease,
                price_per_sqm,
                years_holding,
                current_remaining_lease,
                age_of_property,
            },
        )
}

// =============================================================================
// Encoder Invariants
// =============================================================================

#[test]
fn test_every_table_is_a_bijection() {
    for kind in CategoryKind::ALL {
        let codes: HashSet<u32> = kind
            .labels()
            .iter()
            .map(|label| encode(kind, label).unwrap())
            .collect();
        let expected: HashSet<u32> = (0..kind.len() as u32).collect();
        assert_eq!(codes, expected, "{} table", kind.name());
    }
}

proptest! {
    #[test]
    fn encode_stays_in_range(index in 0usize..27) {
        let label = Town::LABELS[index];
        let code = encode(CategoryKind::Town, label).unwrap();
        prop_assert!((code as usize) < Town::LABELS.len());
        prop_assert_eq!(Town::from_code(code).map(|t| t.label()), Some(label));
    }

    #[test]
    fn encode_rejects_lowercase_labels(label in label_of::<FlatModel>()) {
        let lower = label.to_lowercase();
        prop_assume!(lower != label);
        prop_assert!(encode(CategoryKind::FlatModel, &lower).is_err());
    }

    #[test]
    fn prediction_is_deterministic(inputs in property_inputs()) {
        let model = MockRegressor::new();
        let first = build_and_predict(&model, &inputs).unwrap();
        let second = build_and_predict(&model, &inputs).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn sweep_covers_range_in_order(
        inputs in property_inputs(),
        min in 0u32..=60,
        span in 0u32..=20,
    ) {
        let max = min + span;
        let model = MockRegressor::new();
        let series = sweep_years_holding(&model, &inputs, min, max).unwrap();

        prop_assert_eq!(series.len(), (span + 1) as usize);
        let years: Vec<u32> = series.iter().map(|p| p.years_holding).collect();
        prop_assert_eq!(years, (min..=max).collect::<Vec<_>>());
    }

    #[test]
    fn sweep_point_equals_single_prediction(inputs in property_inputs(), years in 0u32..=60) {
        let model = MockRegressor::new();
        let series = sweep_years_holding(&model, &inputs, years, years).unwrap();
        let single = build_and_predict(&model, &inputs.with_years_holding(years)).unwrap();
        prop_assert_eq!(series.points[0].predicted_price, single);
    }
}
