//! Literal bounds of the input widgets.
//!
//! The form and the CLI value parsers both read these, so a value that gets
//! past either surface is always inside the model's training range.

use std::ops::RangeInclusive;

use serde::Serialize;

/// Minimum, maximum and default of a numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericBounds<T> {
    pub min: T,
    pub max: T,
    pub default: T,
}

impl<T: Copy + PartialOrd> NumericBounds<T> {
    /// Whether `value` lies inside the bounds (inclusive).
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// The bounds as an inclusive range.
    pub fn range(&self) -> RangeInclusive<T> {
        self.min..=self.max
    }
}

/// Floor area in square metres.
pub const FLOOR_AREA_SQM: NumericBounds<f64> = NumericBounds {
    min: 0.0,
    max: 500.0,
    default: 100.0,
};

/// Age of the property in years.
pub const AGE_OF_PROPERTY: NumericBounds<u32> = NumericBounds {
    min: 2,
    max: 58,
    default: 2,
};

/// Year the lease commenced.
pub const LEASE_COMMENCE_DATE: NumericBounds<u32> = NumericBounds {
    min: 1966,
    max: 2022,
    default: 1966,
};

/// Remaining lease at the time of sale, in years.
pub const CURRENT_REMAINING_LEASE: NumericBounds<u32> = NumericBounds {
    min: 40,
    max: 97,
    default: 40,
};

/// Remaining lease, in years.
pub const REMAINING_LEASE: NumericBounds<u32> = NumericBounds {
    min: 40,
    max: 99,
    default: 40,
};

/// Years the flat is held; also the swept dimension of the trend chart.
pub const YEARS_HOLDING: NumericBounds<u32> = NumericBounds {
    min: 0,
    max: 60,
    default: 0,
};

/// Lowest price per square metre on the slider.
pub const PRICE_PER_SQM_MIN: u32 = 160;

/// Upper limit of the price per square metre slider range.
pub const PRICE_PER_SQM_MAX: u32 = 8000;

/// Slider step for price per square metre.
pub const PRICE_PER_SQM_STEP: u32 = 100;

/// Every value the price per square metre slider offers.
///
/// Steps from the minimum, so the last option is the largest step that does
/// not exceed the maximum (7960).
pub fn price_per_sqm_options() -> Vec<u32> {
    (PRICE_PER_SQM_MIN..=PRICE_PER_SQM_MAX)
        .step_by(PRICE_PER_SQM_STEP as usize)
        .collect()
}

/// Whether `value` is one of the slider's options.
pub fn is_price_per_sqm_option(value: u32) -> bool {
    (PRICE_PER_SQM_MIN..=PRICE_PER_SQM_MAX).contains(&value)
        && (value - PRICE_PER_SQM_MIN) % PRICE_PER_SQM_STEP == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_options() {
        let options = price_per_sqm_options();
        assert_eq!(options.first(), Some(&160));
        assert_eq!(options.last(), Some(&7960));
        assert_eq!(options.len(), 79);
        assert!(options.windows(2).all(|w| w[1] - w[0] == 100));
    }

    #[test]
    fn test_price_option_membership() {
        assert!(is_price_per_sqm_option(160));
        assert!(is_price_per_sqm_option(3060));
        assert!(!is_price_per_sqm_option(3000));
        assert!(!is_price_per_sqm_option(8060));
        assert!(!is_price_per_sqm_option(60));
    }

    #[test]
    fn test_bounds_contain_defaults() {
        assert!(FLOOR_AREA_SQM.contains(FLOOR_AREA_SQM.default));
        assert!(AGE_OF_PROPERTY.contains(AGE_OF_PROPERTY.default));
        assert!(LEASE_COMMENCE_DATE.contains(LEASE_COMMENCE_DATE.default));
        assert!(CURRENT_REMAINING_LEASE.contains(CURRENT_REMAINING_LEASE.default));
        assert!(REMAINING_LEASE.contains(REMAINING_LEASE.default));
        assert!(YEARS_HOLDING.contains(YEARS_HOLDING.default));
        assert!(!YEARS_HOLDING.contains(61));
    }
}
