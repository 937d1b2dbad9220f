//! Scale functions for value-to-intensity mappings.
//!
//! Scales transform data values to visual properties. The calendar uses a
//! threshold scale that maps a day's value onto a small ordinal set of
//! palette levels.

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Threshold scale from values to bucket levels `0..levels`.
///
/// Level 0 is reserved for empty days (`value <= 0`). Positive values are
/// split into `levels - 1` equal-width buckets over `(0, max]`: level `k`
/// holds values up to `max * k / (levels - 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketScale {
    levels: u8,
    max: f64,
}

impl BucketScale {
    /// Create a scale with `levels` buckets (clamped to at least 2) for an
    /// observed maximum of `max`.
    #[must_use]
    pub fn new(levels: u8, max: f64) -> Self {
        let max = if max.is_finite() { max } else { 0.0 };
        Self { levels: levels.max(2), max }
    }

    /// Create a scale from the values that will be bucketed.
    #[must_use]
    pub fn from_values(levels: u8, values: impl IntoIterator<Item = f64>) -> Self {
        let max = values.into_iter().filter(|v| v.is_finite()).fold(0.0, f64::max);
        Self::new(levels, max)
    }

    /// Number of levels, including the empty level.
    #[must_use]
    pub const fn levels(&self) -> u8 {
        self.levels
    }

    /// Observed maximum.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Inclusive upper bound of each non-empty level, `levels - 1` entries.
    ///
    /// Empty when the maximum is not positive.
    #[must_use]
    pub fn thresholds(&self) -> Vec<f64> {
        if self.max <= 0.0 {
            return Vec::new();
        }
        let steps = f64::from(self.levels - 1);
        (1..self.levels).map(|k| self.max * f64::from(k) / steps).collect()
    }

    /// Level for an absent day.
    #[must_use]
    pub const fn empty_level(&self) -> u8 {
        0
    }
}

impl Scale<f64, u8> for BucketScale {
    fn scale(&self, value: f64) -> u8 {
        if value.is_nan() || value <= 0.0 || self.max <= 0.0 {
            return 0;
        }
        let top = self.levels - 1;
        let level = (value / self.max * f64::from(top)).ceil();
        level.clamp(1.0, f64::from(top)) as u8
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, self.max)
    }

    fn range(&self) -> (u8, u8) {
        (0, self.levels - 1)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        /// Bucketing is monotone in value.
        #[test]
        fn prop_bucket_monotone(
            levels in 2u8..10,
            max in 0.001f64..1e6,
            a in 0.0f64..1e6,
            b in 0.0f64..1e6,
        ) {
            let s = BucketScale::new(levels, max);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(s.scale(lo) <= s.scale(hi));
        }

        /// Positive values never land on the empty level, and levels stay in range.
        #[test]
        fn prop_positive_values_non_empty(
            levels in 2u8..10,
            max in 0.001f64..1e6,
            frac in 0.0001f64..1.0,
        ) {
            let s = BucketScale::new(levels, max);
            let level = s.scale(max * frac);
            prop_assert!(level >= 1);
            prop_assert!(level < levels);
        }
    }
}
