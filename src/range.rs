//! Day span resolution and week alignment.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::aggregate::DayMap;
use crate::day::{days_between, DayKey};

/// Inclusive span of days, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayRange {
    /// First day.
    pub start: DayKey,
    /// Last day (inclusive).
    pub end: DayKey,
}

impl DayRange {
    /// Create a range, swapping the bounds if given in reverse.
    #[must_use]
    pub fn new(start: DayKey, end: DayKey) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// Number of days covered.
    #[must_use]
    pub fn len_days(&self) -> u32 {
        (days_between(self.start, self.end) + 1) as u32
    }

    /// Check whether `day` lies inside the range.
    #[must_use]
    pub fn contains(&self, day: DayKey) -> bool {
        self.start <= day && day <= self.end
    }

    /// Widen to whole weeks starting on `week_start`.
    #[must_use]
    pub fn align(&self, week_start: Weekday) -> Self {
        Self { start: self.start.week_start(week_start), end: self.end.week_end(week_start) }
    }

    /// Iterate every day from `start` to `end`.
    pub fn days(&self) -> impl Iterator<Item = DayKey> {
        let start = self.start;
        (0..i64::from(self.len_days())).map(move |offset| start.add_days(offset))
    }
}

/// How the window relates to the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeMode {
    /// The last `range_days` days ending today; data outside is clipped.
    #[default]
    Window,
    /// The window widened to cover every aggregated day.
    FitData,
}

/// The `range_days` window ending on `today`.
///
/// `range_days` must be positive; 0 is treated as 1.
#[must_use]
pub fn resolve_range(range_days: u32, today: DayKey) -> DayRange {
    let span = i64::from(range_days.max(1)) - 1;
    DayRange { start: today.add_days(-span), end: today }
}

/// Resolve the requested window for aggregated data under `mode`.
#[must_use]
pub fn resolve_window<M>(
    range_days: u32,
    today: DayKey,
    mode: RangeMode,
    days: &DayMap<M>,
) -> DayRange {
    let window = resolve_range(range_days, today);
    match mode {
        RangeMode::Window => window,
        RangeMode::FitData => {
            let (Some(first), Some(last)) = (days.keys().next(), days.keys().next_back()) else {
                return window;
            };
            DayRange { start: window.start.min(*first), end: window.end.max(*last) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, MergeStrategy, Observation};
    use crate::day::to_day_key;

    fn day(s: &str) -> DayKey {
        to_day_key(s).unwrap()
    }

    #[test]
    fn test_resolve_range_default_year() {
        let r = resolve_range(365, day("2025-06-30"));
        assert_eq!(r.end, day("2025-06-30"));
        assert_eq!(r.start, day("2024-07-01"));
        assert_eq!(r.len_days(), 365);
    }

    #[test]
    fn test_resolve_range_single_day() {
        let r = resolve_range(1, day("2025-06-30"));
        assert_eq!(r.start, r.end);
        assert_eq!(resolve_range(0, day("2025-06-30")), r);
    }

    #[test]
    fn test_align_to_monday() {
        let r = DayRange::new(day("2025-01-01"), day("2025-01-07"));
        let aligned = r.align(Weekday::Mon);
        assert_eq!(aligned.start, day("2024-12-30"));
        assert_eq!(aligned.end, day("2025-01-12"));
        assert_eq!(aligned.len_days(), 14);
    }

    #[test]
    fn test_align_already_whole_week() {
        let r = DayRange::new(day("2024-01-01"), day("2024-01-07"));
        assert_eq!(r.align(Weekday::Mon), r);
    }

    #[test]
    fn test_new_swaps_reversed_bounds() {
        let r = DayRange::new(day("2025-02-01"), day("2025-01-01"));
        assert_eq!(r.start, day("2025-01-01"));
        assert!(r.contains(day("2025-01-15")));
        assert!(!r.contains(day("2025-02-02")));
    }

    #[test]
    fn test_days_iterates_inclusive() {
        let r = DayRange::new(day("2025-02-27"), day("2025-03-02"));
        let days: Vec<String> = r.days().map(|d| d.to_string()).collect();
        assert_eq!(days, ["2025-02-27", "2025-02-28", "2025-03-01", "2025-03-02"]);
    }

    #[test]
    fn test_fit_data_widens_window() {
        let obs: Vec<Observation> =
            vec![Observation::new("2024-01-15", 1.0), Observation::new("2025-07-04", 2.0)];
        let days = aggregate(&obs, MergeStrategy::Sum).unwrap();
        let today = day("2025-06-30");

        let clipped = resolve_window(30, today, RangeMode::Window, &days);
        assert_eq!(clipped, resolve_range(30, today));

        let fitted = resolve_window(30, today, RangeMode::FitData, &days);
        assert_eq!(fitted.start, day("2024-01-15"));
        assert_eq!(fitted.end, day("2025-07-04"));
    }

    #[test]
    fn test_fit_data_without_data_keeps_window() {
        let days: DayMap = DayMap::new();
        let today = day("2025-06-30");
        assert_eq!(resolve_window(90, today, RangeMode::FitData, &days), resolve_range(90, today));
    }
}
