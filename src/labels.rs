//! Axis label planning: month labels over columns, weekday labels over rows.
//!
//! Labels are an overlay keyed by column or row; planning never touches the
//! cells themselves.

use chrono::{Month, Weekday};
use serde::{Deserialize, Serialize};

use crate::day::DayKey;
use crate::layout::Grid;

/// How month names are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthFormat {
    /// `Jan`
    #[default]
    Short,
    /// `January`
    Long,
    /// `1`
    Numeric,
}

impl MonthFormat {
    /// Format month number `month` (1-12).
    #[must_use]
    pub fn format(self, month: u32) -> String {
        let Some(m) = u8::try_from(month).ok().and_then(|m| Month::try_from(m).ok()) else {
            return month.to_string();
        };
        match self {
            Self::Short => m.name()[..3].to_string(),
            Self::Long => m.name().to_string(),
            Self::Numeric => month.to_string(),
        }
    }
}

/// How weekday names are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekdayFormat {
    /// `Mon`
    #[default]
    Short,
    /// `Monday`
    Long,
    /// `M`
    Narrow,
}

impl WeekdayFormat {
    /// Format a weekday.
    #[must_use]
    pub fn format(self, weekday: Weekday) -> String {
        let long = weekday_name(weekday);
        match self {
            Self::Short => long[..3].to_string(),
            Self::Long => long.to_string(),
            Self::Narrow => long[..1].to_string(),
        }
    }
}

pub(crate) const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// A month name placed above a week column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLabel {
    /// Week column the label starts at.
    pub column: u32,
    /// Year of the labeled month.
    pub year: i32,
    /// Labeled month (1-12).
    pub month: u32,
    /// Formatted text.
    pub text: String,
}

/// A weekday name placed beside a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayLabel {
    /// Row (0 = configured first day of the week).
    pub row: u8,
    /// Weekday shown in that row.
    pub weekday: Weekday,
    /// Formatted text.
    pub text: String,
}

/// Plan month labels for `grid`.
///
/// Column 0 is labeled with the month of the first of a month it contains,
/// or else the month of its first day. Each later column containing the 1st
/// of a month is a candidate. Candidates closer than `min_week_spacing`
/// columns to the previously emitted label are dropped, left to right.
#[must_use]
pub fn plan_month_labels(
    grid: &Grid,
    format: MonthFormat,
    min_week_spacing: u32,
) -> Vec<MonthLabel> {
    let mut labels: Vec<MonthLabel> = Vec::new();

    for column in 0..grid.column_count() {
        let first = grid.column_start(column);
        let first_of_month = (0..7).map(|i| first.add_days(i)).find(|d| d.day() == 1);

        let labeled: DayKey = match (column, first_of_month) {
            (_, Some(day)) => day,
            (0, None) => first,
            _ => continue,
        };

        if let Some(prev) = labels.last() {
            if column - prev.column < min_week_spacing {
                continue;
            }
        }

        labels.push(MonthLabel {
            column,
            year: labeled.year(),
            month: labeled.month(),
            text: format.format(labeled.month()),
        });
    }

    labels
}

/// Plan weekday labels for the rows in `indices`.
///
/// Row `r` shows the weekday `r` days after `week_start`. Indices above 6
/// are ignored; duplicates collapse.
#[must_use]
pub fn plan_weekday_labels(
    indices: &[u8],
    week_start: Weekday,
    format: WeekdayFormat,
) -> Vec<WeekdayLabel> {
    let mut rows: Vec<u8> = indices.iter().copied().filter(|&r| r < 7).collect();
    rows.sort_unstable();
    rows.dedup();

    rows.into_iter()
        .map(|row| {
            let weekday = (0..row).fold(week_start, |wd, _| wd.succ());
            WeekdayLabel { row, weekday, text: format.format(weekday) }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::to_day_key;
    use crate::layout::layout_grid;
    use crate::range::DayRange;
    use crate::scale::BucketScale;

    fn grid(start: &str, end: &str, week_start: Weekday) -> Grid {
        let window = DayRange::new(to_day_key(start).unwrap(), to_day_key(end).unwrap());
        let days: crate::aggregate::DayMap = crate::aggregate::DayMap::new();
        layout_grid(window, week_start, &days, &BucketScale::new(5, 0.0), true)
    }

    #[test]
    fn test_month_format() {
        assert_eq!(MonthFormat::Short.format(1), "Jan");
        assert_eq!(MonthFormat::Long.format(9), "September");
        assert_eq!(MonthFormat::Numeric.format(12), "12");
        assert_eq!(MonthFormat::Short.format(13), "13");
    }

    #[test]
    fn test_weekday_format() {
        assert_eq!(WeekdayFormat::Short.format(Weekday::Wed), "Wed");
        assert_eq!(WeekdayFormat::Long.format(Weekday::Sat), "Saturday");
        assert_eq!(WeekdayFormat::Narrow.format(Weekday::Thu), "T");
    }

    #[test]
    fn test_month_labels_quarter() {
        // Mon 2025-01-06 .. Sun 2025-03-30, 12 whole weeks.
        let g = grid("2025-01-06", "2025-03-30", Weekday::Mon);
        let labels = plan_month_labels(&g, MonthFormat::Short, 1);
        let placed: Vec<(u32, &str)> = labels.iter().map(|l| (l.column, l.text.as_str())).collect();

        // Feb 1 falls in the week of Jan 27 (col 3), Mar 1 in the week of Feb 24 (col 7).
        assert_eq!(placed, vec![(0, "Jan"), (3, "Feb"), (7, "Mar")]);
    }

    #[test]
    fn test_first_column_spanning_month_start() {
        // Week of Mon 2024-12-30 contains Jan 1.
        let g = grid("2024-12-30", "2025-01-26", Weekday::Mon);
        let labels = plan_month_labels(&g, MonthFormat::Long, 3);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].column, 0);
        assert_eq!(labels[0].text, "January");
        assert_eq!(labels[0].year, 2025);
    }

    #[test]
    fn test_spacing_suppresses_crowded_label() {
        // Column 0 (Jan 20-26) is "Jan"; Feb 1 falls in column 1.
        let g = grid("2025-01-20", "2025-04-27", Weekday::Mon);
        let placed = |spacing| {
            plan_month_labels(&g, MonthFormat::Short, spacing)
                .into_iter()
                .map(|l| (l.column, l.text))
                .collect::<Vec<_>>()
        };

        let loose = placed(1);
        assert_eq!(loose.len(), 4);
        assert_eq!(loose[1], (1, "Feb".to_string()));

        let spaced = placed(3);
        let columns: Vec<u32> = spaced.iter().map(|(c, _)| *c).collect();
        assert_eq!(columns, vec![0, 5, 10]);
        assert_eq!(spaced[0].1, "Jan");
    }

    #[test]
    fn test_weekday_labels_default_subset() {
        let labels = plan_weekday_labels(&[1, 3, 5], Weekday::Sun, WeekdayFormat::Short);
        let text: Vec<&str> = labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(text, ["Mon", "Wed", "Fri"]);
    }

    #[test]
    fn test_weekday_labels_follow_week_start() {
        let labels = plan_weekday_labels(&[6, 0, 0, 9], Weekday::Mon, WeekdayFormat::Short);
        assert_eq!(labels.len(), 2);
        assert_eq!((labels[0].row, labels[0].weekday), (0, Weekday::Mon));
        assert_eq!((labels[1].row, labels[1].weekday), (6, Weekday::Sun));
    }
}
