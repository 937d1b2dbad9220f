//! Grid layout: one cell per day on a week-column / weekday-row matrix.

use chrono::Weekday;

use crate::aggregate::DayMap;
use crate::day::{days_between, DayKey};
use crate::labels::weekday_name;
use crate::range::DayRange;
use crate::scale::{BucketScale, Scale};

/// Number of rows in every grid (one per weekday).
pub const ROW_COUNT: u8 = 7;

/// One day of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// The day this cell shows.
    pub day: DayKey,
    /// Aggregated value; `None` for filler days outside the window.
    pub value: Option<f64>,
    /// Bucket level selecting the palette color.
    pub level: u8,
    /// Zero-based week column.
    pub column: u32,
    /// Weekday row, 0 = configured first day of the week.
    pub row: u8,
    /// Human-readable description, e.g. `Sunday, June 1, 2025: 3`.
    pub label: String,
    /// Whether the cell accepts click/hover interaction.
    pub interactive: bool,
}

impl Cell {
    /// True for cells inside the aligned weeks but outside the window.
    #[must_use]
    pub const fn is_filler(&self) -> bool {
        self.value.is_none()
    }
}

/// The laid-out calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<Cell>,
    column_count: u32,
    window: DayRange,
    aligned: DayRange,
    week_start: Weekday,
}

impl Grid {
    /// Cells in day order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of week columns.
    #[must_use]
    pub const fn column_count(&self) -> u32 {
        self.column_count
    }

    /// Number of weekday rows (always 7).
    #[must_use]
    pub const fn row_count(&self) -> u8 {
        ROW_COUNT
    }

    /// The requested window.
    #[must_use]
    pub const fn window(&self) -> DayRange {
        self.window
    }

    /// The window widened to whole weeks.
    #[must_use]
    pub const fn aligned(&self) -> DayRange {
        self.aligned
    }

    /// First day of the week.
    #[must_use]
    pub const fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// First day of `column`.
    #[must_use]
    pub fn column_start(&self, column: u32) -> DayKey {
        self.aligned.start.add_days(i64::from(column) * 7)
    }

    /// Day shown at (`column`, `row`), whether or not a cell is emitted there.
    #[must_use]
    pub fn day_at(&self, column: u32, row: u8) -> Option<DayKey> {
        if column >= self.column_count || row >= ROW_COUNT {
            return None;
        }
        Some(self.column_start(column).add_days(i64::from(row)))
    }

    /// The cell at (`column`, `row`), if one was emitted.
    #[must_use]
    pub fn cell_at(&self, column: u32, row: u8) -> Option<&Cell> {
        let day = self.day_at(column, row)?;
        self.cell_for(day)
    }

    /// The cell for `day`, if one was emitted.
    #[must_use]
    pub fn cell_for(&self, day: DayKey) -> Option<&Cell> {
        self.cells.binary_search_by(|c| c.day.cmp(&day)).ok().map(|i| &self.cells[i])
    }

    /// Cells that accept interaction.
    pub fn interactive_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.interactive)
    }
}

/// Lay out `window` on whole weeks starting at `week_start`.
///
/// Every day of the aligned range becomes a cell, in day order. Days outside
/// `window` are non-interactive filler, emitted only when `show_filler` is
/// set. Window days missing from `days` get value 0.
#[must_use]
pub fn layout_grid<M>(
    window: DayRange,
    week_start: Weekday,
    days: &DayMap<M>,
    scale: &BucketScale,
    show_filler: bool,
) -> Grid {
    let aligned = window.align(week_start);
    let column_count = (aligned.len_days() / 7).max(1);

    let cells: Vec<Cell> = aligned
        .days()
        .filter_map(|day| {
            let column = (days_between(aligned.start, day) / 7) as u32;
            let row = day.day_of_week(week_start);

            if !window.contains(day) {
                return show_filler.then(|| Cell {
                    day,
                    value: None,
                    level: scale.empty_level(),
                    column,
                    row,
                    label: format_day(day),
                    interactive: false,
                });
            }

            let value = days.get(&day).map_or(0.0, |d| d.value);
            Some(Cell {
                day,
                value: Some(value),
                level: scale.scale(value),
                column,
                row,
                label: format!("{}: {value}", format_day(day)),
                interactive: true,
            })
        })
        .collect();

    log::trace!(
        "laid out {} cells over {} columns ({} to {})",
        cells.len(),
        column_count,
        aligned.start,
        aligned.end
    );

    Grid { cells, column_count, window, aligned, week_start }
}

/// `Wednesday, January 1, 2025`, independent of locale.
fn format_day(day: DayKey) -> String {
    format!(
        "{}, {} {}, {}",
        weekday_name(day.weekday()),
        day.date().format("%B"),
        day.day(),
        day.year()
    )
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::day::weekday_from_index;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        /// Cells come in day order: columns never decrease, rows strictly
        /// increase within a column, and positions match the formulas.
        #[test]
        fn prop_cells_ordered(
            start_offset in 0i64..3000,
            len in 1i64..400,
            week_start in 0u8..7,
            show_filler in any::<bool>(),
        ) {
            let ws = weekday_from_index(week_start).unwrap();
            let start = DayKey::from_ymd(2020, 1, 1).unwrap().add_days(start_offset);
            let window = DayRange::new(start, start.add_days(len - 1));
            let days: DayMap = DayMap::new();
            let grid = layout_grid(window, ws, &days, &BucketScale::new(5, 1.0), show_filler);

            for pair in grid.cells().windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a.day < b.day);
                prop_assert!(a.column <= b.column);
                if a.column == b.column {
                    prop_assert!(a.row < b.row);
                }
            }
            for cell in grid.cells() {
                prop_assert!(cell.row < ROW_COUNT);
                prop_assert!(cell.column < grid.column_count());
                prop_assert_eq!(grid.day_at(cell.column, cell.row), Some(cell.day));
            }

            let interactive = grid.interactive_cells().count() as i64;
            prop_assert_eq!(interactive, len);
            if show_filler {
                prop_assert_eq!(grid.cells().len() as u32, grid.column_count() * 7);
            }
        }
    }
}
