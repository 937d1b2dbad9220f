//! End-to-end properties of the calendar pipeline.
//!
//! Run: cargo test --test calendar_properties

#![allow(clippy::unwrap_used, missing_docs)]

use std::io::Write;

use chrono::{FixedOffset, TimeZone, Weekday};
use proptest::prelude::*;
use trueno_calendar::prelude::*;

fn day(y: i32, m: u32, d: u32) -> DayKey {
    DayKey::from_ymd(y, m, d).unwrap()
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn same_day_observations_merge() {
    let obs: Vec<Observation> =
        vec![Observation::new("2025-06-01", 3.0), Observation::new("2025-06-01", 5.0)];
    let days = aggregate(&obs, MergeStrategy::Sum).unwrap();

    assert_eq!(days.len(), 1);
    let june_first = &days[&day(2025, 6, 1)];
    assert_eq!(june_first.value, 8.0);
    assert_eq!(june_first.count, 2);
}

#[test]
fn timestamps_keep_their_written_date() {
    let late_evening = FixedOffset::west_opt(5 * 3600)
        .unwrap()
        .with_ymd_and_hms(2025, 6, 1, 23, 30, 0)
        .unwrap();
    let obs: Vec<Observation> = vec![
        Observation::new(late_evening, 1.0),
        Observation::new("2025-06-01T08:00:00+09:00", 1.0),
        Observation::new("2025-06-01", 1.0),
    ];
    let days = aggregate(&obs, MergeStrategy::Sum).unwrap();

    assert_eq!(days.keys().copied().collect::<Vec<_>>(), vec![day(2025, 6, 1)]);
    assert_eq!(days[&day(2025, 6, 1)].value, 3.0);
}

#[test]
fn count_events_tallies_per_day() {
    struct Commit {
        at: &'static str,
    }
    let commits = [
        Commit { at: "2025-02-10" },
        Commit { at: "2025-02-10" },
        Commit { at: "2025-02-11" },
    ];
    let days = aggregate(&count_events(&commits, |c| c.at), MergeStrategy::Sum).unwrap();

    assert_eq!(days[&day(2025, 2, 10)].value, 2.0);
    assert_eq!(days[&day(2025, 2, 11)].value, 1.0);
}

// ============================================================================
// Full pipeline
// ============================================================================

#[test]
fn year_grid_has_whole_weeks() {
    let model = CalendarHeatmap::new().week_starts_on(1).today(day(2025, 6, 30)).build().unwrap();

    let grid = &model.grid;
    assert_eq!(grid.week_start(), Weekday::Mon);
    assert_eq!(grid.cells().len() as u32, grid.column_count() * 7);
    assert_eq!(grid.aligned().start.weekday(), Weekday::Mon);
    assert_eq!(grid.aligned().end.weekday(), Weekday::Sun);
    assert_eq!(model.month_labels[0].column, 0);
    for pair in model.month_labels.windows(2) {
        assert!(pair[1].column - pair[0].column >= 3);
    }
}

#[test]
fn yaml_options_drive_the_model() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "range_days: 28\nweek_starts_on: 1\ntheme: violet\ntheme_mode: dark\naxis_labels: false"
    )
    .unwrap();

    let from_file = HeatmapOptions::load(file.path()).unwrap();
    let in_code = HeatmapOptions { cell_size: Some(16), ..Default::default() };

    let model = CalendarHeatmap::new()
        .options(from_file)
        .options(in_code)
        .observation("2025-06-20", 4.0)
        .today(day(2025, 6, 29))
        .build()
        .unwrap();

    let violet = ThemePreset::find("violet").unwrap();
    assert_eq!(model.config.palette, violet.dark.to_vec());
    assert_eq!(model.config.cell_size, 16);
    assert_eq!(model.grid.column_count(), 4);
    assert!(model.month_labels.is_empty());
    assert!(model.weekday_labels.is_empty());

    let cell = model.grid.cell_for(day(2025, 6, 20)).unwrap();
    assert_eq!(model.color(cell), violet.dark[4]);
}

#[test]
fn config_errors_are_reported() {
    let err = CalendarHeatmap::new()
        .palette(vec![Rgba::WHITE, Rgba::BLACK, Rgba::WHITE, Rgba::BLACK])
        .options(HeatmapOptions { levels: Some(5), ..Default::default() })
        .build()
        .unwrap_err();
    assert!(err.is_config());

    let err = CalendarHeatmap::new().week_starts_on(9).build().unwrap_err();
    assert!(matches!(err, Error::Config { field: "week_starts_on", .. }));
    assert!(err.to_string().contains("week_starts_on"));
}

#[test]
fn hover_and_click_reach_the_handler() {
    #[derive(Default)]
    struct Tooltip {
        shown: Option<String>,
        opened: Vec<DayKey>,
    }

    impl CellHandler<u32> for Tooltip {
        fn on_hover(&mut self, event: &CellEvent<'_, u32>) {
            self.shown = Some(event.label.to_string());
        }

        fn on_click(&mut self, event: &CellEvent<'_, u32>) {
            self.opened.push(event.date);
        }
    }

    let observations = vec![Observation::new("2025-06-11", 52.5).with_meta(7_u32)];
    let model = CalendarHeatmap::with_data(observations)
        .range_days(14)
        .cell_geometry(10, 2)
        .today(day(2025, 6, 14))
        .build()
        .unwrap();

    let cell = model.grid.cell_for(day(2025, 6, 11)).unwrap();
    let point = model.cell_rect(cell).center();
    let hit = model.hit_test(point).unwrap();

    let mut tooltip = Tooltip::default();
    assert!(model.dispatch(hit.column, hit.row, Interaction::Hover, &mut tooltip));
    assert!(model.dispatch(hit.column, hit.row, Interaction::Click, &mut tooltip));

    assert_eq!(tooltip.shown.as_deref(), Some("Wednesday, June 11, 2025: 52.5"));
    assert_eq!(tooltip.opened, vec![day(2025, 6, 11)]);
    assert_eq!(model.event_for(cell).unwrap().meta, &[7]);
}

// ============================================================================
// Properties
// ============================================================================

fn arb_observations() -> impl Strategy<Value = Vec<(i64, f64)>> {
    prop::collection::vec((0i64..120, 0.0f64..50.0), 0..60)
}

fn build(observations: &[(i64, f64)], week_start: u8) -> RenderModel {
    let base = day(2025, 1, 1);
    let data: Vec<Observation> = observations
        .iter()
        .map(|&(offset, v)| Observation::new(base.add_days(offset), v))
        .collect();
    CalendarHeatmap::new()
        .data(&data)
        .range_days(120)
        .week_starts_on(week_start)
        .today(base.add_days(119))
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_pipeline_is_idempotent(obs in arb_observations(), ws in 0u8..7) {
        prop_assert_eq!(build(&obs, ws), build(&obs, ws));
    }

    #[test]
    fn prop_levels_follow_values(obs in arb_observations(), ws in 0u8..7) {
        let model = build(&obs, ws);
        let top = model.config.levels - 1;
        let mut cells: Vec<&Cell> = model.grid.interactive_cells().collect();
        cells.sort_by(|a, b| a.value.unwrap().total_cmp(&b.value.unwrap()));

        for pair in cells.windows(2) {
            prop_assert!(pair[0].level <= pair[1].level);
        }
        for cell in cells {
            prop_assert!(cell.level <= top);
            prop_assert_eq!(cell.level == 0, cell.value.unwrap() <= 0.0);
        }
    }

    #[test]
    fn prop_every_window_day_has_one_cell(obs in arb_observations(), ws in 0u8..7) {
        let model = build(&obs, ws);
        let window = model.grid.window();
        for d in window.days() {
            let cell = model.grid.cell_for(d);
            prop_assert!(cell.is_some_and(|c| c.interactive));
        }
        prop_assert_eq!(model.grid.interactive_cells().count(), 120);
    }
}
