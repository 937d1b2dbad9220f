//! Calendar heatmap builder and render model.
//!
//! [`CalendarHeatmap`] runs the whole pipeline: resolve options, aggregate
//! observations, pick the window, bucket the days, lay out the grid and plan
//! the labels. The result is a [`RenderModel`]: everything a painter needs,
//! with no drawing done.
//!
//! ```rust
//! use trueno_calendar::prelude::*;
//!
//! let today = DayKey::from_ymd(2025, 6, 30).unwrap();
//! let model = CalendarHeatmap::new()
//!     .observation("2025-06-01", 3.0)
//!     .observation("2025-06-01", 5.0)
//!     .range_days(30)
//!     .today(today)
//!     .build()
//!     .unwrap();
//!
//! let june_first = model.grid.cell_for(DayKey::from_ymd(2025, 6, 1).unwrap()).unwrap();
//! assert_eq!(june_first.value, Some(8.0));
//! assert_eq!(june_first.level, 4);
//! ```

use crate::aggregate::{aggregate, DayMap, Observation};
use crate::color::Rgba;
use crate::config::{HeatmapOptions, LegendPlacement, ResolvedConfig};
use crate::day::{today_local, DateInput, DayKey};
use crate::error::Result;
use crate::geometry::{GridGeometry, Point, Rect};
use crate::labels::{plan_month_labels, plan_weekday_labels, MonthLabel, WeekdayLabel};
use crate::layout::{layout_grid, Cell, Grid};
use crate::range::resolve_window;
use crate::scale::BucketScale;

/// Builder for calendar heatmaps.
#[derive(Debug, Clone)]
pub struct CalendarHeatmap<M = ()> {
    observations: Vec<Observation<M>>,
    options: HeatmapOptions,
    today: Option<DayKey>,
}

impl<M> Default for CalendarHeatmap<M> {
    fn default() -> Self {
        Self { observations: Vec::new(), options: HeatmapOptions::default(), today: None }
    }
}

impl CalendarHeatmap {
    /// Create a new calendar heatmap builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single observation.
    #[must_use]
    pub fn observation(mut self, date: impl Into<DateInput>, value: f64) -> Self {
        self.observations.push(Observation::new(date, value));
        self
    }
}

impl<M: Clone> CalendarHeatmap<M> {
    /// Create a builder over observations carrying metadata.
    #[must_use]
    pub fn with_data(observations: Vec<Observation<M>>) -> Self {
        Self { observations, ..Self::default() }
    }

    /// Append observations.
    #[must_use]
    pub fn data(mut self, observations: &[Observation<M>]) -> Self {
        self.observations.extend_from_slice(observations);
        self
    }

    /// Layer `options` over the options set so far.
    #[must_use]
    pub fn options(mut self, options: HeatmapOptions) -> Self {
        self.options = self.options.merge(options);
        self
    }

    /// Set the window length in days.
    #[must_use]
    pub fn range_days(mut self, days: u32) -> Self {
        self.options.range_days = Some(days);
        self
    }

    /// Set the first day of the week (0 = Sunday).
    #[must_use]
    pub fn week_starts_on(mut self, index: u8) -> Self {
        self.options.week_starts_on = Some(index);
        self
    }

    /// Set an explicit palette, empty color first.
    #[must_use]
    pub fn palette(mut self, palette: Vec<Rgba>) -> Self {
        self.options.palette = Some(palette);
        self
    }

    /// Select a theme preset by name.
    #[must_use]
    pub fn theme(mut self, name: impl Into<String>) -> Self {
        self.options.theme = Some(name.into());
        self
    }

    /// Set the cell size and gap.
    #[must_use]
    pub fn cell_geometry(mut self, size: u32, gap: u32) -> Self {
        self.options.cell_size = Some(size);
        self.options.cell_gap = Some(gap);
        self
    }

    /// Anchor the window on `today` instead of the local clock.
    #[must_use]
    pub fn today(mut self, today: DayKey) -> Self {
        self.today = Some(today);
        self
    }

    /// Build the render model.
    ///
    /// Options are validated before any observation is looked at.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid options, or the first
    /// invalid observation's date or value error.
    pub fn build(&self) -> Result<RenderModel<M>> {
        let config = self.options.resolve()?;
        let days = aggregate(&self.observations, config.merge)?;

        let today = self.today.unwrap_or_else(today_local);
        let window = resolve_window(config.range_days, today, config.range_mode, &days);

        let clipped = days.keys().filter(|d| !window.contains(**d)).count();
        log::debug!(
            "calendar window {} to {}: {} days aggregated, {} outside window",
            window.start,
            window.end,
            days.len(),
            clipped
        );

        let scale = BucketScale::from_values(
            config.levels,
            days.values().filter(|d| window.contains(d.day)).map(|d| d.value),
        );
        let grid = layout_grid(window, config.week_starts_on, &days, &scale, config.show_filler);

        let axis = &config.axis_labels;
        let month_labels = if axis.show_months {
            plan_month_labels(&grid, axis.month_format, axis.min_week_spacing)
        } else {
            Vec::new()
        };
        let weekday_labels = if axis.show_weekdays {
            plan_weekday_labels(&axis.weekday_indices, config.week_starts_on, axis.weekday_format)
        } else {
            Vec::new()
        };

        let legend = LegendModel::new(&config, &scale);

        Ok(RenderModel { grid, month_labels, weekday_labels, legend, config, days })
    }
}

/// One legend entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendSwatch {
    /// Bucket level.
    pub level: u8,
    /// Palette color for the level.
    pub color: Rgba,
    /// Largest value in the level (0 for the empty level).
    pub upper: f64,
}

/// Legend ready for painting.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendModel {
    /// Legend position.
    pub placement: LegendPlacement,
    /// Text before the first swatch.
    pub less_text: String,
    /// Text after the last swatch.
    pub more_text: String,
    /// One swatch per level, lowest first.
    pub swatches: Vec<LegendSwatch>,
}

impl LegendModel {
    fn new(config: &ResolvedConfig, scale: &BucketScale) -> Self {
        let thresholds = scale.thresholds();
        let swatches = (0..config.levels)
            .map(|level| LegendSwatch {
                level,
                color: config.color(level),
                upper: match level {
                    0 => 0.0,
                    k => thresholds.get(usize::from(k) - 1).copied().unwrap_or(0.0),
                },
            })
            .collect();

        Self {
            placement: config.legend.placement,
            less_text: config.legend.less_text.clone(),
            more_text: config.legend.more_text.clone(),
            swatches,
        }
    }
}

/// User interaction with a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Pointer click or tap.
    Click,
    /// Pointer hover.
    Hover,
}

/// What a handler learns about an interactive cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellEvent<'a, M> {
    /// The cell's day.
    pub date: DayKey,
    /// Aggregated value.
    pub value: f64,
    /// The cell's description.
    pub label: &'a str,
    /// Metadata of every observation on that day.
    pub meta: &'a [M],
}

/// Receives cell interactions. Both methods default to doing nothing.
pub trait CellHandler<M> {
    /// Called when an interactive cell is clicked.
    fn on_click(&mut self, event: &CellEvent<'_, M>) {
        let _ = event;
    }

    /// Called when the pointer enters an interactive cell.
    fn on_hover(&mut self, event: &CellEvent<'_, M>) {
        let _ = event;
    }
}

/// A fully resolved calendar heatmap.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel<M = ()> {
    /// Positioned cells.
    pub grid: Grid,
    /// Month labels over columns.
    pub month_labels: Vec<MonthLabel>,
    /// Weekday labels beside rows.
    pub weekday_labels: Vec<WeekdayLabel>,
    /// Legend.
    pub legend: LegendModel,
    /// The configuration the model was built with.
    pub config: ResolvedConfig,
    /// Every aggregated day, including days outside the window.
    pub days: DayMap<M>,
}

impl<M> RenderModel<M> {
    /// Palette color of `cell`.
    #[must_use]
    pub fn color(&self, cell: &Cell) -> Rgba {
        self.config.color(cell.level)
    }

    /// Event payload for `cell`, or `None` for filler cells.
    #[must_use]
    pub fn event_for<'a>(&'a self, cell: &'a Cell) -> Option<CellEvent<'a, M>> {
        let value = cell.value.filter(|_| cell.interactive)?;
        let meta = self.days.get(&cell.day).map_or(&[][..], |d| d.meta.as_slice());
        Some(CellEvent { date: cell.day, value, label: &cell.label, meta })
    }

    /// Route an interaction at (`column`, `row`) to `handler`.
    ///
    /// Returns false, without calling the handler, when no interactive cell
    /// is there.
    pub fn dispatch<H>(
        &self,
        column: u32,
        row: u8,
        interaction: Interaction,
        handler: &mut H,
    ) -> bool
    where
        H: CellHandler<M> + ?Sized,
    {
        let Some(event) = self.grid.cell_at(column, row).and_then(|c| self.event_for(c)) else {
            return false;
        };
        match interaction {
            Interaction::Click => handler.on_click(&event),
            Interaction::Hover => handler.on_hover(&event),
        }
        true
    }

    /// Cell geometry at the configured size and gap.
    #[must_use]
    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.config.cell_size, self.config.cell_gap)
    }

    /// Rectangle occupied by `cell`, relative to the grid's top-left corner.
    #[must_use]
    pub fn cell_rect(&self, cell: &Cell) -> Rect {
        self.geometry().cell_rect(cell.column, cell.row)
    }

    /// Width and height of the grid.
    #[must_use]
    pub fn size(&self) -> (f32, f32) {
        self.geometry().extent(self.grid.column_count(), self.grid.row_count())
    }

    /// The cell under `point`, if any.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<&Cell> {
        let (column, row) =
            self.geometry().locate(point, self.grid.column_count(), self.grid.row_count())?;
        self.grid.cell_at(column, row)
    }
}
