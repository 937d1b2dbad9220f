//! # Trueno-Calendar
//!
//! Calendar heatmap engine: turns dated observations into a render-ready
//! "GitHub-style" activity grid.
//!
//! The crate stops at the model. It produces positioned cells with bucket
//! levels and labels, month and weekday label overlays, a legend and a fully
//! resolved configuration; painting them (SVG, canvas, terminal) is up to the
//! caller.
//!
//! ## Features
//!
//! - **Deterministic**: the same observations, options and anchor day always
//!   give the same model; the clock is read only when no day is injected
//! - **Timezone-agnostic days**: timestamps keep the calendar date as written
//! - **Validated configuration**: every option is checked once, up front
//! - **YAML options** with layered merging and built-in theme presets
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_calendar::prelude::*;
//!
//! let model = CalendarHeatmap::new()
//!     .observation("2025-06-01", 3.0)
//!     .observation("2025-06-03T18:30:00+02:00", 5.0)
//!     .range_days(90)
//!     .week_starts_on(1)
//!     .today(DayKey::from_ymd(2025, 6, 30).unwrap())
//!     .build()?;
//!
//! for cell in model.grid.cells() {
//!     let rect = model.cell_rect(cell);
//!     let color = model.color(cell);
//!     // paint `rect` with `color`, attach `cell.label` as a tooltip
//!     # let _ = (rect, color);
//! }
//! # Ok::<(), trueno_calendar::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and hex parsing.
pub mod color;

/// Calendar days and date input normalization.
pub mod day;

/// Geometric primitives and cell placement.
pub mod geometry;

/// Scale functions for value-to-level mappings.
pub mod scale;

/// Built-in palette presets.
pub mod theme;

// ============================================================================
// Pipeline Modules
// ============================================================================

/// Per-day aggregation of observations.
pub mod aggregate;

/// Window resolution and week alignment.
pub mod range;

/// Grid layout.
pub mod layout;

/// Month and weekday axis labels.
pub mod labels;

/// Options, defaults and validation.
pub mod config;

/// Heatmap builder and render model.
pub mod calendar;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-calendar operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_calendar::prelude::*;
/// ```
pub mod prelude {
    pub use crate::aggregate::{
        aggregate, count_events, observations_from_events, AggregatedDay, DayMap, MergeStrategy,
        Observation,
    };
    pub use crate::calendar::{
        CalendarHeatmap, CellEvent, CellHandler, Interaction, LegendModel, LegendSwatch,
        RenderModel,
    };
    pub use crate::color::Rgba;
    pub use crate::config::{
        AxisLabelOptions, AxisLabels, HeatmapOptions, LegendOptions, LegendPlacement,
        ResolvedConfig,
    };
    pub use crate::day::{to_day_key, DateInput, DayKey};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{GridGeometry, Point, Rect};
    pub use crate::labels::{MonthFormat, MonthLabel, WeekdayFormat, WeekdayLabel};
    pub use crate::layout::{Cell, Grid};
    pub use crate::range::{DayRange, RangeMode};
    pub use crate::scale::{BucketScale, Scale};
    pub use crate::theme::{ThemeMode, ThemePreset};
}
