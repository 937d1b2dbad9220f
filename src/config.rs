//! Heatmap options and their resolution into a render-ready configuration.
//!
//! [`HeatmapOptions`] is the caller-facing form: every field optional, so
//! option sets from different sources can be layered with
//! [`HeatmapOptions::merge`] (code overrides > file > defaults). Resolution
//! fills defaults and validates everything in one pass, before any grid work.
//!
//! Options can be written in YAML:
//!
//! ```yaml
//! range_days: 90
//! week_starts_on: 1
//! theme: violet
//! legend:
//!   placement: bottom
//!   less_text: Fewer
//! axis_labels:
//!   weekday_indices: [0, 2, 4]
//!   month_format: long
//! ```

use std::path::Path;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::aggregate::MergeStrategy;
use crate::color::Rgba;
use crate::day::weekday_from_index;
use crate::error::{Error, Result};
use crate::labels::{MonthFormat, WeekdayFormat};
use crate::range::RangeMode;
use crate::theme::{ThemeMode, ThemePreset, DEFAULT_PRESET};

/// Default window length in days.
pub const DEFAULT_RANGE_DAYS: u32 = 365;
/// Longest accepted window, about a century.
pub const MAX_RANGE_DAYS: u32 = 36_525;
/// Default cell side length.
pub const DEFAULT_CELL_SIZE: u32 = 12;
/// Default space between cells.
pub const DEFAULT_CELL_GAP: u32 = 3;
/// Default number of bucket levels (empty + 4).
pub const DEFAULT_LEVELS: u8 = 5;
/// Default labeled weekday rows.
pub const DEFAULT_WEEKDAY_INDICES: [u8; 3] = [1, 3, 5];
/// Default minimum number of columns between month labels.
pub const DEFAULT_MIN_WEEK_SPACING: u32 = 3;

/// Where the legend sits relative to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPlacement {
    /// Above the grid.
    #[default]
    Top,
    /// Below the grid.
    Bottom,
}

/// Partial legend options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegendOptions {
    /// Legend position.
    pub placement: Option<LegendPlacement>,
    /// Text before the lowest swatch.
    pub less_text: Option<String>,
    /// Text after the highest swatch.
    pub more_text: Option<String>,
}

impl LegendOptions {
    /// Layer `overrides` on top of `self`, field by field.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            placement: overrides.placement.or(self.placement),
            less_text: overrides.less_text.or(self.less_text),
            more_text: overrides.more_text.or(self.more_text),
        }
    }
}

/// Partial axis label options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AxisLabelOptions {
    /// Show month names over week columns.
    pub show_months: Option<bool>,
    /// Show weekday names beside rows.
    pub show_weekdays: Option<bool>,
    /// Rows (0-6, relative to the week start) that get a weekday label.
    pub weekday_indices: Option<Vec<u8>>,
    /// Month name style.
    pub month_format: Option<MonthFormat>,
    /// Weekday name style.
    pub weekday_format: Option<WeekdayFormat>,
    /// Minimum columns between consecutive month labels.
    pub min_week_spacing: Option<u32>,
}

impl AxisLabelOptions {
    /// Layer `overrides` on top of `self`, field by field.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            show_months: overrides.show_months.or(self.show_months),
            show_weekdays: overrides.show_weekdays.or(self.show_weekdays),
            weekday_indices: overrides.weekday_indices.or(self.weekday_indices),
            month_format: overrides.month_format.or(self.month_format),
            weekday_format: overrides.weekday_format.or(self.weekday_format),
            min_week_spacing: overrides.min_week_spacing.or(self.min_week_spacing),
        }
    }
}

/// Axis labels: a plain on/off switch or detailed options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisLabels {
    /// `true` for the defaults, `false` to hide all axis labels.
    Enabled(bool),
    /// Per-field options; unset fields take defaults.
    Custom(AxisLabelOptions),
}

impl AxisLabels {
    fn merge(self, overrides: Self) -> Self {
        match (self, overrides) {
            (Self::Custom(base), Self::Custom(over)) => Self::Custom(base.merge(over)),
            (Self::Custom(base), Self::Enabled(true)) => Self::Custom(base),
            (_, over) => over,
        }
    }
}

impl From<bool> for AxisLabels {
    fn from(enabled: bool) -> Self {
        Self::Enabled(enabled)
    }
}

impl From<AxisLabelOptions> for AxisLabels {
    fn from(options: AxisLabelOptions) -> Self {
        Self::Custom(options)
    }
}

/// Caller-supplied options; every field falls back to a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeatmapOptions {
    /// Days in the window ending today.
    pub range_days: Option<u32>,
    /// Whether the window clips the data or widens to fit it.
    pub range_mode: Option<RangeMode>,
    /// First day of the week, 0 = Sunday .. 6 = Saturday.
    pub week_starts_on: Option<u8>,
    /// Cell side length.
    pub cell_size: Option<u32>,
    /// Space between cells.
    pub cell_gap: Option<u32>,
    /// Colors from empty to most intense; its length sets the level count.
    pub palette: Option<Vec<Rgba>>,
    /// Number of bucket levels, including the empty level.
    pub levels: Option<u8>,
    /// Preset used when no palette is given.
    pub theme: Option<String>,
    /// Preset variant.
    pub theme_mode: Option<ThemeMode>,
    /// How same-day observations combine.
    pub merge: Option<MergeStrategy>,
    /// Emit non-interactive cells for days outside the window.
    pub show_filler: Option<bool>,
    /// Legend options.
    pub legend: Option<LegendOptions>,
    /// Axis label options.
    pub axis_labels: Option<AxisLabels>,
}

impl HeatmapOptions {
    /// Creates empty options (all defaults).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads options from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses options from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse { line, message: e.to_string() }
        })
    }

    /// Layer `overrides` on top of `self`, field by field.
    ///
    /// `legend` and `axis_labels` are merged per field as well, so an
    /// override that only sets `legend.placement` keeps the base texts.
    /// `axis_labels: false` always wins; `true` keeps base details.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            range_days: overrides.range_days.or(self.range_days),
            range_mode: overrides.range_mode.or(self.range_mode),
            week_starts_on: overrides.week_starts_on.or(self.week_starts_on),
            cell_size: overrides.cell_size.or(self.cell_size),
            cell_gap: overrides.cell_gap.or(self.cell_gap),
            palette: overrides.palette.or(self.palette),
            levels: overrides.levels.or(self.levels),
            theme: overrides.theme.or(self.theme),
            theme_mode: overrides.theme_mode.or(self.theme_mode),
            merge: overrides.merge.or(self.merge),
            show_filler: overrides.show_filler.or(self.show_filler),
            legend: merge_nested(self.legend, overrides.legend, LegendOptions::merge),
            axis_labels: merge_nested(self.axis_labels, overrides.axis_labels, AxisLabels::merge),
        }
    }

    /// Apply defaults and validate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first offending option.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let range_days = self.range_days.unwrap_or(DEFAULT_RANGE_DAYS);
        if range_days == 0 {
            return Err(Error::config("range_days", "must be positive"));
        }
        if range_days > MAX_RANGE_DAYS {
            return Err(Error::config(
                "range_days",
                format!("must be at most {MAX_RANGE_DAYS}, got {range_days}"),
            ));
        }

        let start_index = self.week_starts_on.unwrap_or(0);
        let week_starts_on = weekday_from_index(start_index).ok_or_else(|| {
            Error::config("week_starts_on", format!("must be in 0..=6, got {start_index}"))
        })?;

        let cell_size = self.cell_size.unwrap_or(DEFAULT_CELL_SIZE);
        if cell_size == 0 {
            return Err(Error::config("cell_size", "must be positive"));
        }
        let cell_gap = self.cell_gap.unwrap_or(DEFAULT_CELL_GAP);
        if cell_gap == 0 {
            return Err(Error::config("cell_gap", "must be positive"));
        }

        let (levels, palette) = self.resolve_palette()?;

        Ok(ResolvedConfig {
            range_days,
            range_mode: self.range_mode.unwrap_or_default(),
            week_starts_on,
            cell_size,
            cell_gap,
            levels,
            palette,
            merge: self.merge.unwrap_or_default(),
            show_filler: self.show_filler.unwrap_or(true),
            legend: resolve_legend(self.legend.as_ref()),
            axis_labels: resolve_axis_labels(self.axis_labels.as_ref())?,
        })
    }

    fn resolve_palette(&self) -> Result<(u8, Vec<Rgba>)> {
        let levels = match (&self.palette, self.levels) {
            (Some(palette), Some(levels)) if palette.len() != usize::from(levels) => {
                return Err(Error::config(
                    "palette",
                    format!("has {} colors but levels is {levels}", palette.len()),
                ));
            }
            (Some(palette), _) => u8::try_from(palette.len()).map_err(|_| {
                Error::config("palette", format!("too many colors ({})", palette.len()))
            })?,
            (None, levels) => levels.unwrap_or(DEFAULT_LEVELS),
        };
        if levels < 2 {
            return Err(Error::config("levels", format!("need at least 2 levels, got {levels}")));
        }

        if let Some(palette) = &self.palette {
            return Ok((levels, palette.clone()));
        }

        let name = self.theme.as_deref().unwrap_or(DEFAULT_PRESET);
        let preset = ThemePreset::find(name)
            .ok_or_else(|| Error::config("theme", format!("unknown preset '{name}'")))?;
        Ok((levels, preset.palette(self.theme_mode.unwrap_or_default(), levels)))
    }
}

fn merge_nested<T>(
    base: Option<T>,
    overrides: Option<T>,
    merge: impl FnOnce(T, T) -> T,
) -> Option<T> {
    match (base, overrides) {
        (Some(base), Some(over)) => Some(merge(base, over)),
        (base, over) => over.or(base),
    }
}

fn resolve_legend(options: Option<&LegendOptions>) -> LegendConfig {
    let options = options.cloned().unwrap_or_default();
    LegendConfig {
        placement: options.placement.unwrap_or_default(),
        less_text: options.less_text.unwrap_or_else(|| "Less".to_string()),
        more_text: options.more_text.unwrap_or_else(|| "More".to_string()),
    }
}

fn resolve_axis_labels(options: Option<&AxisLabels>) -> Result<AxisLabelConfig> {
    let (enabled, options) = match options {
        None | Some(AxisLabels::Enabled(true)) => (true, AxisLabelOptions::default()),
        Some(AxisLabels::Enabled(false)) => (false, AxisLabelOptions::default()),
        Some(AxisLabels::Custom(options)) => (true, options.clone()),
    };

    let mut weekday_indices =
        options.weekday_indices.unwrap_or_else(|| DEFAULT_WEEKDAY_INDICES.to_vec());
    if let Some(bad) = weekday_indices.iter().find(|&&i| i > 6) {
        return Err(Error::config("weekday_indices", format!("must be in 0..=6, got {bad}")));
    }
    weekday_indices.sort_unstable();
    weekday_indices.dedup();

    let min_week_spacing = options.min_week_spacing.unwrap_or(DEFAULT_MIN_WEEK_SPACING);
    if min_week_spacing == 0 {
        return Err(Error::config("min_week_spacing", "must be at least 1"));
    }

    Ok(AxisLabelConfig {
        show_months: enabled && options.show_months.unwrap_or(true),
        show_weekdays: enabled && options.show_weekdays.unwrap_or(true),
        weekday_indices,
        month_format: options.month_format.unwrap_or_default(),
        weekday_format: options.weekday_format.unwrap_or_default(),
        min_week_spacing,
    })
}

/// Resolved legend settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendConfig {
    /// Legend position.
    pub placement: LegendPlacement,
    /// Text before the lowest swatch.
    pub less_text: String,
    /// Text after the highest swatch.
    pub more_text: String,
}

/// Resolved axis label settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabelConfig {
    /// Month labels shown.
    pub show_months: bool,
    /// Weekday labels shown.
    pub show_weekdays: bool,
    /// Labeled rows, sorted and unique.
    pub weekday_indices: Vec<u8>,
    /// Month name style.
    pub month_format: MonthFormat,
    /// Weekday name style.
    pub weekday_format: WeekdayFormat,
    /// Minimum columns between month labels.
    pub min_week_spacing: u32,
}

/// Fully validated configuration with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Days in the window.
    pub range_days: u32,
    /// Window policy.
    pub range_mode: RangeMode,
    /// First day of the week.
    pub week_starts_on: Weekday,
    /// Cell side length.
    pub cell_size: u32,
    /// Space between cells.
    pub cell_gap: u32,
    /// Number of bucket levels.
    pub levels: u8,
    /// One color per level, empty first.
    pub palette: Vec<Rgba>,
    /// Same-day merge rule.
    pub merge: MergeStrategy,
    /// Filler cells emitted.
    pub show_filler: bool,
    /// Legend settings.
    pub legend: LegendConfig,
    /// Axis label settings.
    pub axis_labels: AxisLabelConfig,
}

impl ResolvedConfig {
    /// Palette color for `level`; out-of-range levels use the top color.
    #[must_use]
    pub fn color(&self, level: u8) -> Rgba {
        let i = usize::from(level).min(self.palette.len().saturating_sub(1));
        self.palette.get(i).copied().unwrap_or_default()
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let preset = ThemePreset::find(DEFAULT_PRESET).map_or_else(Vec::new, |p| p.light.to_vec());
        Self {
            range_days: DEFAULT_RANGE_DAYS,
            range_mode: RangeMode::default(),
            week_starts_on: Weekday::Sun,
            cell_size: DEFAULT_CELL_SIZE,
            cell_gap: DEFAULT_CELL_GAP,
            levels: DEFAULT_LEVELS,
            palette: preset,
            merge: MergeStrategy::default(),
            show_filler: true,
            legend: resolve_legend(None),
            axis_labels: AxisLabelConfig {
                show_months: true,
                show_weekdays: true,
                weekday_indices: DEFAULT_WEEKDAY_INDICES.to_vec(),
                month_format: MonthFormat::default(),
                weekday_format: WeekdayFormat::default(),
                min_week_spacing: DEFAULT_MIN_WEEK_SPACING,
            },
        }
    }
}
