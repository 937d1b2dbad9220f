//! Collapse observations into one value per calendar day.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::day::{to_day_key, DateInput, DayKey};
use crate::error::{Error, Result};

/// One raw data point: a day, an intensity and optional caller data.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation<M = ()> {
    /// Day of the observation.
    pub date: DateInput,
    /// Intensity (minutes, orders, tickets, ...).
    pub value: f64,
    /// Opaque caller data, carried through to cell events.
    pub meta: Option<M>,
}

impl<M> Observation<M> {
    /// Create an observation without metadata.
    #[must_use]
    pub fn new(date: impl Into<DateInput>, value: f64) -> Self {
        Self { date: date.into(), value, meta: None }
    }

    /// Attach metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: M) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// How same-day values combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Total per day.
    #[default]
    Sum,
    /// Peak value per day.
    Max,
    /// Lowest value per day.
    Min,
    /// Value of the last observation for the day, in input order.
    Last,
}

/// Combined value for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedDay<M = ()> {
    /// The day.
    pub day: DayKey,
    /// Merged value of all observations on this day.
    pub value: f64,
    /// Number of contributing observations.
    pub count: usize,
    /// Metadata of contributing observations, in input order.
    ///
    /// No merge rule is applied; callers decide what multiple entries mean.
    pub meta: Vec<M>,
}

/// Aggregated days keyed and ordered by day.
pub type DayMap<M = ()> = BTreeMap<DayKey, AggregatedDay<M>>;

/// Aggregate observations into one entry per distinct day.
///
/// With [`MergeStrategy::Sum`] the result does not depend on input order:
/// each day's values are added in sorted order.
///
/// # Errors
///
/// Fails on the first observation whose date cannot be parsed
/// ([`Error::InvalidDate`]) or whose value is not finite
/// ([`Error::InvalidValue`]). Nothing is returned on failure.
pub fn aggregate<M: Clone>(
    observations: &[Observation<M>],
    merge: MergeStrategy,
) -> Result<DayMap<M>> {
    let mut by_day: BTreeMap<DayKey, (Vec<f64>, Vec<M>)> = BTreeMap::new();

    for (index, obs) in observations.iter().enumerate() {
        let day = to_day_key(obs.date.clone()).map_err(|_| Error::InvalidDate {
            index: Some(index),
            input: obs.date.to_string(),
        })?;
        if !obs.value.is_finite() {
            return Err(Error::InvalidValue { index, value: obs.value });
        }

        let entry = by_day.entry(day).or_default();
        entry.0.push(obs.value);
        if let Some(meta) = &obs.meta {
            entry.1.push(meta.clone());
        }
    }

    let days: DayMap<M> = by_day
        .into_iter()
        .map(|(day, (values, meta))| {
            let count = values.len();
            let value = merge_values(values, merge);
            (day, AggregatedDay { day, value, count, meta })
        })
        .collect();

    log::trace!("aggregated {} observations into {} days", observations.len(), days.len());
    Ok(days)
}

fn merge_values(mut values: Vec<f64>, merge: MergeStrategy) -> f64 {
    match merge {
        MergeStrategy::Sum => {
            values.sort_by(f64::total_cmp);
            values.iter().sum()
        }
        MergeStrategy::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        MergeStrategy::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        MergeStrategy::Last => values.last().copied().unwrap_or(0.0),
    }
}

/// Map arbitrary events to observations.
///
/// `get_date` picks the event's day, `get_value` its intensity.
pub fn observations_from_events<T, D, F, G>(
    events: &[T],
    get_date: F,
    get_value: G,
) -> Vec<Observation>
where
    D: Into<DateInput>,
    F: Fn(&T) -> D,
    G: Fn(&T) -> f64,
{
    events.iter().map(|e| Observation::new(get_date(e), get_value(e))).collect()
}

/// Map events to observations counting one per event.
pub fn count_events<T, D, F>(events: &[T], get_date: F) -> Vec<Observation>
where
    D: Into<DateInput>,
    F: Fn(&T) -> D,
{
    observations_from_events(events, get_date, |_| 1.0)
}
