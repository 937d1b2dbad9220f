//! Calendar day keys and day arithmetic.
//!
//! A [`DayKey`] names one calendar day. It is built from the calendar
//! components of its input only: two timestamps on the same written date map
//! to the same key regardless of their UTC offsets.

use std::fmt;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, TimeZone, Weekday};

use crate::error::{Error, Result};

/// Canonical identifier for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Wrap a calendar date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a key from year, month (1-12) and day (1-31).
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The underlying date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// The day `n` days after this one (`n` may be negative).
    ///
    /// Saturates at chrono's supported date range.
    #[must_use]
    pub fn add_days(self, n: i64) -> Self {
        let days = Days::new(n.unsigned_abs());
        let shifted = if n >= 0 {
            self.0.checked_add_days(days).unwrap_or(NaiveDate::MAX)
        } else {
            self.0.checked_sub_days(days).unwrap_or(NaiveDate::MIN)
        };
        Self(shifted)
    }

    /// Weekday offset from `week_start`: 0 for `week_start` itself, up to 6.
    #[must_use]
    pub fn day_of_week(self, week_start: Weekday) -> u8 {
        let dow = self.0.weekday().num_days_from_sunday();
        let start = week_start.num_days_from_sunday();
        ((dow + 7 - start) % 7) as u8
    }

    /// First day of the week containing this day.
    #[must_use]
    pub fn week_start(self, week_start: Weekday) -> Self {
        self.add_days(-i64::from(self.day_of_week(week_start)))
    }

    /// Last day of the week containing this day.
    #[must_use]
    pub fn week_end(self, week_start: Weekday) -> Self {
        self.add_days(6 - i64::from(self.day_of_week(week_start)))
    }

    /// Calendar weekday.
    #[must_use]
    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// Day of month (1-31).
    #[must_use]
    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// Month (1-12).
    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Calendar year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Signed number of days from `a` to `b` (`b - a`).
#[must_use]
pub fn days_between(a: DayKey, b: DayKey) -> i64 {
    b.0.signed_duration_since(a.0).num_days()
}

/// Anything an observation may carry as its day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// `YYYY-MM-DD`, an RFC 3339 timestamp, or `YYYY-MM-DDTHH:MM:SS[.f]`.
    Text(String),
    /// A calendar date.
    Date(NaiveDate),
    /// A wall-clock date and time.
    DateTime(NaiveDateTime),
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<DayKey> for DateInput {
    fn from(key: DayKey) -> Self {
        Self::Date(key.0)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    /// Keeps the calendar date as seen in the value's own offset.
    fn from(dt: DateTime<Tz>) -> Self {
        Self::DateTime(dt.naive_local())
    }
}

impl fmt::Display for DateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{d}"),
            Self::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

/// Normalize a date input to its [`DayKey`].
///
/// Timestamps keep the date as written: `2025-06-01T23:30:00-05:00` is
/// 2025-06-01, not the following UTC day.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] (without an index) when a text input is
/// not a recognizable calendar date.
pub fn to_day_key(input: impl Into<DateInput>) -> Result<DayKey> {
    match input.into() {
        DateInput::Date(d) => Ok(DayKey(d)),
        DateInput::DateTime(dt) => Ok(DayKey(dt.date())),
        DateInput::Text(s) => parse_day(&s).ok_or(Error::InvalidDate { index: None, input: s }),
    }
}

fn parse_day(s: &str) -> Option<DayKey> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(DayKey(d));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(DayKey(dt.naive_local().date()));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| DayKey(dt.date()))
}

/// Weekday for a week-start index where 0 is Sunday.
#[must_use]
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Today's date on the local clock.
///
/// The only clock read in the crate; used when the caller does not inject
/// an anchor day.
#[must_use]
pub fn today_local() -> DayKey {
    DayKey(chrono::Local::now().date_naive())
}
