//! Core data types for the fxrate dashboard.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::error::Error;

/// Date format of the source table and of all rendered dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Three-letter month labels, indexed by `month - 1`.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Shift a date back by whole calendar years.
///
/// Feb 29 rolls forward to Mar 1 when the target year is not a leap year.
/// Returns `None` only if the result falls outside chrono's date range.
pub fn years_before(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    let year = date.year().checked_sub(i32::try_from(years).ok()?)?;
    date.with_year(year).or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// A single observation: one exchange rate on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Observation date (day precision).
    pub date: NaiveDate,
    /// Exchange rate. Always finite inside a [`Series`].
    pub value: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    /// Calendar year of the observation.
    #[inline]
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Calendar month of the observation (1..=12).
    #[inline]
    pub fn month(&self) -> u32 {
        self.date.month()
    }
}

/// Canonical date-sorted sequence of points.
///
/// Only constructible through [`Series::from_points`] (or `collect`), which
/// drops non-finite values and stable-sorts by date, so every `Series` is
/// non-decreasing by date. Ties keep their original relative order.
/// Derefs to `&[Point]`; there is no mutable access.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    points: Vec<Point>,
}

impl Series {
    /// Build a series from unordered points.
    pub fn from_points(mut points: Vec<Point>) -> Self {
        points.retain(|p| p.value.is_finite());
        points.sort_by_key(|p| p.date);
        Self { points }
    }

    /// An empty series.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Borrow the points.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Date of the first (earliest) point.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// Date of the last (latest) point.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Copy out the value column.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

}

impl Deref for Series {
    type Target = [Point];

    fn deref(&self) -> &[Point] {
        &self.points
    }
}

impl FromIterator<Point> for Series {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::from_points(iter.into_iter().collect())
    }
}

/// Symbolic relative time-window selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RangeToken {
    /// Whole history.
    #[default]
    #[serde(rename = "all")]
    All,
    /// Last calendar year.
    #[serde(rename = "1y")]
    OneYear,
    /// Last five calendar years.
    #[serde(rename = "5y")]
    FiveYear,
    /// Last ten calendar years.
    #[serde(rename = "10y")]
    TenYear,
}

impl RangeToken {
    /// All tokens, narrowest relative window first.
    pub const ALL_TOKENS: [RangeToken; 4] = [
        RangeToken::OneYear,
        RangeToken::FiveYear,
        RangeToken::TenYear,
        RangeToken::All,
    ];

    /// Number of calendar years covered, or `None` for the whole history.
    pub fn years(self) -> Option<u32> {
        match self {
            RangeToken::All => None,
            RangeToken::OneYear => Some(1),
            RangeToken::FiveYear => Some(5),
            RangeToken::TenYear => Some(10),
        }
    }

    /// Short textual form used by range selectors.
    pub fn as_str(self) -> &'static str {
        match self {
            RangeToken::All => "all",
            RangeToken::OneYear => "1y",
            RangeToken::FiveYear => "5y",
            RangeToken::TenYear => "10y",
        }
    }
}

impl fmt::Display for RangeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(RangeToken::All),
            "1y" => Ok(RangeToken::OneYear),
            "5y" => Ok(RangeToken::FiveYear),
            "10y" => Ok(RangeToken::TenYear),
            other => Err(Error::config(format!("unknown range token '{other}'"))),
        }
    }
}

/// Rolling window length, always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "f64", into = "usize")]
pub struct WindowSize(usize);

impl WindowSize {
    /// Clamp an integer window to at least 1.
    pub fn new(window: usize) -> Self {
        Self(window.max(1))
    }

    /// Coerce arbitrary numeric input: floor, then clamp to at least 1.
    ///
    /// NaN and negative input become 1; `+inf` saturates.
    pub fn from_raw(raw: f64) -> Self {
        // `as` saturates and maps NaN to 0.
        Self::new(raw.floor() as usize)
    }

    /// The window length.
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self(30)
    }
}

impl From<usize> for WindowSize {
    fn from(window: usize) -> Self {
        Self::new(window)
    }
}

impl From<f64> for WindowSize {
    fn from(raw: f64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<WindowSize> for usize {
    fn from(window: WindowSize) -> Self {
        window.0
    }
}

/// Mean value of one calendar month within a target year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Calendar month (1..=12).
    pub month: u32,
    /// Mean of the values observed in that month.
    pub mean_value: f64,
}

impl MonthBucket {
    /// Three-letter month label.
    pub fn label(&self) -> &'static str {
        MONTH_LABELS[(self.month.clamp(1, 12) - 1) as usize]
    }
}

/// Rolling standard deviation at one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityPoint {
    /// Observation date.
    pub date: NaiveDate,
    /// Rolling standard deviation ending at this date.
    pub volatility: f64,
}
