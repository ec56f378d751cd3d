//! Series construction from raw rows.
//!
//! Parses `(date, rate)` string pairs into points, silently drops rows that
//! fail to parse, and stable-sorts the rest by date.

use chrono::NaiveDate;
use fxrate_core::{config::SourceConfig, Point, Series, DATE_FORMAT};
use tracing::{debug, trace, warn};

/// One unparsed row of the source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Date field, expected as `YYYY-MM-DD`.
    pub date: String,
    /// Rate field, expected to parse as a float.
    pub rate: String,
}

impl RawRow {
    /// Create a new raw row.
    pub fn new(date: impl Into<String>, rate: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            rate: rate.into(),
        }
    }
}

impl<D: Into<String>, R: Into<String>> From<(D, R)> for RawRow {
    fn from((date, rate): (D, R)) -> Self {
        Self::new(date, rate)
    }
}

/// Why a row was left out of the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRejection {
    /// Date field did not match the date format.
    BadDate,
    /// Rate field was not a finite number.
    BadValue,
}

/// Counts of what happened during a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Rows offered to the loader.
    pub rows_read: usize,
    /// Rows kept in the series.
    pub rows_kept: usize,
    /// Rows dropped for an unparseable date.
    pub bad_date: usize,
    /// Rows dropped for a missing or non-finite rate.
    pub bad_value: usize,
    /// Records the CSV reader could not decode at all.
    pub malformed_records: usize,
}

impl LoadReport {
    /// Total number of rows that did not make it into the series.
    pub fn dropped(&self) -> usize {
        self.bad_date + self.bad_value + self.malformed_records
    }

    fn record(&mut self, outcome: Result<(), RowRejection>) {
        self.rows_read += 1;
        match outcome {
            Ok(()) => self.rows_kept += 1,
            Err(RowRejection::BadDate) => self.bad_date += 1,
            Err(RowRejection::BadValue) => self.bad_value += 1,
        }
    }
}

/// Builds the canonical [`Series`] from raw rows.
#[derive(Debug, Clone)]
pub struct SeriesLoader {
    /// chrono format for the date field.
    date_format: String,
}

impl SeriesLoader {
    /// Create a loader using the `YYYY-MM-DD` date format.
    pub fn new() -> Self {
        Self {
            date_format: DATE_FORMAT.to_string(),
        }
    }

    /// Create a loader with a custom date format.
    pub fn with_date_format(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
        }
    }

    /// Create a loader from source configuration.
    pub fn from_config(config: &SourceConfig) -> Self {
        Self::with_date_format(config.date_format.clone())
    }

    /// Parse a single row.
    ///
    /// The date is checked first, so a row bad in both fields counts as a bad date.
    pub fn parse_row(&self, row: &RawRow) -> Result<Point, RowRejection> {
        let date = NaiveDate::parse_from_str(row.date.trim(), &self.date_format)
            .map_err(|_| RowRejection::BadDate)?;

        let value = row
            .rate
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or(RowRejection::BadValue)?;

        Ok(Point::new(date, value))
    }

    /// Load rows into a series, discarding rows that fail to parse.
    pub fn load<I, R>(&self, rows: I) -> Series
    where
        I: IntoIterator<Item = R>,
        R: Into<RawRow>,
    {
        self.load_with_report(rows).0
    }

    /// Load rows into a series and report how many were dropped and why.
    pub fn load_with_report<I, R>(&self, rows: I) -> (Series, LoadReport)
    where
        I: IntoIterator<Item = R>,
        R: Into<RawRow>,
    {
        let mut report = LoadReport::default();
        let mut points = Vec::new();

        for (idx, row) in rows.into_iter().enumerate() {
            let row = row.into();
            match self.parse_row(&row) {
                Ok(point) => {
                    points.push(point);
                    report.record(Ok(()));
                }
                Err(reason) => {
                    trace!(row = idx, date = %row.date, rate = %row.rate, ?reason, "dropping row");
                    report.record(Err(reason));
                }
            }
        }

        // Stable sort: rows sharing a date keep their input order
        let series = Series::from_points(points);

        if report.rows_read > 0 && report.rows_kept == 0 {
            warn!(rows_read = report.rows_read, "every row was dropped, series is empty");
        }
        debug!(
            rows_read = report.rows_read,
            rows_kept = report.rows_kept,
            bad_date = report.bad_date,
            bad_value = report.bad_value,
            "series loaded"
        );

        (series, report)
    }
}

impl Default for SeriesLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_drops_bad_rate() {
        let loader = SeriesLoader::new();
        let series = loader.load([
            ("2024-01-01", "1.0"),
            ("2024-01-02", "bad"),
            ("2024-01-03", "3.0"),
        ]);

        assert_eq!(
            series.points(),
            &[Point::new(d(2024, 1, 1), 1.0), Point::new(d(2024, 1, 3), 3.0)]
        );
    }

    #[test]
    fn test_drops_bad_dates() {
        let loader = SeriesLoader::new();
        let (series, report) = loader.load_with_report([
            ("2024-13-01", "1.0"),
            ("2024-02-30", "1.0"),
            ("01/02/2024", "1.0"),
            ("", "1.0"),
            ("2024-01-05T00:00", "1.0"),
            ("2024-01-06", "2.0"),
        ]);

        assert_eq!(series.len(), 1);
        assert_eq!(report.bad_date, 5);
        assert_eq!(report.rows_kept, 1);
        assert_eq!(report.dropped(), 5);
    }

    #[test]
    fn test_drops_non_finite_and_empty_values() {
        let loader = SeriesLoader::new();
        let (series, report) = loader.load_with_report([
            ("2024-01-01", "NaN"),
            ("2024-01-02", "inf"),
            ("2024-01-03", "-infinity"),
            ("2024-01-04", ""),
            ("2024-01-05", "  4.25 "),
        ]);

        assert_eq!(series.values(), vec![4.25]);
        assert_eq!(report.bad_value, 4);
    }

    #[test]
    fn test_sorts_by_date_stably() {
        let loader = SeriesLoader::new();
        let series = loader.load([
            ("2024-03-01", "3.0"),
            ("2024-01-01", "1.0"),
            ("2024-02-01", "2.0"),
            ("2024-01-01", "1.5"),
        ]);

        let dates: Vec<_> = series.iter().map(|p| p.date).collect();
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(series.values(), vec![1.0, 1.5, 2.0, 3.0]);
    }

    #[test]
    fn test_every_valid_row_present_once() {
        let rows: Vec<RawRow> = (1..=28)
            .map(|day| {
                let rate = if day % 3 == 0 { "x".to_string() } else { format!("{day}.0") };
                RawRow::new(format!("2023-02-{day:02}"), rate)
            })
            .rev()
            .collect();

        let series = SeriesLoader::new().load(rows);

        let expected: Vec<f64> = (1..=28).filter(|d| d % 3 != 0).map(|d| d as f64).collect();
        assert_eq!(series.values(), expected);
    }

    #[test]
    fn test_empty_input() {
        let (series, report) = SeriesLoader::new().load_with_report(Vec::<RawRow>::new());
        assert!(series.is_empty());
        assert_eq!(report, LoadReport::default());
    }

    #[test]
    fn test_custom_date_format() {
        let loader = SeriesLoader::with_date_format("%d/%m/%Y");
        let point = loader.parse_row(&RawRow::new("03/01/2024", "1.1")).unwrap();
        assert_eq!(point.date, d(2024, 1, 3));
    }

    #[test]
    fn test_bad_date_wins_over_bad_value() {
        let loader = SeriesLoader::new();
        assert_eq!(
            loader.parse_row(&RawRow::new("nope", "nope")),
            Err(RowRejection::BadDate)
        );
    }
}
