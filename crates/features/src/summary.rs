//! Descriptive statistics over a series.

use chrono::NaiveDate;
use fxrate_core::{Point, DATE_FORMAT};
use ordered_float::OrderedFloat;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Summary of a non-empty series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    /// Number of points.
    pub count: usize,
    /// Arithmetic mean of the values.
    pub mean: f64,
    /// Median of the values (mean of the middle pair for even counts).
    pub median: f64,
    /// Population standard deviation of the values.
    pub std_dev: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Date of the first point.
    pub period_start: NaiveDate,
    /// Date of the last point.
    pub period_end: NaiveDate,
}

impl SeriesSummary {
    /// Period as `YYYY-MM-DD → YYYY-MM-DD`.
    pub fn period_label(&self) -> String {
        format!(
            "{} → {}",
            self.period_start.format(DATE_FORMAT),
            self.period_end.format(DATE_FORMAT)
        )
    }
}

/// Summarize a date-sorted slice of points.
///
/// Returns `None` for an empty slice: there is no mean, median or deviation
/// of nothing, and callers must not render one.
pub fn summarize(points: &[Point]) -> Option<SeriesSummary> {
    let first = points.first()?;
    let last = points.last()?;

    let mean = points.iter().map(|p| p.value).mean();
    let std_dev = points.iter().map(|p| p.value).population_std_dev();

    let mut sorted: Vec<OrderedFloat<f64>> =
        points.iter().map(|p| OrderedFloat(p.value)).collect();
    sorted.sort_unstable();

    let n = sorted.len();
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1].0 + sorted[n / 2].0) / 2.0
    } else {
        sorted[n / 2].0
    };

    Some(SeriesSummary {
        count: n,
        mean,
        median,
        std_dev,
        min: sorted[0].0,
        max: sorted[n - 1].0,
        period_start: first.date,
        period_end: last.date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fxrate_ingestion::SeriesLoader;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_empty_is_none() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn test_loaded_scenario() {
        let series = SeriesLoader::new().load([
            ("2024-01-01", "1.0"),
            ("2024-01-02", "bad"),
            ("2024-01-03", "3.0"),
        ]);

        let summary = summarize(&series).unwrap();

        assert_eq!(summary.count, 2);
        assert_relative_eq!(summary.mean, 2.0);
        assert_relative_eq!(summary.median, 2.0);
        assert_relative_eq!(summary.std_dev, 1.0);
        assert_eq!(summary.period_start, d(2024, 1, 1));
        assert_eq!(summary.period_end, d(2024, 1, 3));
        assert_eq!(summary.period_label(), "2024-01-01 → 2024-01-03");
    }

    #[test]
    fn test_single_point() {
        let summary = summarize(&[Point::new(d(2020, 5, 5), 4.2)]).unwrap();
        assert_eq!(summary.count, 1);
        assert_relative_eq!(summary.mean, 4.2);
        assert_relative_eq!(summary.median, 4.2);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.period_start, summary.period_end);
    }

    #[test]
    fn test_odd_median_ignores_date_order() {
        let points = [
            Point::new(d(2024, 1, 1), 9.0),
            Point::new(d(2024, 1, 2), 1.0),
            Point::new(d(2024, 1, 3), 5.0),
        ];
        let summary = summarize(&points).unwrap();
        assert_relative_eq!(summary.median, 5.0);
        assert_relative_eq!(summary.min, 1.0);
        assert_relative_eq!(summary.max, 9.0);
    }

    #[test]
    fn test_population_std_dev() {
        // Values 2, 4, 4, 4, 5, 5, 7, 9: population std = 2, sample std ~ 2.138
        let points: Vec<Point> = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
            .iter()
            .enumerate()
            .map(|(i, &v)| Point::new(d(2024, 1, 1 + i as u32), v))
            .collect();
        let summary = summarize(&points).unwrap();
        assert_relative_eq!(summary.mean, 5.0);
        assert_relative_eq!(summary.median, 4.5);
        assert_relative_eq!(summary.std_dev, 2.0, epsilon = 1e-12);
    }
}
