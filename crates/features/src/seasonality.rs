//! Monthly seasonality aggregation.
//!
//! Groups the points of one calendar year by month and averages each group.

use std::collections::{BTreeMap, BTreeSet};

use fxrate_core::{MonthBucket, Point};
use tracing::debug;

/// Accumulator for the values of one month.
#[derive(Debug, Clone, Default)]
struct MonthAccumulator {
    sum: f64,
    count: usize,
}

impl MonthAccumulator {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Mean value per calendar month of `year`, ascending by month.
///
/// Months with no observations in `year` are absent, not zero-filled.
pub fn aggregate_by_month(points: &[Point], year: i32) -> Vec<MonthBucket> {
    let mut months: BTreeMap<u32, MonthAccumulator> = BTreeMap::new();

    for point in points.iter().filter(|p| p.year() == year) {
        months.entry(point.month()).or_default().add(point.value);
    }

    debug!(year, months = months.len(), "seasonality aggregated");

    months
        .into_iter()
        .map(|(month, acc)| MonthBucket {
            month,
            mean_value: acc.mean(),
        })
        .collect()
}

/// Distinct calendar years present in `points`, ascending.
pub fn years_present(points: &[Point]) -> Vec<i32> {
    points
        .iter()
        .map(|p| p.year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
