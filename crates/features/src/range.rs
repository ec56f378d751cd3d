//! Range filtering over a date-sorted series.
//!
//! All functions expect their input sorted by date (a [`Series`] always is)
//! and return a borrowed subslice in the same order.
//!
//! [`Series`]: fxrate_core::Series

use chrono::NaiveDate;
use fxrate_core::{years_before, Error, Point, RangeToken, Result};

/// First date included by `token` for a series ending at `last`.
///
/// `None` for [`RangeToken::All`].
pub fn cutoff_date(last: NaiveDate, token: RangeToken) -> Option<NaiveDate> {
    let years = token.years()?;
    // Out of chrono's range means nothing is excluded
    Some(years_before(last, years).unwrap_or(NaiveDate::MIN))
}

/// Points on or after `last_date - token`.
///
/// `All` passes the input through unchanged, even when empty. A relative
/// range has no anchor on an empty series and yields
/// [`Error::InsufficientData`].
pub fn filter_by_range(points: &[Point], token: RangeToken) -> Result<&[Point]> {
    let last = match points.last() {
        Some(last) => last.date,
        None if token == RangeToken::All => return Ok(points),
        None => {
            return Err(Error::insufficient_data(format!(
                "cannot apply range '{token}' to an empty series"
            )))
        }
    };

    match cutoff_date(last, token) {
        None => Ok(points),
        Some(cutoff) => {
            let start = points.partition_point(|p| p.date < cutoff);
            Ok(&points[start..])
        }
    }
}

/// Points within the inclusive bounds `[start, end]`; a missing bound is open.
///
/// Reversed bounds give an empty slice.
pub fn filter_between(
    points: &[Point],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> &[Point] {
    let lo = start.map_or(0, |s| points.partition_point(|p| p.date < s));
    let hi = end.map_or(points.len(), |e| points.partition_point(|p| p.date <= e));

    if lo >= hi {
        &[]
    } else {
        &points[lo..hi]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxrate_core::Series;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// One point on the first of every month from Jan 2005 to Jun 2024.
    fn monthly_series() -> Series {
        (2005..=2024)
            .flat_map(|y| (1..=12).map(move |m| (y, m)))
            .filter(|&(y, m)| y < 2024 || m <= 6)
            .map(|(y, m)| Point::new(d(y, m, 1), y as f64 + m as f64 / 100.0))
            .collect()
    }

    #[test]
    fn test_all_is_pass_through() {
        let series = monthly_series();
        let out = filter_by_range(&series, RangeToken::All).unwrap();
        assert_eq!(out.len(), series.len());
        assert_eq!(out.as_ptr(), series.as_ptr());
    }

    #[test]
    fn test_one_year_cutoff_inclusive() {
        let series = monthly_series();
        let out = filter_by_range(&series, RangeToken::OneYear).unwrap();

        // 2023-06-01 ..= 2024-06-01
        assert_eq!(out.first().unwrap().date, d(2023, 6, 1));
        assert_eq!(out.last().unwrap().date, d(2024, 6, 1));
        assert_eq!(out.len(), 13);
    }

    #[test]
    fn test_ranges_are_nested() {
        let series = monthly_series();
        let lens: Vec<usize> = RangeToken::ALL_TOKENS
            .iter()
            .map(|&t| filter_by_range(&series, t).unwrap().len())
            .collect();

        assert!(lens.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(lens[1], 61); // 2019-06 ..= 2024-06
        assert_eq!(lens[2], 121); // 2014-06 ..= 2024-06
    }

    #[test]
    fn test_short_history_keeps_everything() {
        let series: Series = vec![Point::new(d(2024, 1, 1), 1.0), Point::new(d(2024, 3, 1), 2.0)]
            .into_iter()
            .collect();
        for token in RangeToken::ALL_TOKENS {
            assert_eq!(filter_by_range(&series, token).unwrap().len(), 2);
        }
    }

    #[test]
    fn test_empty_series() {
        assert!(filter_by_range(&[], RangeToken::All).unwrap().is_empty());

        let err = filter_by_range(&[], RangeToken::FiveYear).unwrap_err();
        assert!(err.is_no_data());
    }

    #[test]
    fn test_leap_day_cutoff() {
        assert_eq!(
            cutoff_date(d(2024, 2, 29), RangeToken::OneYear),
            Some(d(2023, 3, 1))
        );
        assert_eq!(cutoff_date(d(2024, 2, 29), RangeToken::All), None);
    }

    #[test]
    fn test_leap_day_range_skips_feb_28() {
        let series: Series = vec![
            Point::new(d(2023, 2, 28), 1.0),
            Point::new(d(2023, 3, 1), 2.0),
            Point::new(d(2024, 2, 29), 3.0),
        ]
        .into_iter()
        .collect();

        let kept = filter_by_range(&series, RangeToken::OneYear).unwrap();
        let dates: Vec<_> = kept.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(2023, 3, 1), d(2024, 2, 29)]);
    }

    #[test]
    fn test_filter_between() {
        let series = monthly_series();

        let out = filter_between(&series, Some(d(2010, 1, 15)), Some(d(2010, 4, 1)));
        let dates: Vec<_> = out.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(2010, 2, 1), d(2010, 3, 1), d(2010, 4, 1)]);

        assert_eq!(filter_between(&series, None, None).len(), series.len());
        assert_eq!(filter_between(&series, None, Some(d(2005, 2, 1))).len(), 2);
        assert!(filter_between(&series, Some(d(2012, 1, 1)), Some(d(2011, 1, 1))).is_empty());
    }
}
