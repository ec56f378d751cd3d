//! Chart descriptions handed to the renderer.
//!
//! Every builder is a pure function of its input; domains are `None` when
//! there is nothing to plot, so a renderer never sees a NaN axis.

use chrono::NaiveDate;
use fxrate_core::{config::DisplayConfig, MonthBucket, Point, VolatilityPoint};
use fxrate_features::SeriesSummary;
use ordered_float::OrderedFloat;
use serde::Serialize;

/// Placeholder shown instead of a statistic when there is no data.
pub const NO_DATA: &str = "—";

/// One `{x, y}` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint<X> {
    /// Horizontal position.
    pub x: X,
    /// Plotted value.
    pub y: f64,
}

/// A date-indexed line with its axis domains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    /// Points in date order.
    pub points: Vec<ChartPoint<NaiveDate>>,
    /// First and last date.
    pub x_domain: Option<(NaiveDate, NaiveDate)>,
    /// Lowest and highest y.
    pub y_domain: Option<(f64, f64)>,
}

impl LineChart {
    /// Whether the chart has nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One bar of the seasonality chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBar {
    /// Calendar month (1..=12).
    pub month: u32,
    /// Axis label, e.g. "Mar".
    pub label: &'static str,
    /// Mean value for the month.
    pub value: f64,
    /// Value formatted for the bar label.
    pub value_label: String,
}

/// Monthly bar chart for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    /// Year the bars describe.
    pub year: i32,
    /// Bars ascending by month; months without data are absent.
    pub bars: Vec<MonthBar>,
    /// Padded value domain.
    pub y_domain: Option<(f64, f64)>,
}

/// Summary statistics formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryPanel {
    /// Number of points.
    pub count: String,
    /// Mean value.
    pub mean: String,
    /// Median value.
    pub median: String,
    /// Population standard deviation.
    pub std_dev: String,
    /// First and last date, e.g. "2024-01-01 → 2024-06-30".
    pub period: String,
}

/// Lowest and highest of `values`, `None` if empty.
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .map(OrderedFloat)
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .map(|(lo, hi)| (lo.0, hi.0))
}

fn date_extent(points: &[ChartPoint<NaiveDate>]) -> Option<(NaiveDate, NaiveDate)> {
    // Points are date-sorted
    Some((points.first()?.x, points.last()?.x))
}

/// Trend line for the points of the active range.
pub fn trend_chart(points: &[Point]) -> LineChart {
    let points: Vec<ChartPoint<NaiveDate>> = points
        .iter()
        .map(|p| ChartPoint { x: p.date, y: p.value })
        .collect();

    LineChart {
        x_domain: date_extent(&points),
        y_domain: extent(points.iter().map(|p| p.y)),
        points,
    }
}

/// Volatility line; the y domain starts at zero.
pub fn volatility_chart(vols: &[VolatilityPoint]) -> LineChart {
    let points: Vec<ChartPoint<NaiveDate>> = vols
        .iter()
        .map(|v| ChartPoint { x: v.date, y: v.volatility })
        .collect();

    LineChart {
        x_domain: date_extent(&points),
        y_domain: extent(points.iter().map(|p| p.y)).map(|(_, hi)| (0.0, hi)),
        points,
    }
}

/// Seasonality bars for `year`.
pub fn seasonality_chart(
    year: i32,
    buckets: &[MonthBucket],
    display: &DisplayConfig,
) -> BarChart {
    let pad = display.seasonality_padding;
    let bars: Vec<MonthBar> = buckets
        .iter()
        .map(|b| MonthBar {
            month: b.month,
            label: b.label(),
            value: b.mean_value,
            value_label: format!("{:.*}", display.label_decimals, b.mean_value),
        })
        .collect();

    BarChart {
        year,
        y_domain: extent(bars.iter().map(|b| b.value)).map(|(lo, hi)| (lo - pad, hi + pad)),
        bars,
    }
}

/// Summary panel; every statistic reads [`NO_DATA`] when `summary` is `None`.
pub fn summary_panel(summary: Option<&SeriesSummary>, display: &DisplayConfig) -> SummaryPanel {
    let decimals = display.stat_decimals;
    match summary {
        Some(s) => SummaryPanel {
            count: s.count.to_string(),
            mean: format!("{:.*}", decimals, s.mean),
            median: format!("{:.*}", decimals, s.median),
            std_dev: format!("{:.*}", decimals, s.std_dev),
            period: s.period_label(),
        },
        None => SummaryPanel {
            count: "0".to_string(),
            mean: NO_DATA.to_string(),
            median: NO_DATA.to_string(),
            std_dev: NO_DATA.to_string(),
            period: NO_DATA.to_string(),
        },
    }
}
