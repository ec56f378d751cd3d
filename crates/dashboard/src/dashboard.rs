//! Dashboard pipeline.
//!
//! Combines the loaded series with the analytics and chart builders. The
//! dashboard never changes after construction; every view is recomputed
//! from the series and a [`DashboardState`].

use std::path::Path;

use fxrate_core::{Config, Point, Result, Series};
use fxrate_features::{
    aggregate_by_month, filter_by_range, summarize, volatility_series, SeriesSummary,
};
use fxrate_ingestion::{CsvSource, LoadReport};
use serde::Serialize;
use tracing::{debug, info};

use crate::render::{self, BarChart, LineChart, SummaryPanel};
use crate::state::DashboardState;

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// State the snapshot was built for.
    pub state: DashboardState,
    /// Formatted summary statistics.
    pub summary: SummaryPanel,
    /// Trend line for the active range.
    pub trend: LineChart,
    /// Rolling volatility over the whole history.
    pub volatility: LineChart,
    /// Monthly means, `None` when the series is empty.
    pub seasonality: Option<BarChart>,
    /// Rows dropped while loading.
    pub rows_dropped: usize,
}

impl DashboardSnapshot {
    /// Serialize to JSON for the renderer.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Loaded series plus configuration.
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Canonical series.
    series: Series,
    /// Ingestion counts.
    report: LoadReport,
    /// Configuration.
    config: Config,
    /// Summary of the full series, computed once.
    summary: Option<SeriesSummary>,
}

impl Dashboard {
    /// Create a dashboard over an already loaded series.
    pub fn new(series: Series, config: Config) -> Self {
        Self::with_report(series, LoadReport::default(), config)
    }

    /// Create a dashboard, keeping the ingestion report.
    pub fn with_report(series: Series, report: LoadReport, config: Config) -> Self {
        let summary = summarize(&series);
        Self {
            series,
            report,
            config,
            summary,
        }
    }

    /// Load the CSV at `path`, blocking.
    pub fn from_csv_path(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        config.validate()?;
        let (series, report) = CsvSource::new(config.source.clone()).load_path(path)?;
        info!(points = series.len(), dropped = report.dropped(), "dashboard loaded");
        Ok(Self::with_report(series, report, config))
    }

    /// Fetch the CSV at `path` once, without blocking the caller.
    pub async fn fetch(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        config.validate()?;
        let (series, report) = CsvSource::new(config.source.clone()).fetch(path).await?;
        info!(points = series.len(), dropped = report.dropped(), "dashboard fetched");
        Ok(Self::with_report(series, report, config))
    }

    /// The canonical series.
    pub fn series(&self) -> &Series {
        &self.series
    }

    /// Ingestion counts.
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// State the dashboard opens with.
    pub fn initial_state(&self) -> DashboardState {
        DashboardState::from_config(&self.config.view)
    }

    /// Summary of the full series, `None` if empty.
    pub fn summary(&self) -> Option<&SeriesSummary> {
        self.summary.as_ref()
    }

    /// Formatted summary panel.
    pub fn summary_panel(&self) -> SummaryPanel {
        render::summary_panel(self.summary(), &self.config.display)
    }

    /// Trend line for the state's range.
    pub fn trend(&self, state: &DashboardState) -> LineChart {
        let points: &[Point] = match filter_by_range(&self.series, state.range) {
            Ok(points) => points,
            // Only an empty series has no range anchor
            Err(err) => {
                debug!(range = %state.range, error = %err, "no trend data");
                &[]
            }
        };
        render::trend_chart(points)
    }

    /// Volatility line over the whole history for the state's window.
    pub fn volatility(&self, state: &DashboardState) -> LineChart {
        render::volatility_chart(&volatility_series(&self.series, state.window))
    }

    /// Year the seasonality chart shows: the pinned year, else the latest one.
    pub fn seasonality_year(&self, state: &DashboardState) -> Option<i32> {
        state
            .seasonality_year
            .or_else(|| self.series.last().map(|p| p.year()))
    }

    /// Seasonality bars, `None` when no year can be chosen.
    pub fn seasonality(&self, state: &DashboardState) -> Option<BarChart> {
        let year = self.seasonality_year(state)?;
        let buckets = aggregate_by_month(&self.series, year);
        Some(render::seasonality_chart(year, &buckets, &self.config.display))
    }

    /// Build every view for `state`.
    pub fn snapshot(&self, state: &DashboardState) -> DashboardSnapshot {
        DashboardSnapshot {
            state: *state,
            summary: self.summary_panel(),
            trend: self.trend(state),
            volatility: self.volatility(state),
            seasonality: self.seasonality(state),
            rows_dropped: self.report.dropped(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fxrate_core::RangeToken;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn make_dashboard() -> Dashboard {
        let series: Series = vec![
            Point::new(d(2015, 6, 1), 1.10),
            Point::new(d(2022, 6, 1), 1.05),
            Point::new(d(2024, 1, 10), 1.08),
            Point::new(d(2024, 1, 20), 1.10),
            Point::new(d(2024, 3, 1), 1.12),
            Point::new(d(2024, 6, 1), 1.07),
        ]
        .into_iter()
        .collect();
        Dashboard::new(series, Config::default())
    }

    #[test]
    fn test_trend_follows_range() {
        let dashboard = make_dashboard();
        let state = dashboard.initial_state();

        assert_eq!(dashboard.trend(&state).points.len(), 6);
        assert_eq!(dashboard.trend(&state.select_range(RangeToken::OneYear)).points.len(), 4);
        assert_eq!(dashboard.trend(&state.select_range(RangeToken::FiveYear)).points.len(), 5);
    }

    #[test]
    fn test_volatility_covers_full_history() {
        let dashboard = make_dashboard();
        let state = dashboard.initial_state().select_range(RangeToken::OneYear).apply_window(3.0);
        let chart = dashboard.volatility(&state);

        assert_eq!(chart.points.len(), 6);
        assert_eq!(chart.points[0].y, 0.0);
        assert_eq!(chart.y_domain.unwrap().0, 0.0);
    }

    #[test]
    fn test_seasonality_defaults_to_latest_year() {
        let dashboard = make_dashboard();
        let state = dashboard.initial_state();
        assert_eq!(dashboard.seasonality_year(&state), Some(2024));

        let chart = dashboard.seasonality(&state).unwrap();
        let months: Vec<u32> = chart.bars.iter().map(|b| b.month).collect();
        assert_eq!(months, vec![1, 3, 6]);
        assert_eq!(chart.bars[0].value_label, "1.09");

        let pinned = dashboard.seasonality(&state.select_year(Some(2015))).unwrap();
        assert_eq!(pinned.bars.len(), 1);
    }

    #[test]
    fn test_empty_dashboard() {
        let dashboard = Dashboard::new(Series::empty(), Config::default());
        let state = dashboard.initial_state().select_range(RangeToken::TenYear);
        let snapshot = dashboard.snapshot(&state);

        assert!(dashboard.summary().is_none());
        assert!(snapshot.trend.is_empty());
        assert!(snapshot.volatility.is_empty());
        assert!(snapshot.seasonality.is_none());
        assert_eq!(snapshot.summary.mean, crate::render::NO_DATA);
    }

    #[test]
    fn test_snapshot_json() {
        let dashboard = make_dashboard();
        let json = dashboard.snapshot(&dashboard.initial_state()).to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["state"]["range"], "all");
        assert_eq!(value["state"]["window"], 30);
        assert_eq!(value["trend"]["points"][0]["x"], "2015-06-01");
        assert_eq!(value["summary"]["count"], "6");
    }
}
