//! PyO3 bindings for the fxrate dashboard pipeline.
//!
//! Exposes the Rust pipeline to a Python-hosted renderer:
//! - Series loading (rows or CSV)
//! - Summary statistics
//! - Rolling volatility
//! - Range filtering and monthly seasonality
//! - Dashboard snapshots as JSON

use chrono::NaiveDate;
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use fxrate_core::{
    Config as RustConfig,
    Error as RustError,
    MonthBucket as RustMonthBucket,
    Point as RustPoint,
    RangeToken,
    Series as RustSeries,
    WindowSize,
    DATE_FORMAT,
};
use fxrate_dashboard::{Dashboard as RustDashboard, DashboardState};
use fxrate_features::{
    aggregate_by_month, filter_between, filter_by_range, rolling_std as rust_rolling_std,
    summarize, SeriesSummary as RustSeriesSummary,
};
use fxrate_ingestion::{CsvSource, SeriesLoader};

// ============================================================================
// Error Conversion
// ============================================================================

fn to_py_err(err: RustError) -> PyErr {
    match err {
        RustError::Io(_) | RustError::Csv(_) => PyIOError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

fn parse_date(s: &str) -> PyResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| PyValueError::new_err(format!("invalid date '{s}': {e}")))
}

fn parse_range(token: &str) -> PyResult<RangeToken> {
    token.parse().map_err(to_py_err)
}

// ============================================================================
// Python-exposed Types
// ============================================================================

/// A single observation.
#[pyclass]
#[derive(Clone)]
pub struct Point {
    #[pyo3(get)]
    pub date: String,
    #[pyo3(get)]
    pub value: f64,
}

#[pymethods]
impl Point {
    fn __repr__(&self) -> String {
        format!("Point(date={}, value={})", self.date, self.value)
    }
}

impl From<&RustPoint> for Point {
    fn from(p: &RustPoint) -> Self {
        Point {
            date: p.date.format(DATE_FORMAT).to_string(),
            value: p.value,
        }
    }
}

/// Summary statistics of a non-empty series.
#[pyclass]
#[derive(Clone)]
pub struct SeriesSummary {
    #[pyo3(get)]
    pub count: usize,
    #[pyo3(get)]
    pub mean: f64,
    #[pyo3(get)]
    pub median: f64,
    #[pyo3(get)]
    pub std_dev: f64,
    #[pyo3(get)]
    pub min: f64,
    #[pyo3(get)]
    pub max: f64,
    #[pyo3(get)]
    pub period: String,
}

#[pymethods]
impl SeriesSummary {
    fn __repr__(&self) -> String {
        format!(
            "SeriesSummary(count={}, mean={:.4}, median={:.4}, std_dev={:.4}, period={})",
            self.count, self.mean, self.median, self.std_dev, self.period
        )
    }
}

impl From<RustSeriesSummary> for SeriesSummary {
    fn from(s: RustSeriesSummary) -> Self {
        SeriesSummary {
            count: s.count,
            mean: s.mean,
            median: s.median,
            std_dev: s.std_dev,
            min: s.min,
            max: s.max,
            period: s.period_label(),
        }
    }
}

/// Mean value of one month.
#[pyclass]
#[derive(Clone)]
pub struct MonthBucket {
    #[pyo3(get)]
    pub month: u32,
    #[pyo3(get)]
    pub mean_value: f64,
}

#[pymethods]
impl MonthBucket {
    #[getter]
    fn label(&self) -> &'static str {
        RustMonthBucket {
            month: self.month,
            mean_value: self.mean_value,
        }
        .label()
    }

    fn __repr__(&self) -> String {
        format!("MonthBucket(month={}, mean_value={:.4})", self.month, self.mean_value)
    }
}

impl From<RustMonthBucket> for MonthBucket {
    fn from(b: RustMonthBucket) -> Self {
        MonthBucket {
            month: b.month,
            mean_value: b.mean_value,
        }
    }
}

// ============================================================================
// Series
// ============================================================================

/// Date-sorted exchange-rate series.
#[pyclass(name = "Series")]
#[derive(Clone)]
pub struct PySeries {
    inner: RustSeries,
}

#[pymethods]
impl PySeries {
    /// Build a series from `(date, rate)` string pairs, dropping bad rows.
    #[staticmethod]
    fn from_rows(rows: Vec<(String, String)>) -> Self {
        PySeries {
            inner: SeriesLoader::new().load(rows),
        }
    }

    /// Load a headed CSV with `date` and `rate` columns.
    #[staticmethod]
    fn from_csv(path: &str) -> PyResult<Self> {
        let (series, _) = CsvSource::default().load_path(path).map_err(to_py_err)?;
        Ok(PySeries { inner: series })
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn points(&self) -> Vec<Point> {
        self.inner.iter().map(Point::from).collect()
    }

    fn dates(&self) -> Vec<String> {
        self.inner
            .iter()
            .map(|p| p.date.format(DATE_FORMAT).to_string())
            .collect()
    }

    fn values(&self) -> Vec<f64> {
        self.inner.values()
    }

    /// Summary statistics, or None for an empty series.
    fn summarize(&self) -> Option<SeriesSummary> {
        summarize(&self.inner).map(SeriesSummary::from)
    }

    /// Points within a named range: "all", "1y", "5y" or "10y".
    fn filter_by_range(&self, token: &str) -> PyResult<PySeries> {
        let points = filter_by_range(&self.inner, parse_range(token)?).map_err(to_py_err)?;
        Ok(PySeries {
            inner: points.iter().copied().collect(),
        })
    }

    /// Points within inclusive `YYYY-MM-DD` bounds; None leaves a side open.
    #[pyo3(signature = (start=None, end=None))]
    fn filter_between(&self, start: Option<&str>, end: Option<&str>) -> PyResult<PySeries> {
        let start = start.map(parse_date).transpose()?;
        let end = end.map(parse_date).transpose()?;
        Ok(PySeries {
            inner: filter_between(&self.inner, start, end).iter().copied().collect(),
        })
    }

    /// Rolling standard deviation of the values.
    fn rolling_std(&self, window: f64) -> Vec<f64> {
        rust_rolling_std(&self.inner.values(), WindowSize::from_raw(window))
    }

    /// Mean value per month of `year`.
    fn aggregate_by_month(&self, year: i32) -> Vec<MonthBucket> {
        aggregate_by_month(&self.inner, year)
            .into_iter()
            .map(MonthBucket::from)
            .collect()
    }
}

// ============================================================================
// Dashboard
// ============================================================================

/// Dashboard over a CSV file, holding the current control state.
#[pyclass(name = "Dashboard")]
pub struct PyDashboard {
    inner: RustDashboard,
    state: DashboardState,
}

#[pymethods]
impl PyDashboard {
    #[new]
    #[pyo3(signature = (path, config_json=None))]
    fn new(path: &str, config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => RustConfig::from_json_str(json).map_err(to_py_err)?,
            None => RustConfig::default(),
        };
        let inner = RustDashboard::from_csv_path(path, config).map_err(to_py_err)?;
        let state = inner.initial_state();
        Ok(PyDashboard { inner, state })
    }

    /// Active range token.
    #[getter]
    fn range(&self) -> &'static str {
        self.state.range.as_str()
    }

    /// Active rolling window.
    #[getter]
    fn window(&self) -> usize {
        self.state.window.get()
    }

    fn select_range(&mut self, token: &str) -> PyResult<()> {
        self.state = self.state.select_range(parse_range(token)?);
        Ok(())
    }

    fn reset(&mut self) {
        self.state = self.state.reset();
    }

    fn apply_window(&mut self, window: f64) {
        self.state = self.state.apply_window(window);
    }

    #[pyo3(signature = (year=None))]
    fn select_year(&mut self, year: Option<i32>) {
        self.state = self.state.select_year(year);
    }

    /// Number of rows dropped while loading.
    fn rows_dropped(&self) -> usize {
        self.inner.load_report().dropped()
    }

    /// All chart descriptions for the current state, as JSON.
    fn snapshot_json(&self) -> PyResult<String> {
        self.inner.snapshot(&self.state).to_json().map_err(to_py_err)
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Rolling standard deviation of `values`; `window` is floored and clamped to 1.
#[pyfunction]
fn rolling_std(values: Vec<f64>, window: f64) -> Vec<f64> {
    rust_rolling_std(&values, WindowSize::from_raw(window))
}

/// Route Rust tracing output to stderr, filtered like `RUST_LOG` (default "info").
#[pyfunction]
#[pyo3(signature = (filter=None))]
fn init_logging(filter: Option<&str>) -> PyResult<()> {
    let filter = match filter {
        Some(f) => tracing_subscriber::EnvFilter::try_new(f)
            .map_err(|e| PyValueError::new_err(e.to_string()))?,
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };

    // A second call keeps the first subscriber
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

// ============================================================================
// Module Definition
// ============================================================================

/// fxrate - exchange-rate dashboard pipeline for Python.
#[pymodule]
fn fxrate(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Types
    m.add_class::<Point>()?;
    m.add_class::<SeriesSummary>()?;
    m.add_class::<MonthBucket>()?;

    // Pipeline classes
    m.add_class::<PySeries>()?;
    m.add_class::<PyDashboard>()?;

    // Functions
    m.add_function(wrap_pyfunction!(rolling_std, m)?)?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;

    Ok(())
}
