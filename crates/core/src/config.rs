//! Configuration structures for the fxrate dashboard.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{RangeToken, WindowSize, DATE_FORMAT};

/// Main configuration for the dashboard pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tabular source configuration.
    pub source: SourceConfig,
    /// Initial view configuration.
    pub view: ViewConfig,
    /// Display formatting configuration.
    pub display: DisplayConfig,
}

impl Config {
    /// Parse a configuration from JSON. Missing sections fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.source.date_column.trim().is_empty() {
            return Err(Error::config("source.date_column must not be empty"));
        }
        if self.source.value_column.trim().is_empty() {
            return Err(Error::config("source.value_column must not be empty"));
        }
        if self.source.date_column.eq_ignore_ascii_case(&self.source.value_column) {
            return Err(Error::config(
                "source.date_column and source.value_column must differ",
            ));
        }
        if self.source.date_format.is_empty() {
            return Err(Error::config("source.date_format must not be empty"));
        }
        let padding = self.display.seasonality_padding;
        if !padding.is_finite() || padding < 0.0 {
            return Err(Error::config(
                "display.seasonality_padding must be a non-negative number",
            ));
        }
        Ok(())
    }
}

/// Tabular source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Header of the date column.
    pub date_column: String,
    /// Header of the rate column.
    pub value_column: String,
    /// chrono format string for the date column.
    pub date_format: String,
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            date_column: "date".to_string(),
            value_column: "rate".to_string(),
            date_format: DATE_FORMAT.to_string(),
            delimiter: b',',
        }
    }
}

/// Initial view state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Range shown when the dashboard opens and after a reset.
    pub initial_range: RangeToken,
    /// Rolling volatility window (observations).
    pub rolling_window: WindowSize,
    /// Year for the seasonality chart (None = year of the latest point).
    pub seasonality_year: Option<i32>,
}

/// Display formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimals for the summary statistics.
    pub stat_decimals: usize,
    /// Decimals for the seasonality bar labels.
    pub label_decimals: usize,
    /// Padding added below/above the seasonality y domain.
    pub seasonality_padding: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            stat_decimals: 4,
            label_decimals: 2,
            seasonality_padding: 0.5,
        }
    }
}
