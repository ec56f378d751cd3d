//! View state driven by the dashboard controls.
//!
//! Each control returns a new state; the renderer decides what to redraw.

use fxrate_core::{config::ViewConfig, RangeToken, WindowSize};
use serde::{Deserialize, Serialize};

/// Current selections of the range picker, window input and year picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardState {
    /// Active trend range.
    pub range: RangeToken,
    /// Rolling volatility window.
    pub window: WindowSize,
    /// Seasonality year (None = year of the latest point).
    pub seasonality_year: Option<i32>,
}

impl DashboardState {
    /// Initial state from view configuration.
    pub fn from_config(view: &ViewConfig) -> Self {
        Self {
            range: view.initial_range,
            window: view.rolling_window,
            seasonality_year: view.seasonality_year,
        }
    }

    /// Switch the trend range.
    #[must_use]
    pub fn select_range(self, range: RangeToken) -> Self {
        Self { range, ..self }
    }

    /// Reset the trend to the whole history.
    #[must_use]
    pub fn reset(self) -> Self {
        self.select_range(RangeToken::All)
    }

    /// Apply a raw window input (floored, at least 1).
    #[must_use]
    pub fn apply_window(self, raw: f64) -> Self {
        Self {
            window: WindowSize::from_raw(raw),
            ..self
        }
    }

    /// Pin the seasonality chart to a year, or `None` for the latest year.
    #[must_use]
    pub fn select_year(self, year: Option<i32>) -> Self {
        Self {
            seasonality_year: year,
            ..self
        }
    }
}
