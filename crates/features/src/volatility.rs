//! Rolling volatility computation.
//!
//! Computes the standard deviation of values over a trailing window, with an
//! expanding window until `window` observations have been seen.
//!
//! The estimator keeps a running sum and sum of squares, so each new value
//! costs O(1). The `sumSq/n - mean²` form loses precision when values are
//! large relative to their spread or the window is very long; exchange rates
//! (single-digit magnitudes) are well within range. Tiny negative variances
//! from cancellation are clamped to zero.

use std::collections::VecDeque;

use fxrate_core::{Point, VolatilityPoint, WindowSize};
use tracing::debug;

/// Rolling population standard deviation over the last `window` values.
#[derive(Debug, Clone)]
pub struct RollingStd {
    /// Window size in observations.
    window: usize,
    /// Values currently in the window.
    values: VecDeque<f64>,
    /// Running sum of values (for mean).
    sum: f64,
    /// Running sum of squared values (for variance).
    sum_sq: f64,
}

impl RollingStd {
    /// Create a new rolling standard deviation accumulator.
    pub fn new(window: WindowSize) -> Self {
        Self::with_capacity(window, 0)
    }

    /// Create an accumulator, reserving room for up to `expected` values.
    pub fn with_capacity(window: WindowSize, expected: usize) -> Self {
        let window = window.get();
        Self {
            window,
            values: VecDeque::with_capacity(window.min(expected)),
            sum: 0.0,
            sum_sq: 0.0,
        }
    }

    /// Add a value and return the standard deviation of the current window.
    pub fn push(&mut self, value: f64) -> f64 {
        // If window is full, remove oldest
        if self.values.len() >= self.window {
            if let Some(old) = self.values.pop_front() {
                self.sum -= old;
                self.sum_sq -= old * old;
            }
        }

        self.values.push_back(value);
        self.sum += value;
        self.sum_sq += value * value;

        self.std_dev().unwrap_or(0.0)
    }

    /// Standard deviation of the current window, `None` before the first value.
    pub fn std_dev(&self) -> Option<f64> {
        let n = self.values.len();
        if n == 0 {
            return None;
        }

        let n_f = n as f64;
        let mean = self.sum / n_f;
        let variance = (self.sum_sq / n_f) - (mean * mean);

        // Handle numerical issues
        if variance > 0.0 {
            Some(variance.sqrt())
        } else {
            Some(0.0)
        }
    }

    /// Get the number of observations in the window.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Get the window size.
    pub fn window(&self) -> usize {
        self.window
    }
}

/// Rolling standard deviation of `values`, one output per input.
///
/// Output `i` covers the `min(window, i + 1)` values ending at `i`.
pub fn rolling_std(values: &[f64], window: WindowSize) -> Vec<f64> {
    let mut acc = RollingStd::with_capacity(window, values.len());
    values.iter().map(|&v| acc.push(v)).collect()
}

/// Rolling standard deviation paired with the dates of `points`.
pub fn volatility_series(points: &[Point], window: WindowSize) -> Vec<VolatilityPoint> {
    let mut acc = RollingStd::with_capacity(window, points.len());
    let out: Vec<VolatilityPoint> = points
        .iter()
        .map(|p| VolatilityPoint {
            date: p.date,
            volatility: acc.push(p.value),
        })
        .collect();

    debug!(window = window.get(), points = out.len(), "volatility recomputed");
    out
}
