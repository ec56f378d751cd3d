//! Series analytics for the fxrate dashboard.
//!
//! This crate handles:
//! - Summary statistics (count, mean, median, std-dev, period)
//! - Rolling volatility (trailing-window standard deviation)
//! - Range filtering (relative ranges and explicit bounds)
//! - Monthly seasonality aggregation
//!
//! Standard deviations use the population convention (denominator `n`)
//! everywhere, so the summary and the rolling estimator agree on a full window.

pub mod summary;
pub mod volatility;
pub mod range;
pub mod seasonality;

pub use summary::{summarize, SeriesSummary};
pub use volatility::{rolling_std, volatility_series, RollingStd};
pub use range::{cutoff_date, filter_between, filter_by_range};
pub use seasonality::{aggregate_by_month, years_present};
