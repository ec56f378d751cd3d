//! Render descriptions for the fxrate dashboard.
//!
//! This crate provides:
//! - Pure chart builders (trend line, volatility line, seasonality bars)
//! - The formatted summary panel
//! - Immutable view state (range, window, seasonality year)
//! - A `Dashboard` tying a loaded series to the builders
//!
//! Nothing here draws; the output is data for an external renderer.

pub mod render;
pub mod state;
pub mod dashboard;

pub use render::{BarChart, ChartPoint, LineChart, MonthBar, SummaryPanel};
pub use state::DashboardState;
pub use dashboard::{Dashboard, DashboardSnapshot};
