//! Data ingestion and normalization for the fxrate dashboard.
//!
//! This crate handles:
//! - Row parsing and validation (date + rate)
//! - Best-effort filtering of malformed rows
//! - Stable date ordering of the canonical series
//! - CSV reading, blocking or as a one-shot async fetch

pub mod loader;
pub mod csv_source;

pub use loader::{LoadReport, RawRow, RowRejection, SeriesLoader};
pub use csv_source::CsvSource;
