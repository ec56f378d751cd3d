//! Core types and configuration for the fxrate dashboard.
//!
//! This crate provides shared types used across all other crates:
//! - Series data types (points, range tokens, month buckets)
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
