//! Configuration error types

use thiserror::Error;

use crate::domain::benchmark::BenchmarkError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Benchmark override rejected: {0}")]
    Benchmark(#[from] BenchmarkError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Time window must be between 1 and 36500 days")]
    InvalidTimeWindow,

    #[error("Trend window must cover 2 to 5 snapshots, got {0}")]
    InvalidTrendWindow(usize),

    #[error("Trend threshold must be finite and non-negative, got {0}")]
    InvalidTrendThreshold(f64),

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
