//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MATCH_ANALYTICS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use match_analytics::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Time window: {} days", config.engine.time_window_days);
//! ```

mod benchmarks;
mod engine;
mod error;
mod logging;

pub use benchmarks::BenchmarksConfig;
pub use engine::{EngineConfig, MAX_TIME_WINDOW_DAYS};
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable config.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Calculation window, trend settings and effectiveness options
    #[serde(default)]
    pub engine: EngineConfig,

    /// Benchmark override files
    #[serde(default)]
    pub benchmarks: BenchmarksConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MATCH_ANALYTICS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MATCH_ANALYTICS__ENGINE__TIME_WINDOW_DAYS=14` -> `engine.time_window_days = 14`
    /// - `MATCH_ANALYTICS__LOGGING__FORMAT=json` -> `logging.format = json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MATCH_ANALYTICS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a time window outside 1 to 36500
    /// days, a trend window outside 2 to 5, a negative or non-finite trend
    /// threshold, or a malformed log filter.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.engine.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::effectiveness::CoveragePolicy;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "MATCH_ANALYTICS__LOGGING__LEVEL",
        "MATCH_ANALYTICS__LOGGING__FORMAT",
        "MATCH_ANALYTICS__ENGINE__TIME_WINDOW_DAYS",
        "MATCH_ANALYTICS__ENGINE__TREND_WINDOW",
        "MATCH_ANALYTICS__ENGINE__TREND_THRESHOLD",
        "MATCH_ANALYTICS__ENGINE__COVERAGE_POLICY",
        "MATCH_ANALYTICS__ENGINE__APPLY_NOVELTY_WEIGHT",
        "MATCH_ANALYTICS__BENCHMARKS__EFFECTIVENESS_PATH",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.engine.time_window_days, 30);
        assert_eq!(config.engine.trend_window, 5);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.benchmarks.effectiveness_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_engine_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MATCH_ANALYTICS__ENGINE__TIME_WINDOW_DAYS", "14");
        env::set_var("MATCH_ANALYTICS__ENGINE__COVERAGE_POLICY", "legacy");
        env::set_var("MATCH_ANALYTICS__ENGINE__APPLY_NOVELTY_WEIGHT", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.engine.time_window_days, 14);
        assert_eq!(config.engine.coverage_policy, CoveragePolicy::Legacy);
        assert!(config.engine.apply_novelty_weight);
    }

    #[test]
    fn test_json_log_format() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MATCH_ANALYTICS__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().logging.format, LogFormat::Json);
    }

    #[test]
    fn test_validate_rejects_oversized_window() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MATCH_ANALYTICS__ENGINE__TIME_WINDOW_DAYS", "4294967295");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.engine.time_window_days, u32::MAX);
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTimeWindow)
        ));
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MATCH_ANALYTICS__ENGINE__TIME_WINDOW_DAYS", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTimeWindow)
        ));
    }

    #[test]
    fn test_benchmark_path_is_read() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var(
            "MATCH_ANALYTICS__BENCHMARKS__EFFECTIVENESS_PATH",
            "/etc/match-analytics/effectiveness.yaml",
        );
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.benchmarks.effectiveness_path.as_deref(),
            Some(std::path::Path::new("/etc/match-analytics/effectiveness.yaml"))
        );
    }
}
