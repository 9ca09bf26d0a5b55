//! Engine configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::DEFAULT_TIME_WINDOW_DAYS;
use crate::domain::effectiveness::CoveragePolicy;
use crate::domain::reporting::{
    TrendAnalyzer, DEFAULT_TREND_THRESHOLD, DEFAULT_TREND_WINDOW, MAX_TREND_WINDOW,
};

/// Longest accepted evaluation window, in days.
pub const MAX_TIME_WINDOW_DAYS: u32 = 36_500;

/// Calculation and trend settings shared by both engines
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Evaluation window in days used by `calculate`
    #[serde(default = "default_time_window")]
    pub time_window_days: u32,

    /// Number of trailing snapshots fed to the trend fit
    #[serde(default = "default_trend_window")]
    pub trend_window: usize,

    /// Minimum absolute slope counted as a trend
    #[serde(default = "default_trend_threshold")]
    pub trend_threshold: f64,

    /// How the user-coverage denominator is chosen
    #[serde(default)]
    pub coverage_policy: CoveragePolicy,

    /// Whether the novelty category counts toward the overall score
    #[serde(default)]
    pub apply_novelty_weight: bool,
}

impl EngineConfig {
    /// Builds the trend analyzer these settings describe.
    pub fn trend_analyzer(&self) -> Result<TrendAnalyzer, ValidationError> {
        TrendAnalyzer::new(self.trend_window, self.trend_threshold).map_err(|_| {
            if !(2..=MAX_TREND_WINDOW).contains(&self.trend_window) {
                ValidationError::InvalidTrendWindow(self.trend_window)
            } else {
                ValidationError::InvalidTrendThreshold(self.trend_threshold)
            }
        })
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.time_window_days == 0 || self.time_window_days > MAX_TIME_WINDOW_DAYS {
            return Err(ValidationError::InvalidTimeWindow);
        }
        self.trend_analyzer().map(|_| ())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_window_days: default_time_window(),
            trend_window: default_trend_window(),
            trend_threshold: default_trend_threshold(),
            coverage_policy: CoveragePolicy::default(),
            apply_novelty_weight: false,
        }
    }
}

fn default_time_window() -> u32 {
    DEFAULT_TIME_WINDOW_DAYS
}

fn default_trend_window() -> usize {
    DEFAULT_TREND_WINDOW
}

fn default_trend_threshold() -> f64 {
    DEFAULT_TREND_THRESHOLD
}
