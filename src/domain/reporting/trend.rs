//! Trend detection over the trailing window of stored snapshots.

use serde::{Deserialize, Serialize};

use crate::domain::benchmark::{MetricFamily, MetricSource};
use crate::domain::foundation::ValidationError;

/// Most trailing snapshots a trend may read.
pub const MAX_TREND_WINDOW: usize = 5;

/// Default number of trailing snapshots considered.
pub const DEFAULT_TREND_WINDOW: usize = MAX_TREND_WINDOW;

/// Default absolute slope separating stable from moving.
pub const DEFAULT_TREND_THRESHOLD: f64 = 0.01;

/// Direction of a metric across recent snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStatus {
    Improving,
    Declining,
    Stable,
    /// Fewer than two snapshots were available.
    InsufficientData,
}

impl TrendStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TrendStatus::Improving => "improving",
            TrendStatus::Declining => "declining",
            TrendStatus::Stable => "stable",
            TrendStatus::InsufficientData => "insufficient data",
        }
    }
}

/// Trend of one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricTrend {
    pub family: MetricFamily,
    pub metric: String,
    pub status: TrendStatus,
    /// Least-squares slope per snapshot, absent with fewer than two points.
    pub slope: Option<f64>,
    /// Number of snapshots the slope was fitted to.
    pub points: usize,
    pub latest: Option<f64>,
}

/// Ordinary least-squares slope of `values` against their index.
///
/// `None` with fewer than two values.
pub fn ols_slope(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n_f;

    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        covariance += dx * (y - mean_y);
        variance += dx * dx;
    }
    Some(covariance / variance)
}

/// Fits a line through the most recent snapshots and classifies its slope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendAnalyzer {
    window: usize,
    threshold: f64,
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self {
            window: DEFAULT_TREND_WINDOW,
            threshold: DEFAULT_TREND_THRESHOLD,
        }
    }
}

impl TrendAnalyzer {
    /// Creates an analyzer.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if `window` is outside `2..=MAX_TREND_WINDOW` or
    ///   `threshold` is negative or not finite
    pub fn new(window: usize, threshold: f64) -> Result<Self, ValidationError> {
        if !(2..=MAX_TREND_WINDOW).contains(&window) {
            return Err(ValidationError::out_of_range(
                "trend_window",
                2.0,
                MAX_TREND_WINDOW as f64,
                window as f64,
            ));
        }
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ValidationError::out_of_range(
                "trend_threshold",
                0.0,
                f64::MAX,
                threshold,
            ));
        }
        Ok(Self { window, threshold })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Classifies a slope.
    pub fn classify(&self, slope: Option<f64>) -> TrendStatus {
        match slope {
            None => TrendStatus::InsufficientData,
            Some(s) if s > self.threshold => TrendStatus::Improving,
            Some(s) if s < -self.threshold => TrendStatus::Declining,
            Some(_) => TrendStatus::Stable,
        }
    }

    /// Trend of one metric over the trailing window of `history`.
    ///
    /// `history` is in append order, oldest first. Snapshots that do not
    /// carry the metric are skipped.
    pub fn analyze<S: MetricSource>(
        &self,
        history: &[S],
        family: MetricFamily,
        metric: &str,
    ) -> MetricTrend {
        let start = history.len().saturating_sub(self.window);
        let values: Vec<f64> = history[start..]
            .iter()
            .filter_map(|snapshot| snapshot.metric(family, metric))
            .collect();

        let slope = ols_slope(&values);
        MetricTrend {
            family,
            metric: metric.to_string(),
            status: self.classify(slope),
            slope,
            points: values.len(),
            latest: values.last().copied(),
        }
    }

    /// Trends for several metrics, in the order given.
    pub fn analyze_all<S: MetricSource>(
        &self,
        history: &[S],
        metrics: &[(MetricFamily, &str)],
    ) -> Vec<MetricTrend> {
        metrics
            .iter()
            .map(|(family, metric)| self.analyze(history, *family, metric))
            .collect()
    }
}

#[cfg(test)]
#[path = "trend_test.rs"]
mod trend_test;
