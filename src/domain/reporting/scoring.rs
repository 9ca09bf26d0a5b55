//! Category scoring of a snapshot against benchmark targets.

use serde::{Deserialize, Serialize};

use crate::domain::benchmark::{BenchmarkTable, MetricFamily, MetricSource};

/// One metric compared with its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricEvaluation {
    pub metric: String,
    pub actual: f64,
    pub target: f64,
    /// `min(actual / target, 1)`.
    pub ratio: f64,
    pub meets_target: bool,
}

/// A metric family scored against its benchmark targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEvaluation {
    pub category: MetricFamily,
    pub label: String,
    /// Mean attainment across benchmarked metrics, in [0, 1].
    pub score: f64,
    /// Weight in the overall score; `None` when the category is reported
    /// but not weighted.
    pub weight: Option<f64>,
    pub metrics: Vec<MetricEvaluation>,
}

impl CategoryEvaluation {
    /// Metrics that fell short of their target, worst first.
    pub fn shortfalls(&self) -> Vec<&MetricEvaluation> {
        let mut missed: Vec<&MetricEvaluation> =
            self.metrics.iter().filter(|m| !m.meets_target).collect();
        missed.sort_by(|a, b| a.ratio.total_cmp(&b.ratio).then_with(|| a.metric.cmp(&b.metric)));
        missed
    }
}

/// Attainment of one metric: `min(actual / target, 1)`, never negative.
pub fn attainment(actual: f64, target: f64) -> f64 {
    if target <= 0.0 || !actual.is_finite() {
        return 0.0;
    }
    (actual / target).clamp(0.0, 1.0)
}

/// Scores one family of `source` against `benchmarks`.
///
/// Only keys present in both the snapshot and the benchmark count; the
/// category score is the mean attainment over them, or 0 when there is no
/// overlap.
pub fn evaluate_category<S: MetricSource>(
    source: &S,
    family: MetricFamily,
    benchmarks: &BenchmarkTable,
) -> CategoryEvaluation {
    let actuals = source.family_values(family);
    let metrics: Vec<MetricEvaluation> = benchmarks
        .targets(family)
        .into_iter()
        .flat_map(|targets| targets.iter())
        .filter_map(|(key, target)| {
            let actual = *actuals.get(key.as_str())?;
            let ratio = attainment(actual, *target);
            Some(MetricEvaluation {
                metric: key.clone(),
                actual,
                target: *target,
                ratio,
                meets_target: actual >= *target,
            })
        })
        .collect();

    let score = if metrics.is_empty() {
        0.0
    } else {
        metrics.iter().map(|m| m.ratio).sum::<f64>() / metrics.len() as f64
    };

    CategoryEvaluation {
        category: family,
        label: family.label().to_string(),
        score,
        weight: None,
        metrics,
    }
}

/// Weighted mean of category scores.
///
/// Categories without a weight are ignored; 0 when no weight applies.
pub fn weighted_score(categories: &[CategoryEvaluation]) -> f64 {
    let (total, weights) = categories
        .iter()
        .filter_map(|c| c.weight.map(|w| (c.score * w, w)))
        .fold((0.0, 0.0), |(total, weights), (s, w)| (total + s, weights + w));
    if weights <= 0.0 {
        0.0
    } else {
        total / weights
    }
}
