//! Effectiveness report generation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::report::{recommendations_for, Report, ReportSummary};
use super::scoring::{evaluate_category, weighted_score};
use super::trend::TrendAnalyzer;
use crate::domain::benchmark::{BenchmarkTable, MetricFamily};
use crate::domain::effectiveness::MetricsSnapshot;
use crate::domain::foundation::DomainError;

/// Category weights in the overall effectiveness score.
pub const EFFECTIVENESS_WEIGHTS: [(MetricFamily, f64); 5] = [
    (MetricFamily::Precision, 0.30),
    (MetricFamily::Ranking, 0.25),
    (MetricFamily::Diversity, 0.20),
    (MetricFamily::Coverage, 0.15),
    (MetricFamily::Novelty, 0.10),
];

/// Metrics tracked for trends, in report order.
pub const EFFECTIVENESS_TRENDS: [(MetricFamily, &str); 5] = [
    (MetricFamily::Precision, "precision_at_10"),
    (MetricFamily::Ranking, "ndcg_at_10"),
    (MetricFamily::Diversity, "intra_list_diversity"),
    (MetricFamily::Coverage, "user_coverage"),
    (MetricFamily::Novelty, "novelty"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectivenessSummary {
    /// Weighted attainment across categories, in [0, 1].
    pub overall_score: f64,
    pub users_evaluated: usize,
    pub time_window: u32,
    /// Whether novelty contributed its weight to the overall score.
    pub novelty_weighted: bool,
    pub precision_at_10: f64,
    pub ndcg_at_10: f64,
    pub user_coverage: f64,
}

impl ReportSummary for EffectivenessSummary {
    fn title(&self) -> &str {
        "Recommendation Effectiveness Report"
    }

    fn headline(&self) -> Vec<(String, String)> {
        vec![
            ("Overall Score".to_string(), format!("{:.1}%", self.overall_score * 100.0)),
            ("Users Evaluated".to_string(), self.users_evaluated.to_string()),
            ("Time Window".to_string(), format!("{} days", self.time_window)),
            ("Precision@10".to_string(), format!("{:.4}", self.precision_at_10)),
            ("NDCG@10".to_string(), format!("{:.4}", self.ndcg_at_10)),
            ("User Coverage".to_string(), format!("{:.1}%", self.user_coverage * 100.0)),
        ]
    }
}

pub type EffectivenessReport = Report<EffectivenessSummary>;

fn advice(family: MetricFamily) -> &'static str {
    match family {
        MetricFamily::Precision => {
            "Tighten candidate filtering so more of the top slots go to users likely to like back."
        }
        MetricFamily::Ranking => {
            "Re-weight ranking features so the strongest mutual interest sits at the top of each list."
        }
        MetricFamily::Diversity => {
            "Mix ages, locations and interests within each list instead of repeating one profile type."
        }
        MetricFamily::Coverage => {
            "Surface more of the user base and spread exposure beyond the most popular profiles."
        }
        MetricFamily::Novelty => {
            "Introduce profiles users have not seen yet and reward unexpected matches that convert."
        }
        _ => "Review the metric inputs for this category.",
    }
}

/// Scores the latest effectiveness snapshot.
#[derive(Debug, Clone)]
pub struct EffectivenessReportGenerator {
    benchmarks: Arc<BenchmarkTable>,
    trends: TrendAnalyzer,
    apply_novelty_weight: bool,
}

impl EffectivenessReportGenerator {
    pub fn new(benchmarks: Arc<BenchmarkTable>) -> Self {
        Self {
            benchmarks,
            trends: TrendAnalyzer::default(),
            apply_novelty_weight: false,
        }
    }

    pub fn with_trend_analyzer(mut self, trends: TrendAnalyzer) -> Self {
        self.trends = trends;
        self
    }

    /// Counts novelty's 0.10 weight in the overall score. Off by default:
    /// novelty is then scored and reported but does not move the total.
    pub fn with_novelty_weight(mut self, apply: bool) -> Self {
        self.apply_novelty_weight = apply;
        self
    }

    pub fn benchmarks(&self) -> &BenchmarkTable {
        &self.benchmarks
    }

    /// Builds a report for the newest snapshot in `history`.
    ///
    /// # Errors
    ///
    /// - `NoSnapshotAvailable` if `history` is empty
    pub fn generate(&self, history: &[MetricsSnapshot]) -> Result<EffectivenessReport, DomainError> {
        let latest = history
            .last()
            .ok_or_else(|| DomainError::no_snapshot("effectiveness"))?;

        let categories: Vec<_> = EFFECTIVENESS_WEIGHTS
            .iter()
            .map(|(family, weight)| {
                let mut category = evaluate_category(latest, *family, &self.benchmarks);
                let weighted = *family != MetricFamily::Novelty || self.apply_novelty_weight;
                category.weight = weighted.then_some(*weight);
                category
            })
            .collect();

        let summary = EffectivenessSummary {
            overall_score: weighted_score(&categories),
            users_evaluated: latest.user_count,
            time_window: latest.time_window,
            novelty_weighted: self.apply_novelty_weight,
            precision_at_10: latest.precision.precision_at_10,
            ndcg_at_10: latest.ranking.ndcg_at_10,
            user_coverage: latest.coverage.user_coverage,
        };

        Ok(Report {
            snapshot_id: latest.snapshot_id,
            generated_at: latest.timestamp,
            summary,
            trends: self.trends.analyze_all(history, &EFFECTIVENESS_TRENDS),
            recommendations: recommendations_for(&categories, advice),
            categories,
        })
    }
}
