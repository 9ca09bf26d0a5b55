//! Business report generation and health classification.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::report::{recommendations_for, Report, ReportSummary};
use super::scoring::{evaluate_category, weighted_score};
use super::trend::TrendAnalyzer;
use crate::domain::benchmark::{BenchmarkTable, MetricFamily};
use crate::domain::business::BusinessSnapshot;
use crate::domain::foundation::DomainError;

/// Metrics tracked for trends, in report order.
pub const BUSINESS_TRENDS: [(MetricFamily, &str); 4] = [
    (MetricFamily::Engagement, "weekly_active_rate"),
    (MetricFamily::Retention, "day_30_retention"),
    (MetricFamily::Revenue, "mrr"),
    (MetricFamily::Revenue, "clv"),
];

/// Overall platform health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    NeedsAttention,
}

impl HealthStatus {
    /// Maps an average point score to a status.
    pub fn from_points(average: f64) -> Self {
        if average >= 20.0 {
            HealthStatus::Excellent
        } else if average >= 15.0 {
            HealthStatus::Good
        } else if average >= 10.0 {
            HealthStatus::Fair
        } else {
            HealthStatus::NeedsAttention
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Excellent",
            HealthStatus::Good => "Good",
            HealthStatus::Fair => "Fair",
            HealthStatus::NeedsAttention => "Needs Attention",
        }
    }
}

/// Awards 25 / 15 / 5 points against two thresholds.
fn tier_points(value: f64, top: f64, middle: f64) -> u8 {
    if value > top {
        25
    } else if value > middle {
        15
    } else {
        5
    }
}

/// Point breakdown behind the health status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAssessment {
    pub engagement_points: u8,
    pub retention_points: u8,
    pub revenue_points: u8,
    pub average_points: f64,
    pub status: HealthStatus,
}

impl HealthAssessment {
    /// Scores weekly-active rate, day-30 retention and MRR.
    ///
    /// Engagement: >0.6 → 25, >0.4 → 15. Retention: >0.5 → 25, >0.3 → 15.
    /// Revenue: >10000 → 25, >5000 → 15. Otherwise 5.
    pub fn assess(snapshot: &BusinessSnapshot) -> Self {
        let engagement_points = tier_points(snapshot.engagement.weekly_active_rate, 0.6, 0.4);
        let retention_points = tier_points(snapshot.retention.day_30_retention, 0.5, 0.3);
        let revenue_points = tier_points(snapshot.revenue.mrr, 10_000.0, 5_000.0);

        let average_points =
            f64::from(u16::from(engagement_points) + u16::from(retention_points) + u16::from(revenue_points))
                / 3.0;

        Self {
            engagement_points,
            retention_points,
            revenue_points,
            average_points,
            status: HealthStatus::from_points(average_points),
        }
    }
}

/// The four headline KPIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveSummary {
    pub weekly_active_rate: f64,
    pub day_30_retention: f64,
    pub mrr: f64,
    pub clv: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSummary {
    /// Equal-weight attainment across categories, in [0, 1].
    pub overall_score: f64,
    pub user_count: usize,
    pub time_window: u32,
    pub executive: ExecutiveSummary,
    pub health: HealthAssessment,
}

impl ReportSummary for BusinessSummary {
    fn title(&self) -> &str {
        "Business Impact Report"
    }

    fn headline(&self) -> Vec<(String, String)> {
        vec![
            ("Overall Score".to_string(), format!("{:.1}%", self.overall_score * 100.0)),
            ("Health".to_string(), self.health.status.label().to_string()),
            ("Users".to_string(), self.user_count.to_string()),
            (
                "Weekly Active Rate".to_string(),
                format!("{:.1}%", self.executive.weekly_active_rate * 100.0),
            ),
            (
                "30-Day Retention".to_string(),
                format!("{:.1}%", self.executive.day_30_retention * 100.0),
            ),
            ("MRR".to_string(), format!("{:.2}", self.executive.mrr)),
            ("CLV".to_string(), format!("{:.2}", self.executive.clv)),
        ]
    }
}

pub type BusinessReport = Report<BusinessSummary>;

fn advice(family: MetricFamily) -> &'static str {
    match family {
        MetricFamily::Engagement => {
            "Prompt dormant users with fresh matches and nudge stalled conversations."
        }
        MetricFamily::Retention => {
            "Strengthen the first-week experience; most churn happens before the first match."
        }
        MetricFamily::Revenue => {
            "Revisit pricing and highlight premium features at moments of high intent."
        }
        MetricFamily::Conversion => {
            "Add conversation starters so more matches turn into messages."
        }
        MetricFamily::Satisfaction => {
            "Collect feedback from users with unanswered messages and act on the common themes."
        }
        MetricFamily::NetworkEffects => {
            "Help isolated users make a first connection through broader discovery."
        }
        _ => "Review the metric inputs for this category.",
    }
}

/// Scores the latest business snapshot.
#[derive(Debug, Clone)]
pub struct BusinessReportGenerator {
    benchmarks: Arc<BenchmarkTable>,
    trends: TrendAnalyzer,
}

impl BusinessReportGenerator {
    pub fn new(benchmarks: Arc<BenchmarkTable>) -> Self {
        Self {
            benchmarks,
            trends: TrendAnalyzer::default(),
        }
    }

    pub fn with_trend_analyzer(mut self, trends: TrendAnalyzer) -> Self {
        self.trends = trends;
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
    pub fn generate(&self, history: &[BusinessSnapshot]) -> Result<BusinessReport, DomainError> {
        let latest = history
            .last()
            .ok_or_else(|| DomainError::no_snapshot("business"))?;

        let categories: Vec<_> = MetricFamily::BUSINESS
            .iter()
            .map(|family| {
                let mut category = evaluate_category(latest, *family, &self.benchmarks);
                category.weight = Some(1.0);
                category
            })
            .collect();

        let summary = BusinessSummary {
            overall_score: weighted_score(&categories),
            user_count: latest.user_count,
            time_window: latest.time_window,
            executive: ExecutiveSummary {
                weekly_active_rate: latest.engagement.weekly_active_rate,
                day_30_retention: latest.retention.day_30_retention,
                mrr: latest.revenue.mrr,
                clv: latest.revenue.clv,
            },
            health: HealthAssessment::assess(latest),
        };

        Ok(Report {
            snapshot_id: latest.snapshot_id,
            generated_at: latest.timestamp,
            summary,
            trends: self.trends.analyze_all(history, &BUSINESS_TRENDS),
            recommendations: recommendations_for(&categories, advice),
            categories,
        })
    }
}
