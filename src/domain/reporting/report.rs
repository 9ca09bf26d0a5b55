//! Report structure shared by both engines, plus markdown rendering.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use super::scoring::CategoryEvaluation;
use super::trend::MetricTrend;
use crate::domain::benchmark::MetricFamily;
use crate::domain::foundation::{Priority, SnapshotId, Timestamp};

/// An actionable improvement suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecommendation {
    pub category: MetricFamily,
    pub issue: String,
    pub recommendation: String,
    pub priority: Priority,
}

/// Headline block of a report.
pub trait ReportSummary {
    /// Report title.
    fn title(&self) -> &str;

    /// `(label, value)` rows shown at the top of the markdown report.
    fn headline(&self) -> Vec<(String, String)>;
}

/// A snapshot scored against benchmarks, with trends and suggestions.
///
/// Everything in a report derives from stored snapshots, so generating it
/// twice from the same state yields identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<S> {
    pub snapshot_id: SnapshotId,
    /// Timestamp of the snapshot the report describes.
    pub generated_at: Timestamp,
    pub summary: S,
    pub categories: Vec<CategoryEvaluation>,
    pub trends: Vec<MetricTrend>,
    pub recommendations: Vec<ReportRecommendation>,
}

impl<S> Report<S> {
    pub fn category(&self, family: MetricFamily) -> Option<&CategoryEvaluation> {
        self.categories.iter().find(|c| c.category == family)
    }

    pub fn recommendations_at(&self, priority: Priority) -> impl Iterator<Item = &ReportRecommendation> {
        self.recommendations.iter().filter(move |r| r.priority == priority)
    }
}

impl<S: ReportSummary> Report<S> {
    /// Renders the report as a markdown document.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_markdown(&mut out);
        out
    }

    fn write_markdown(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "# {}", self.summary.title())?;
        writeln!(out, "Generated: {}", self.generated_at.as_datetime().format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(out)?;

        writeln!(out, "## Summary")?;
        for (label, value) in self.summary.headline() {
            writeln!(out, "- {}: {}", label, value)?;
        }
        writeln!(out)?;

        writeln!(out, "## Categories")?;
        for category in &self.categories {
            let weight = category
                .weight
                .map(|w| format!(" (weight {:.2})", w))
                .unwrap_or_default();
            writeln!(out, "### {}: {:.1}%{}", category.label, category.score * 100.0, weight)?;
            for metric in &category.metrics {
                let marker = if metric.meets_target {
                    "✅"
                } else if metric.ratio >= 0.5 {
                    "⚠️"
                } else {
                    "❌"
                };
                writeln!(
                    out,
                    "- {} {}: {:.4} (target {:.4})",
                    marker, metric.metric, metric.actual, metric.target
                )?;
            }
        }
        writeln!(out)?;

        if !self.trends.is_empty() {
            writeln!(out, "## Trends")?;
            for trend in &self.trends {
                match trend.slope {
                    Some(slope) => writeln!(
                        out,
                        "- {}: {} (slope {:+.4} over {} snapshots)",
                        trend.metric,
                        trend.status.label(),
                        slope,
                        trend.points
                    )?,
                    None => writeln!(out, "- {}: {}", trend.metric, trend.status.label())?,
                }
            }
            writeln!(out)?;
        }

        writeln!(out, "## Recommendations")?;
        if self.recommendations.is_empty() {
            writeln!(out, "All benchmarks met.")?;
        }
        for (i, rec) in self.recommendations.iter().enumerate() {
            writeln!(
                out,
                "{}. [{}] {}: {} {}",
                i + 1,
                rec.priority.label(),
                rec.category.label(),
                rec.issue,
                rec.recommendation
            )?;
        }
        Ok(())
    }
}

/// Builds one recommendation per category that misses a target.
///
/// The issue names the worst-performing metric; priority follows the
/// category score. Output is ordered by priority, then category.
pub fn recommendations_for(
    categories: &[CategoryEvaluation],
    advice: impl Fn(MetricFamily) -> &'static str,
) -> Vec<ReportRecommendation> {
    let mut recommendations: Vec<ReportRecommendation> = categories
        .iter()
        .filter_map(|category| {
            let worst = category.shortfalls().into_iter().next()?;
            Some(ReportRecommendation {
                category: category.category,
                issue: format!(
                    "{} is {:.4} against a target of {:.4}.",
                    worst.metric, worst.actual, worst.target
                ),
                recommendation: advice(category.category).to_string(),
                priority: Priority::from_score(category.score),
            })
        })
        .collect();
    recommendations.sort_by(|a, b| a.priority.cmp(&b.priority).then(a.category.cmp(&b.category)));
    recommendations
}

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;
