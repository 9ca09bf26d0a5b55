//! Reporting - benchmark scoring, trends and report generation.
//!
//! - `trend` - least-squares trend detection over recent snapshots
//! - `scoring` - category attainment against benchmark targets
//! - `report` - the shared report shape and markdown rendering
//! - `effectiveness_report` / `business_report` - one generator per engine

pub mod business_report;
pub mod effectiveness_report;
pub mod report;
pub mod scoring;
pub mod trend;

pub use business_report::{
    BusinessReport, BusinessReportGenerator, BusinessSummary, ExecutiveSummary,
    HealthAssessment, HealthStatus, BUSINESS_TRENDS,
};
pub use effectiveness_report::{
    EffectivenessReport, EffectivenessReportGenerator, EffectivenessSummary,
    EFFECTIVENESS_TRENDS, EFFECTIVENESS_WEIGHTS,
};
pub use report::{recommendations_for, Report, ReportRecommendation, ReportSummary};
pub use scoring::{attainment, evaluate_category, weighted_score, CategoryEvaluation, MetricEvaluation};
pub use trend::{
    ols_slope, MetricTrend, TrendAnalyzer, TrendStatus, DEFAULT_TREND_THRESHOLD,
    DEFAULT_TREND_WINDOW, MAX_TREND_WINDOW,
};
