//! EffectivenessEngine - stateful front for recommendation-quality metrics.
//!
//! Owns the snapshot history and the notification channel. Each
//! `calculate` call runs the pure calculator, appends the snapshot,
//! publishes `MetricsUpdated` and returns.

use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use super::DEFAULT_TIME_WINDOW_DAYS;
use crate::domain::benchmark::{BenchmarkTable, MetricFamily};
use crate::domain::effectiveness::{
    CoveragePolicy, EffectivenessCalculator, MetricsSnapshot, MetricsUpdated, SerendipityScorer,
};
use crate::domain::foundation::{DomainError, EngineId, SerializableDomainEvent, Timestamp};
use crate::domain::records::{Interaction, RecommendationList};
use crate::domain::reporting::{
    EffectivenessReport, EffectivenessReportGenerator, MetricTrend, TrendAnalyzer,
};
use crate::ports::NotificationChannel;

/// Engine shared between callers; `calculate` takes the write lock.
pub type SharedEffectivenessEngine = Arc<RwLock<EffectivenessEngine>>;

pub struct EffectivenessEngine {
    id: EngineId,
    calculator: EffectivenessCalculator,
    reports: EffectivenessReportGenerator,
    trends: TrendAnalyzer,
    channel: Arc<dyn NotificationChannel>,
    time_window_days: u32,
    history: Vec<MetricsSnapshot>,
}

impl EffectivenessEngine {
    pub fn new(benchmarks: Arc<BenchmarkTable>, channel: Arc<dyn NotificationChannel>) -> Self {
        Self {
            id: EngineId::new(),
            calculator: EffectivenessCalculator::new(),
            reports: EffectivenessReportGenerator::new(benchmarks),
            trends: TrendAnalyzer::default(),
            channel,
            time_window_days: DEFAULT_TIME_WINDOW_DAYS,
            history: Vec::new(),
        }
    }

    pub fn with_time_window(mut self, days: u32) -> Self {
        self.time_window_days = days;
        self
    }

    pub fn with_trend_analyzer(mut self, trends: TrendAnalyzer) -> Self {
        self.trends = trends;
        self.reports = self.reports.with_trend_analyzer(trends);
        self
    }

    pub fn with_coverage_policy(mut self, policy: CoveragePolicy) -> Self {
        self.calculator = self.calculator.with_coverage_policy(policy);
        self
    }

    pub fn with_serendipity_scorer(mut self, scorer: Arc<dyn SerendipityScorer>) -> Self {
        self.calculator = self.calculator.with_serendipity_scorer(scorer);
        self
    }

    pub fn with_novelty_weight(mut self, apply: bool) -> Self {
        self.reports = self.reports.with_novelty_weight(apply);
        self
    }

    /// Wraps the engine for shared use.
    pub fn into_shared(self) -> SharedEffectivenessEngine {
        Arc::new(RwLock::new(self))
    }

    pub fn id(&self) -> EngineId {
        self.id
    }

    pub fn time_window_days(&self) -> u32 {
        self.time_window_days
    }

    /// Most recent snapshot, if any calculation has run.
    pub fn current(&self) -> Option<&MetricsSnapshot> {
        self.history.last()
    }

    /// Every snapshot computed so far, oldest first.
    pub fn history(&self) -> &[MetricsSnapshot] {
        &self.history
    }

    /// Calculates with the configured window as of now.
    pub fn calculate(
        &mut self,
        recommendations: &[RecommendationList],
        interactions: &[Interaction],
    ) -> MetricsSnapshot {
        self.calculate_at(
            recommendations,
            interactions,
            self.time_window_days,
            Timestamp::now(),
        )
    }

    /// Calculates with an explicit window as of now.
    pub fn calculate_with_window(
        &mut self,
        recommendations: &[RecommendationList],
        interactions: &[Interaction],
        time_window_days: u32,
    ) -> MetricsSnapshot {
        self.calculate_at(recommendations, interactions, time_window_days, Timestamp::now())
    }

    /// Calculates as of `now`, stores the snapshot and notifies subscribers.
    ///
    /// Never fails: a notification error is logged and the snapshot is
    /// still stored and returned.
    pub fn calculate_at(
        &mut self,
        recommendations: &[RecommendationList],
        interactions: &[Interaction],
        time_window_days: u32,
        now: Timestamp,
    ) -> MetricsSnapshot {
        let snapshot = self
            .calculator
            .compute(recommendations, interactions, time_window_days, now);

        debug!(
            engine_id = %self.id,
            snapshot_id = %snapshot.snapshot_id,
            lists = recommendations.len(),
            interactions = interactions.len(),
            time_window_days,
            serendipity = self.calculator.serendipity_scorer().name(),
            "Computed effectiveness snapshot"
        );

        self.history.push(snapshot.clone());
        self.notify(&snapshot);
        snapshot
    }

    fn notify(&self, snapshot: &MetricsSnapshot) {
        let result = MetricsUpdated::new(self.id, snapshot.clone())
            .to_envelope()
            .map(|envelope| envelope.with_correlation_id(snapshot.snapshot_id.to_string()))
            .and_then(|envelope| self.channel.publish(envelope));

        if let Err(e) = result {
            warn!(
                engine_id = %self.id,
                snapshot_id = %snapshot.snapshot_id,
                error = %e,
                "MetricsUpdated notification failed"
            );
        }
    }

    /// Scores the latest snapshot against the benchmarks.
    ///
    /// # Errors
    ///
    /// - `NoSnapshotAvailable` if `calculate` has never run
    pub fn generate_report(&self) -> Result<EffectivenessReport, DomainError> {
        self.reports.generate(&self.history)
    }

    /// Trend of one metric over the trailing window of history.
    pub fn trend(&self, family: MetricFamily, metric: &str) -> MetricTrend {
        self.trends.analyze(&self.history, family, metric)
    }
}
