//! BusinessEngine - stateful front for business-impact metrics.

use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use super::DEFAULT_TIME_WINDOW_DAYS;
use crate::domain::benchmark::{BenchmarkTable, MetricFamily};
use crate::domain::business::{BusinessCalculator, BusinessMetricsUpdated, BusinessSnapshot};
use crate::domain::foundation::{DomainError, EngineId, SerializableDomainEvent, Timestamp};
use crate::domain::records::{MatchRecord, RevenueRecord, UserRecord};
use crate::domain::reporting::{BusinessReport, BusinessReportGenerator, MetricTrend, TrendAnalyzer};
use crate::ports::NotificationChannel;

pub type SharedBusinessEngine = Arc<RwLock<BusinessEngine>>;

pub struct BusinessEngine {
    id: EngineId,
    reports: BusinessReportGenerator,
    trends: TrendAnalyzer,
    channel: Arc<dyn NotificationChannel>,
    time_window_days: u32,
    history: Vec<BusinessSnapshot>,
}

impl BusinessEngine {
    pub fn new(benchmarks: Arc<BenchmarkTable>, channel: Arc<dyn NotificationChannel>) -> Self {
        Self {
            id: EngineId::new(),
            reports: BusinessReportGenerator::new(benchmarks),
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

    pub fn into_shared(self) -> SharedBusinessEngine {
        Arc::new(RwLock::new(self))
    }

    pub fn id(&self) -> EngineId {
        self.id
    }

    pub fn time_window_days(&self) -> u32 {
        self.time_window_days
    }

    pub fn current(&self) -> Option<&BusinessSnapshot> {
        self.history.last()
    }

    pub fn history(&self) -> &[BusinessSnapshot] {
        &self.history
    }

    pub fn calculate(
        &mut self,
        users: &[UserRecord],
        matches: &[MatchRecord],
        revenue: &[RevenueRecord],
    ) -> BusinessSnapshot {
        self.calculate_at(users, matches, revenue, self.time_window_days, Timestamp::now())
    }

    pub fn calculate_with_window(
        &mut self,
        users: &[UserRecord],
        matches: &[MatchRecord],
        revenue: &[RevenueRecord],
        time_window_days: u32,
    ) -> BusinessSnapshot {
        self.calculate_at(users, matches, revenue, time_window_days, Timestamp::now())
    }

    /// Calculates as of `now`, stores the snapshot and notifies subscribers.
    ///
    /// Notification errors are logged, never returned.
    pub fn calculate_at(
        &mut self,
        users: &[UserRecord],
        matches: &[MatchRecord],
        revenue: &[RevenueRecord],
        time_window_days: u32,
        now: Timestamp,
    ) -> BusinessSnapshot {
        let snapshot = BusinessCalculator::compute(users, matches, revenue, time_window_days, now);

        debug!(
            engine_id = %self.id,
            snapshot_id = %snapshot.snapshot_id,
            users = users.len(),
            matches = matches.len(),
            revenue_records = revenue.len(),
            time_window_days,
            "Computed business snapshot"
        );

        self.history.push(snapshot.clone());
        self.notify(&snapshot);
        snapshot
    }

    fn notify(&self, snapshot: &BusinessSnapshot) {
        let result = BusinessMetricsUpdated::new(self.id, snapshot.clone())
            .to_envelope()
            .map(|envelope| envelope.with_correlation_id(snapshot.snapshot_id.to_string()))
            .and_then(|envelope| self.channel.publish(envelope));

        if let Err(e) = result {
            warn!(
                engine_id = %self.id,
                snapshot_id = %snapshot.snapshot_id,
                error = %e,
                "BusinessMetricsUpdated notification failed"
            );
        }
    }

    /// # Errors
    ///
    /// - `NoSnapshotAvailable` if `calculate` has never run
    pub fn generate_report(&self) -> Result<BusinessReport, DomainError> {
        self.reports.generate(&self.history)
    }

    pub fn trend(&self, family: MetricFamily, metric: &str) -> MetricTrend {
        self.trends.analyze(&self.history, family, metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryNotificationChannel;
    use crate::domain::foundation::{ErrorCode, UserId};
    use crate::domain::records::{BillingPeriod, RevenueType};

    fn engine() -> (BusinessEngine, Arc<InMemoryNotificationChannel>) {
        let channel = Arc::new(InMemoryNotificationChannel::new());
        let engine = BusinessEngine::new(
            Arc::new(BenchmarkTable::business_defaults()),
            channel.clone(),
        );
        (engine, channel)
    }

    fn users(now: Timestamp) -> Vec<UserRecord> {
        vec![
            UserRecord::new(UserId::from(1), now.minus_days(60)).last_seen(now),
            UserRecord::new(UserId::from(2), now.minus_days(60)).last_seen(now.minus_days(3)),
            UserRecord::new(UserId::from(3), now.minus_days(60)).last_seen(now.minus_days(40)),
        ]
    }

    #[test]
    fn report_before_calculate_is_an_error() {
        let (engine, _) = engine();
        let err = engine.generate_report().unwrap_err();
        assert_eq!(err.code, ErrorCode::NoSnapshotAvailable);
    }

    #[test]
    fn calculate_publishes_full_snapshot() {
        let (mut engine, channel) = engine();
        let now = Timestamp::now();
        let revenue = vec![
            RevenueRecord::new(UserId::from(1), 20.0, RevenueType::Subscription)
                .billed(BillingPeriod::Monthly)
                .at(now),
        ];
        let matches = vec![MatchRecord::with_messages(4).between(UserId::from(1), UserId::from(2))];

        let snapshot = engine.calculate_at(&users(now), &matches, &revenue, 30, now);

        assert_eq!(snapshot.user_count, 3);
        assert_eq!(snapshot.engagement.daily_active_users, 1);
        assert_eq!(snapshot.engagement.weekly_active_users, 2);
        assert!((snapshot.revenue.mrr - 20.0).abs() < 1e-9);

        let events = channel.events_of_type("business_metrics.updated.v1");
        assert_eq!(events.len(), 1);
        let payload: BusinessMetricsUpdated = events[0].payload_as().unwrap();
        assert_eq!(payload.snapshot.snapshot_id, snapshot.snapshot_id);
        assert_eq!(
            events[0].metadata.correlation_id,
            Some(snapshot.snapshot_id.to_string())
        );
    }

    #[test]
    fn report_is_stable_between_calls() {
        let (mut engine, _) = engine();
        let now = Timestamp::now();
        engine.calculate_at(&users(now), &[], &[], 30, now);

        let first = serde_json::to_string(&engine.generate_report().unwrap()).unwrap();
        let second = serde_json::to_string(&engine.generate_report().unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn configured_window_is_recorded() {
        let (engine, _) = engine();
        let mut engine = engine.with_time_window(14);

        let snapshot = engine.calculate(&[], &[], &[]);
        assert_eq!(snapshot.time_window, 14);
        assert_eq!(engine.time_window_days(), 14);
    }

    #[test]
    fn widest_window_does_not_panic() {
        let (mut engine, _) = engine();
        let now = Timestamp::now();

        let snapshot = engine.calculate_at(&users(now), &[], &[], u32::MAX, now);

        assert_eq!(snapshot.time_window, u32::MAX);
        assert_eq!(engine.history().len(), 1);
    }
}
