//! End-to-end tests for both engines through the public API.
//!
//! Inputs are built from JSON the way a collaborator would send them.

use std::sync::{Arc, Mutex};

use serde_json::json;

use match_analytics::adapters::InMemoryNotificationChannel;
use match_analytics::application::{BusinessEngine, EffectivenessEngine};
use match_analytics::domain::benchmark::{BenchmarkTable, MetricFamily};
use match_analytics::domain::business::{BusinessMetricsUpdated, BusinessSnapshot};
use match_analytics::domain::effectiveness::{CoveragePolicy, MetricsUpdated};
use match_analytics::domain::foundation::{
    DomainError, ErrorCode, EventEnvelope, Priority, Timestamp,
};
use match_analytics::domain::records::{
    Interaction, MatchRecord, RecommendationList, RevenueRecord, UserRecord,
};
use match_analytics::domain::reporting::{HealthStatus, TrendStatus};
use match_analytics::ports::{NotificationChannel, SnapshotHandler};

// =============================================================================
// Fixtures
// =============================================================================

fn effectiveness_engine() -> (EffectivenessEngine, Arc<InMemoryNotificationChannel>) {
    let channel = Arc::new(InMemoryNotificationChannel::new());
    let engine = EffectivenessEngine::new(
        Arc::new(BenchmarkTable::effectiveness_defaults()),
        channel.clone(),
    );
    (engine, channel)
}

fn business_engine() -> (BusinessEngine, Arc<InMemoryNotificationChannel>) {
    let channel = Arc::new(InMemoryNotificationChannel::new());
    let engine = BusinessEngine::new(Arc::new(BenchmarkTable::business_defaults()), channel.clone());
    (engine, channel)
}

fn single_like() -> (Vec<RecommendationList>, Vec<Interaction>) {
    let lists = serde_json::from_value(json!([
        { "userId": 1, "recommendations": [{ "targetUserId": 10 }, { "targetUserId": 11 }] }
    ]))
    .unwrap();
    let interactions = serde_json::from_value(json!([
        { "userId": 1, "targetUserId": 10, "action": "like" }
    ]))
    .unwrap();
    (lists, interactions)
}

/// Records each event payload it receives.
struct Recorder {
    seen: Mutex<Vec<EventEnvelope>>,
}

impl Recorder {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            seen: Mutex::new(Vec::new()),
        })
    }

    fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl SnapshotHandler for Recorder {
    fn handle(&self, event: &EventEnvelope) -> Result<(), DomainError> {
        self.seen.lock().unwrap().push(event.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Recorder"
    }
}

// =============================================================================
// Effectiveness
// =============================================================================

#[test]
fn precision_divides_by_nominal_k() {
    let (mut engine, _) = effectiveness_engine();
    let (lists, interactions) = single_like();

    let snapshot = engine.calculate(&lists, &interactions);

    assert!((snapshot.precision.precision_at_5 - 0.2).abs() < 1e-12);
    assert!((snapshot.precision.precision_at_10 - 0.1).abs() < 1e-12);
    assert!((snapshot.precision.precision_at_20 - 0.05).abs() < 1e-12);
    assert!((snapshot.ranking.mrr - 1.0).abs() < 1e-12);
}

#[test]
fn empty_recommendations_yield_zero_without_error() {
    let (mut engine, _) = effectiveness_engine();
    let lists: Vec<RecommendationList> =
        serde_json::from_value(json!([{ "userId": 1, "recommendations": [] }])).unwrap();

    let snapshot = engine.calculate(&lists, &[]);

    assert_eq!(snapshot.precision.precision_at_5, 0.0);
    assert_eq!(snapshot.ranking.ndcg_at_10, 0.0);
    assert_eq!(snapshot.ranking.map_at_20, 0.0);
    assert_eq!(snapshot.ranking.mrr, 0.0);
    assert!(engine.generate_report().is_ok());
}

#[test]
fn effectiveness_report_requires_a_snapshot() {
    let (engine, _) = effectiveness_engine();

    let err = engine.generate_report().unwrap_err();

    assert_eq!(err.code, ErrorCode::NoSnapshotAvailable);
}

#[test]
fn repeated_reports_are_byte_identical() {
    let (mut engine, _) = effectiveness_engine();
    let (lists, interactions) = single_like();
    engine.calculate(&lists, &interactions);

    let first = serde_json::to_vec(&engine.generate_report().unwrap()).unwrap();
    let second = serde_json::to_vec(&engine.generate_report().unwrap()).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        engine.generate_report().unwrap().to_markdown(),
        engine.generate_report().unwrap().to_markdown()
    );
}

#[test]
fn subscriber_sees_snapshot_before_calculate_returns() {
    let (mut engine, channel) = effectiveness_engine();
    let recorder = Recorder::new();
    channel
        .subscribe("metrics.updated.v1", recorder.clone())
        .unwrap();
    let (lists, interactions) = single_like();

    let snapshot = engine.calculate(&lists, &interactions);

    assert_eq!(recorder.count(), 1);
    let envelope = recorder.seen.lock().unwrap()[0].clone();
    let update: MetricsUpdated = envelope.payload_as().unwrap();
    assert_eq!(update.snapshot.snapshot_id, snapshot.snapshot_id);
    assert_eq!(update.engine_id, engine.id());
}

#[test]
fn coverage_policies_differ_only_in_denominator() {
    let lists: Vec<RecommendationList> = serde_json::from_value(json!([
        { "userId": 1, "recommendations": [{ "targetUserId": 10 }] }
    ]))
    .unwrap();
    let interactions: Vec<Interaction> = serde_json::from_value(json!([
        { "userId": 2, "targetUserId": 10, "action": "view" }
    ]))
    .unwrap();

    let (mut engine, _) = effectiveness_engine();
    let observed = engine.calculate(&lists, &interactions);

    let (engine, _) = effectiveness_engine();
    let mut legacy = engine.with_coverage_policy(CoveragePolicy::Legacy);
    let legacy = legacy.calculate(&lists, &interactions);

    assert!((observed.coverage.user_coverage - 0.5).abs() < 1e-12);
    assert!((legacy.coverage.user_coverage - 1.0).abs() < 1e-12);
}

#[test]
fn trend_follows_history() {
    let (mut engine, _) = effectiveness_engine();
    let weak: Vec<RecommendationList> = serde_json::from_value(json!([
        { "userId": 1, "recommendations": [{ "targetUserId": 11 }] }
    ]))
    .unwrap();
    let (strong, interactions) = single_like();

    engine.calculate(&weak, &interactions);
    assert_eq!(
        engine.trend(MetricFamily::Ranking, "mrr").status,
        TrendStatus::InsufficientData
    );

    engine.calculate(&strong, &interactions);
    let trend = engine.trend(MetricFamily::Ranking, "mrr");
    assert_eq!(trend.status, TrendStatus::Improving);
    assert_eq!(trend.points, 2);

    let report = engine.generate_report().unwrap();
    assert!(report
        .trends
        .iter()
        .any(|t| t.metric == "ndcg_at_10" && t.status == TrendStatus::Improving));
}

#[test]
fn shortfalls_become_prioritised_recommendations() {
    let (mut engine, _) = effectiveness_engine();
    let (lists, interactions) = single_like();
    engine.calculate(&lists, &interactions);

    let report = engine.generate_report().unwrap();

    assert!(!report.recommendations.is_empty());
    let priorities: Vec<Priority> = report.recommendations.iter().map(|r| r.priority).collect();
    let mut sorted = priorities.clone();
    sorted.sort();
    assert_eq!(priorities, sorted);
}

// =============================================================================
// Business
// =============================================================================

fn retention_users(now: Timestamp) -> Vec<UserRecord> {
    serde_json::from_value(json!([
        {
            "id": "a",
            "createdAt": now.minus_days(60),
            "lastActive": now,
            "sessionsLastWeek": 4.0
        },
        {
            "id": "b",
            "createdAt": now.minus_days(60),
            "lastActive": now.minus_days(45)
        }
    ]))
    .unwrap()
}

#[test]
fn user_active_at_cutoff_is_retained() {
    let (mut engine, _) = business_engine();
    let now = Timestamp::now();

    let snapshot = engine.calculate_at(&retention_users(now), &[], &[], 30, now);

    assert!((snapshot.retention.day_30_retention - 0.5).abs() < 1e-12);
    assert!((snapshot.engagement.weekly_active_rate - 0.5).abs() < 1e-12);
}

#[test]
fn monthly_subscriptions_sum_into_mrr() {
    let (mut engine, _) = business_engine();
    let revenue: Vec<RevenueRecord> = serde_json::from_value(json!([
        { "userId": "a", "amount": 10, "type": "subscription", "billingPeriod": "monthly" },
        { "userId": "a", "amount": 10, "type": "subscription", "billingPeriod": "monthly" }
    ]))
    .unwrap();

    let snapshot = engine.calculate(&[], &[], &revenue);

    assert!((snapshot.revenue.mrr - 20.0).abs() < 1e-12);
    assert!((snapshot.revenue.total_revenue - 20.0).abs() < 1e-12);
    assert_eq!(snapshot.revenue.paying_users, 1);
}

#[test]
fn business_report_requires_a_snapshot() {
    let (engine, _) = business_engine();

    let err = engine.generate_report().unwrap_err();

    assert_eq!(err.code, ErrorCode::NoSnapshotAvailable);
}

#[test]
fn business_report_carries_headline_kpis_and_health() {
    let (mut engine, channel) = business_engine();
    let now = Timestamp::now();
    let matches: Vec<MatchRecord> = serde_json::from_value(json!([
        { "messageCount": 12, "participants": ["a", "b"] },
        { "messageCount": 0 }
    ]))
    .unwrap();

    let snapshot: BusinessSnapshot =
        engine.calculate_at(&retention_users(now), &matches, &[], 30, now);
    let report = engine.generate_report().unwrap();

    let executive = &report.summary.executive;
    assert!((executive.weekly_active_rate - snapshot.engagement.weekly_active_rate).abs() < 1e-12);
    assert!((executive.day_30_retention - snapshot.retention.day_30_retention).abs() < 1e-12);
    assert_eq!(executive.mrr, 0.0);

    // engagement 0.5 -> 15, retention 0.5 -> 15, revenue 0 -> 5
    assert!((report.summary.health.average_points - 35.0 / 3.0).abs() < 1e-9);
    assert_eq!(report.summary.health.status, HealthStatus::Fair);

    let update: BusinessMetricsUpdated = channel.events_of_type("business_metrics.updated.v1")[0]
        .payload_as()
        .unwrap();
    assert_eq!(update.snapshot.snapshot_id, snapshot.snapshot_id);
}

#[test]
fn engines_share_one_channel_without_crosstalk() {
    let channel = Arc::new(InMemoryNotificationChannel::new());
    let effectiveness_recorder = Recorder::new();
    let business_recorder = Recorder::new();
    channel
        .subscribe("metrics.updated.v1", effectiveness_recorder.clone())
        .unwrap();
    channel
        .subscribe("business_metrics.updated.v1", business_recorder.clone())
        .unwrap();

    let mut effectiveness = EffectivenessEngine::new(
        Arc::new(BenchmarkTable::effectiveness_defaults()),
        channel.clone(),
    );
    let mut business =
        BusinessEngine::new(Arc::new(BenchmarkTable::business_defaults()), channel.clone());

    effectiveness.calculate(&[], &[]);
    effectiveness.calculate(&[], &[]);
    business.calculate(&[], &[], &[]);

    assert_eq!(effectiveness_recorder.count(), 2);
    assert_eq!(business_recorder.count(), 1);
    assert_eq!(effectiveness.history().len(), 2);
    assert_eq!(business.history().len(), 1);
    assert_eq!(channel.event_count(), 3);
}
