//! Immutable result of one business calculation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::benchmark::{MetricFamily, MetricSource};
use crate::domain::foundation::{SnapshotId, Timestamp};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub daily_active_users: usize,
    pub weekly_active_users: usize,
    pub daily_active_rate: f64,
    pub weekly_active_rate: f64,
    pub avg_sessions_per_user: f64,
    /// Minutes.
    pub avg_session_duration: f64,
    pub avg_swipes_per_user: f64,
    pub total_messages: u64,
    pub avg_messages_per_match: f64,
    /// Share of started conversations that got a reply.
    pub message_response_rate: f64,
    /// Mean message count over conversations that started.
    pub avg_conversation_length: f64,
}

impl EngagementMetrics {
    pub fn values(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("daily_active_users", self.daily_active_users as f64),
            ("weekly_active_users", self.weekly_active_users as f64),
            ("daily_active_rate", self.daily_active_rate),
            ("weekly_active_rate", self.weekly_active_rate),
            ("avg_sessions_per_user", self.avg_sessions_per_user),
            ("avg_session_duration", self.avg_session_duration),
            ("avg_swipes_per_user", self.avg_swipes_per_user),
            ("total_messages", self.total_messages as f64),
            ("avg_messages_per_match", self.avg_messages_per_match),
            ("message_response_rate", self.message_response_rate),
            ("avg_conversation_length", self.avg_conversation_length),
        ])
    }
}

/// Activity of one signup-month cohort at monthly checkpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortRetention {
    /// Signup month, `YYYY-MM`.
    pub cohort: String,
    pub size: usize,
    /// `month_0..month_12`; `None` for checkpoints still in the future.
    pub checkpoints: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetentionMetrics {
    pub day_1_retention: f64,
    pub day_7_retention: f64,
    pub day_30_retention: f64,
    pub day_90_retention: f64,
    pub churn_rate: f64,
    pub cohorts: Vec<CohortRetention>,
}

impl RetentionMetrics {
    pub fn values(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("day_1_retention", self.day_1_retention),
            ("day_7_retention", self.day_7_retention),
            ("day_30_retention", self.day_30_retention),
            ("day_90_retention", self.day_90_retention),
            ("churn_rate", self.churn_rate),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueMetrics {
    pub total_revenue: f64,
    pub mrr: f64,
    pub arpu: f64,
    pub clv: f64,
    pub conversion_rate: f64,
    pub renewal_rate: f64,
    pub paying_users: usize,
}

impl RevenueMetrics {
    pub fn values(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("total_revenue", self.total_revenue),
            ("mrr", self.mrr),
            ("arpu", self.arpu),
            ("clv", self.clv),
            ("conversion_rate", self.conversion_rate),
            ("renewal_rate", self.renewal_rate),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionMetrics {
    pub matches_per_user: f64,
    pub message_conversion_rate: f64,
    pub paid_conversion_rate: f64,
}

impl ConversionMetrics {
    pub fn values(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("matches_per_user", self.matches_per_user),
            ("message_conversion_rate", self.message_conversion_rate),
            ("paid_conversion_rate", self.paid_conversion_rate),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionMetrics {
    pub satisfaction_score: f64,
    pub engaged_match_rate: f64,
}

impl SatisfactionMetrics {
    pub fn values(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("satisfaction_score", self.satisfaction_score),
            ("engaged_match_rate", self.engaged_match_rate),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkMetrics {
    pub connected_user_rate: f64,
    pub network_density: f64,
    pub avg_connections_per_user: f64,
}

impl NetworkMetrics {
    pub fn values(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("connected_user_rate", self.connected_user_rate),
            ("network_density", self.network_density),
            ("avg_connections_per_user", self.avg_connections_per_user),
        ])
    }
}

/// Business-impact metrics computed from one batch of platform records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSnapshot {
    pub snapshot_id: SnapshotId,
    pub timestamp: Timestamp,
    /// Churn window in days.
    pub time_window: u32,
    pub user_count: usize,
    pub engagement: EngagementMetrics,
    pub retention: RetentionMetrics,
    pub revenue: RevenueMetrics,
    pub conversion: ConversionMetrics,
    pub satisfaction: SatisfactionMetrics,
    pub network_effects: NetworkMetrics,
}

impl MetricSource for BusinessSnapshot {
    fn computed_at(&self) -> Timestamp {
        self.timestamp
    }

    fn family_values(&self, family: MetricFamily) -> BTreeMap<&'static str, f64> {
        match family {
            MetricFamily::Engagement => self.engagement.values(),
            MetricFamily::Retention => self.retention.values(),
            MetricFamily::Revenue => self.revenue.values(),
            MetricFamily::Conversion => self.conversion.values(),
            MetricFamily::Satisfaction => self.satisfaction.values(),
            MetricFamily::NetworkEffects => self.network_effects.values(),
            _ => BTreeMap::new(),
        }
    }
}
