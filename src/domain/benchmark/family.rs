//! Metric families and their recognized metric keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A named group of related metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricFamily {
    Precision,
    Ranking,
    Diversity,
    Coverage,
    Novelty,
    Engagement,
    Retention,
    Revenue,
    Conversion,
    Satisfaction,
    NetworkEffects,
}

const PRECISION_KEYS: &[&str] = &["precision_at_5", "precision_at_10", "precision_at_20"];

const RANKING_KEYS: &[&str] = &[
    "ndcg_at_5",
    "ndcg_at_10",
    "ndcg_at_20",
    "map_at_5",
    "map_at_10",
    "map_at_20",
    "mrr",
];

const DIVERSITY_KEYS: &[&str] = &[
    "intra_list_diversity",
    "inter_list_diversity",
    "temporal_diversity",
    "demographic_diversity",
    "feature_diversity",
];

const COVERAGE_KEYS: &[&str] = &[
    "user_coverage",
    "catalog_coverage",
    "item_coverage",
    "long_tail_coverage",
    "gini_coefficient",
];

const NOVELTY_KEYS: &[&str] = &["novelty", "serendipity"];

const ENGAGEMENT_KEYS: &[&str] = &[
    "daily_active_users",
    "weekly_active_users",
    "daily_active_rate",
    "weekly_active_rate",
    "avg_sessions_per_user",
    "avg_session_duration",
    "avg_swipes_per_user",
    "total_messages",
    "avg_messages_per_match",
    "message_response_rate",
    "avg_conversation_length",
];

const RETENTION_KEYS: &[&str] = &[
    "day_1_retention",
    "day_7_retention",
    "day_30_retention",
    "day_90_retention",
    "churn_rate",
];

const REVENUE_KEYS: &[&str] = &[
    "total_revenue",
    "mrr",
    "arpu",
    "clv",
    "conversion_rate",
    "renewal_rate",
];

const CONVERSION_KEYS: &[&str] = &[
    "matches_per_user",
    "message_conversion_rate",
    "paid_conversion_rate",
];

const SATISFACTION_KEYS: &[&str] = &["satisfaction_score", "engaged_match_rate"];

const NETWORK_KEYS: &[&str] = &[
    "connected_user_rate",
    "network_density",
    "avg_connections_per_user",
];

impl MetricFamily {
    /// Families produced by the effectiveness engine.
    pub const EFFECTIVENESS: [MetricFamily; 5] = [
        MetricFamily::Precision,
        MetricFamily::Ranking,
        MetricFamily::Diversity,
        MetricFamily::Coverage,
        MetricFamily::Novelty,
    ];

    /// Families produced by the business engine.
    pub const BUSINESS: [MetricFamily; 6] = [
        MetricFamily::Engagement,
        MetricFamily::Retention,
        MetricFamily::Revenue,
        MetricFamily::Conversion,
        MetricFamily::Satisfaction,
        MetricFamily::NetworkEffects,
    ];

    /// Snake-case name used in configuration files and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricFamily::Precision => "precision",
            MetricFamily::Ranking => "ranking",
            MetricFamily::Diversity => "diversity",
            MetricFamily::Coverage => "coverage",
            MetricFamily::Novelty => "novelty",
            MetricFamily::Engagement => "engagement",
            MetricFamily::Retention => "retention",
            MetricFamily::Revenue => "revenue",
            MetricFamily::Conversion => "conversion",
            MetricFamily::Satisfaction => "satisfaction",
            MetricFamily::NetworkEffects => "network_effects",
        }
    }

    /// Metric keys this family recognizes.
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            MetricFamily::Precision => PRECISION_KEYS,
            MetricFamily::Ranking => RANKING_KEYS,
            MetricFamily::Diversity => DIVERSITY_KEYS,
            MetricFamily::Coverage => COVERAGE_KEYS,
            MetricFamily::Novelty => NOVELTY_KEYS,
            MetricFamily::Engagement => ENGAGEMENT_KEYS,
            MetricFamily::Retention => RETENTION_KEYS,
            MetricFamily::Revenue => REVENUE_KEYS,
            MetricFamily::Conversion => CONVERSION_KEYS,
            MetricFamily::Satisfaction => SATISFACTION_KEYS,
            MetricFamily::NetworkEffects => NETWORK_KEYS,
        }
    }

    /// Whether `key` is a recognized metric of this family.
    pub fn recognizes(&self, key: &str) -> bool {
        self.keys().contains(&key)
    }

    /// Returns an error unless `key` is recognized by this family.
    pub fn check_key(&self, key: &str) -> Result<(), ValidationError> {
        if self.recognizes(key) {
            Ok(())
        } else {
            Err(ValidationError::unknown_metric(self.as_str(), key))
        }
    }

    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            MetricFamily::Precision => "Precision",
            MetricFamily::Ranking => "Ranking Quality",
            MetricFamily::Diversity => "Diversity",
            MetricFamily::Coverage => "Coverage",
            MetricFamily::Novelty => "Novelty",
            MetricFamily::Engagement => "Engagement",
            MetricFamily::Retention => "Retention",
            MetricFamily::Revenue => "Revenue",
            MetricFamily::Conversion => "Conversion",
            MetricFamily::Satisfaction => "Satisfaction",
            MetricFamily::NetworkEffects => "Network Effects",
        }
    }
}

impl fmt::Display for MetricFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MetricFamily {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricFamily::EFFECTIVENESS
            .iter()
            .chain(MetricFamily::BUSINESS.iter())
            .find(|family| family.as_str() == s)
            .copied()
            .ok_or_else(|| ValidationError::unknown_family(s))
    }
}
