//! Immutable result of one effectiveness calculation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::benchmark::{MetricFamily, MetricSource};
use crate::domain::foundation::{SnapshotId, Timestamp};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrecisionMetrics {
    pub precision_at_5: f64,
    pub precision_at_10: f64,
    pub precision_at_20: f64,
}

impl PrecisionMetrics {
    pub fn values(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("precision_at_5", self.precision_at_5),
            ("precision_at_10", self.precision_at_10),
            ("precision_at_20", self.precision_at_20),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingMetrics {
    pub ndcg_at_5: f64,
    pub ndcg_at_10: f64,
    pub ndcg_at_20: f64,
    pub map_at_5: f64,
    pub map_at_10: f64,
    pub map_at_20: f64,
    pub mrr: f64,
}

impl RankingMetrics {
    pub fn values(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("ndcg_at_5", self.ndcg_at_5),
            ("ndcg_at_10", self.ndcg_at_10),
            ("ndcg_at_20", self.ndcg_at_20),
            ("map_at_5", self.map_at_5),
            ("map_at_10", self.map_at_10),
            ("map_at_20", self.map_at_20),
            ("mrr", self.mrr),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiversityMetrics {
    pub intra_list_diversity: f64,
    pub inter_list_diversity: f64,
    pub temporal_diversity: f64,
    pub demographic_diversity: f64,
    pub feature_diversity: f64,
}

impl DiversityMetrics {
    pub fn values(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("intra_list_diversity", self.intra_list_diversity),
            ("inter_list_diversity", self.inter_list_diversity),
            ("temporal_diversity", self.temporal_diversity),
            ("demographic_diversity", self.demographic_diversity),
            ("feature_diversity", self.feature_diversity),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageMetrics {
    pub user_coverage: f64,
    pub catalog_coverage: f64,
    /// Count of distinct recommended targets.
    pub item_coverage: usize,
    pub long_tail_coverage: f64,
    pub gini_coefficient: f64,
}

impl CoverageMetrics {
    pub fn values(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("user_coverage", self.user_coverage),
            ("catalog_coverage", self.catalog_coverage),
            ("item_coverage", self.item_coverage as f64),
            ("long_tail_coverage", self.long_tail_coverage),
            ("gini_coefficient", self.gini_coefficient),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoveltyMetrics {
    pub novelty: f64,
    pub serendipity: f64,
}

impl NoveltyMetrics {
    pub fn values(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([("novelty", self.novelty), ("serendipity", self.serendipity)])
    }
}

/// Algorithm-quality metrics computed from one batch of recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub snapshot_id: SnapshotId,
    pub timestamp: Timestamp,
    /// Evaluation window in days.
    pub time_window: u32,
    /// Number of recommendation lists evaluated.
    pub user_count: usize,
    pub precision: PrecisionMetrics,
    pub ranking: RankingMetrics,
    pub diversity: DiversityMetrics,
    pub coverage: CoverageMetrics,
    pub novelty: NoveltyMetrics,
}

impl MetricSource for MetricsSnapshot {
    fn computed_at(&self) -> Timestamp {
        self.timestamp
    }

    fn family_values(&self, family: MetricFamily) -> BTreeMap<&'static str, f64> {
        match family {
            MetricFamily::Precision => self.precision.values(),
            MetricFamily::Ranking => self.ranking.values(),
            MetricFamily::Diversity => self.diversity.values(),
            MetricFamily::Coverage => self.coverage.values(),
            MetricFamily::Novelty => self.novelty.values(),
            _ => BTreeMap::new(),
        }
    }
}
