//! Effectiveness Calculator - turns recommendations and interactions into a snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use super::coverage::{self, CoveragePolicy};
use super::diversity;
use super::novelty::{self, SerendipityContext, SerendipityScorer, UnexpectedRelevance};
use super::ranking::{self, K_VALUES};
use super::relevance::RelevanceIndex;
use super::snapshot::{
    CoverageMetrics, DiversityMetrics, MetricsSnapshot, NoveltyMetrics, PrecisionMetrics,
    RankingMetrics,
};
use crate::domain::foundation::{SnapshotId, Timestamp, UserId};
use crate::domain::records::{Candidate, Interaction, RecommendationList};

/// Running mean that tolerates an empty sample.
#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn push_opt(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.push(v);
        }
    }

    fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Pure calculator for recommendation-quality metrics.
///
/// Holds only policy; every call to [`compute`](Self::compute) is
/// independent and deterministic apart from the generated snapshot id.
#[derive(Clone)]
pub struct EffectivenessCalculator {
    coverage_policy: CoveragePolicy,
    serendipity: Arc<dyn SerendipityScorer>,
}

impl std::fmt::Debug for EffectivenessCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectivenessCalculator")
            .field("coverage_policy", &self.coverage_policy)
            .field("serendipity", &self.serendipity.name())
            .finish()
    }
}

impl Default for EffectivenessCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectivenessCalculator {
    pub fn new() -> Self {
        Self {
            coverage_policy: CoveragePolicy::default(),
            serendipity: Arc::new(UnexpectedRelevance),
        }
    }

    pub fn with_coverage_policy(mut self, policy: CoveragePolicy) -> Self {
        self.coverage_policy = policy;
        self
    }

    pub fn with_serendipity_scorer(mut self, scorer: Arc<dyn SerendipityScorer>) -> Self {
        self.serendipity = scorer;
        self
    }

    pub fn coverage_policy(&self) -> CoveragePolicy {
        self.coverage_policy
    }

    pub fn serendipity_scorer(&self) -> &dyn SerendipityScorer {
        self.serendipity.as_ref()
    }

    /// Computes every effectiveness metric as of `now`.
    ///
    /// Per-user metrics (precision, NDCG, MAP, MRR) are averaged over every
    /// list supplied, so an empty list contributes zero. Interactions stamped
    /// more than `time_window_days` before `now` form the prior history used
    /// for serendipity.
    pub fn compute(
        &self,
        lists: &[RecommendationList],
        interactions: &[Interaction],
        time_window_days: u32,
        now: Timestamp,
    ) -> MetricsSnapshot {
        let window_start = now.minus_days(i64::from(time_window_days));
        let index = RelevanceIndex::build(interactions, &window_start);

        let mut profiles: HashMap<UserId, Candidate> = HashMap::new();
        for candidate in lists.iter().flat_map(|l| l.recommendations.iter()) {
            profiles
                .entry(candidate.target_user_id.clone())
                .or_insert_with(|| candidate.clone());
        }

        let mut precision = [Mean::default(); 3];
        let mut ndcg = [Mean::default(); 3];
        let mut map = [Mean::default(); 3];
        let mut mrr = Mean::default();
        let mut intra = Mean::default();
        let mut demographic = Mean::default();
        let mut unseen = Mean::default();
        let mut serendipitous = Mean::default();

        for list in lists {
            let judgments = index.for_user(&list.user_id);
            let items = list.recommendations.as_slice();

            for (slot, k) in K_VALUES.iter().enumerate() {
                precision[slot].push(ranking::precision_at_k(items, judgments, *k));
                ndcg[slot].push(ranking::ndcg_at_k(items, judgments, *k));
                map[slot].push(ranking::average_precision_at_k(items, judgments, *k));
            }
            mrr.push(ranking::reciprocal_rank(items, judgments));

            intra.push_opt(diversity::intra_list_diversity(items));
            demographic.push_opt(diversity::demographic_diversity(items));

            unseen.push_opt(novelty::novelty(items, judgments));
            let context = SerendipityContext {
                judgments,
                profiles: &profiles,
            };
            serendipitous.push_opt(novelty::serendipity(
                items,
                self.serendipity.as_ref(),
                &context,
            ));
        }

        let frequencies = coverage::item_frequencies(lists, interactions);
        let counts: Vec<usize> = frequencies.values().copied().collect();
        let as_f64: Vec<f64> = counts.iter().map(|c| *c as f64).collect();

        MetricsSnapshot {
            snapshot_id: SnapshotId::new(),
            timestamp: now,
            time_window: time_window_days,
            user_count: lists.len(),
            precision: PrecisionMetrics {
                precision_at_5: precision[0].value(),
                precision_at_10: precision[1].value(),
                precision_at_20: precision[2].value(),
            },
            ranking: RankingMetrics {
                ndcg_at_5: ndcg[0].value(),
                ndcg_at_10: ndcg[1].value(),
                ndcg_at_20: ndcg[2].value(),
                map_at_5: map[0].value(),
                map_at_10: map[1].value(),
                map_at_20: map[2].value(),
                mrr: mrr.value(),
            },
            diversity: DiversityMetrics {
                intra_list_diversity: intra.value(),
                inter_list_diversity: diversity::inter_list_diversity(lists),
                temporal_diversity: diversity::temporal_diversity(interactions),
                demographic_diversity: demographic.value(),
                feature_diversity: diversity::feature_diversity(lists),
            },
            coverage: CoverageMetrics {
                user_coverage: coverage::user_coverage(lists, interactions, self.coverage_policy),
                catalog_coverage: coverage::catalog_coverage(&frequencies),
                item_coverage: coverage::item_coverage(&frequencies),
                long_tail_coverage: coverage::long_tail_coverage(&counts),
                gini_coefficient: coverage::gini_coefficient(&as_f64),
            },
            novelty: NoveltyMetrics {
                novelty: unseen.value(),
                serendipity: serendipitous.value(),
            },
        }
    }
}
