//! Recommendation effectiveness - how good the recommendations are.
//!
//! - `relevance` - per-user judgments derived from the interaction log
//! - `ranking` - precision, NDCG, MAP and MRR for one list
//! - `diversity` - feature, list, temporal and demographic variety
//! - `coverage` - user and catalog coverage, long tail, Gini
//! - `novelty` - novelty and pluggable serendipity scoring
//! - `calculator` - assembles a [`MetricsSnapshot`]
//! - `events` - `MetricsUpdated`, published after each calculation

mod calculator;
mod coverage;
mod diversity;
mod events;
mod novelty;
mod ranking;
mod relevance;
mod snapshot;

pub use calculator::EffectivenessCalculator;
pub use coverage::{
    catalog_coverage, gini_coefficient, item_coverage, item_frequencies, long_tail_coverage,
    user_coverage, CoveragePolicy,
};
pub use diversity::{
    demographic_diversity, feature_diversity, feature_dissimilarity, inter_list_diversity,
    intra_list_diversity, jaccard, temporal_diversity,
};
pub use events::MetricsUpdated;
pub use novelty::{novelty, serendipity, SerendipityContext, SerendipityScorer, UnexpectedRelevance};
pub use ranking::{
    average_precision_at_k, dcg, ndcg_at_k, precision_at_k, reciprocal_rank, K_VALUES,
};
pub use relevance::{RelevanceIndex, UserJudgments};
pub use snapshot::{
    CoverageMetrics, DiversityMetrics, MetricsSnapshot, NoveltyMetrics, PrecisionMetrics,
    RankingMetrics,
};
