//! Rank-aware quality metrics for a single recommendation list.
//!
//! All functions take the candidates in rank order plus the user's
//! judgments. A target that appears more than once in a list only counts
//! at its first position, which keeps every metric inside [0, 1].

use std::collections::HashSet;

use super::relevance::UserJudgments;
use crate::domain::foundation::UserId;
use crate::domain::records::Candidate;

/// Cutoffs evaluated for precision, NDCG and MAP.
pub const K_VALUES: [usize; 3] = [5, 10, 20];

/// Marks each position as a first occurrence or a repeat.
fn first_occurrences(list: &[Candidate]) -> Vec<bool> {
    let mut seen: HashSet<&UserId> = HashSet::new();
    list.iter().map(|c| seen.insert(&c.target_user_id)).collect()
}

/// Precision@K: relevant hits in the top K divided by K itself.
///
/// Lists shorter than K are not rescaled; missing slots count as misses.
pub fn precision_at_k(list: &[Candidate], judgments: &UserJudgments, k: usize) -> f64 {
    if k == 0 {
        return 0.0;
    }
    let firsts = first_occurrences(list);
    let hits = list
        .iter()
        .zip(firsts)
        .take(k)
        .filter(|(c, first)| *first && judgments.relevant.contains(&c.target_user_id))
        .count();
    hits as f64 / k as f64
}

/// Discounted cumulative gain of the first `k` gains.
pub fn dcg(gains: &[f64], k: usize) -> f64 {
    gains
        .iter()
        .take(k)
        .enumerate()
        .map(|(i, gain)| gain / ((i + 2) as f64).log2())
        .sum()
}

/// NDCG@K using graded relevance.
///
/// The ideal ordering is built from every relevance value known for the
/// user, not only the recommended targets, so targets the recommender
/// never surfaced still raise the ideal.
pub fn ndcg_at_k(list: &[Candidate], judgments: &UserJudgments, k: usize) -> f64 {
    let firsts = first_occurrences(list);
    let gains: Vec<f64> = list
        .iter()
        .zip(firsts)
        .map(|(c, first)| {
            if first {
                f64::from(judgments.relevance_of(&c.target_user_id))
            } else {
                0.0
            }
        })
        .collect();

    let ideal = dcg(&judgments.ideal_gains(), k);
    if ideal <= 0.0 {
        return 0.0;
    }
    dcg(&gains, k) / ideal
}

/// Average precision over the top K, normalized by every relevant target
/// known for the user.
pub fn average_precision_at_k(list: &[Candidate], judgments: &UserJudgments, k: usize) -> f64 {
    let total_relevant = judgments.relevant.len();
    if total_relevant == 0 {
        return 0.0;
    }

    let firsts = first_occurrences(list);
    let mut hits = 0usize;
    let mut sum = 0.0;
    for (rank, (candidate, first)) in list.iter().zip(firsts).take(k).enumerate() {
        if first && judgments.relevant.contains(&candidate.target_user_id) {
            hits += 1;
            sum += hits as f64 / (rank + 1) as f64;
        }
    }
    sum / total_relevant as f64
}

/// Reciprocal rank of the first relevant target, 0 if none is relevant.
pub fn reciprocal_rank(list: &[Candidate], judgments: &UserJudgments) -> f64 {
    list.iter()
        .position(|c| judgments.relevant.contains(&c.target_user_id))
        .map(|idx| 1.0 / (idx + 1) as f64)
        .unwrap_or(0.0)
}
