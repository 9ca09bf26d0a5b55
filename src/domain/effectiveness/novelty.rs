//! Novelty and serendipity of recommendation lists.

use std::collections::HashMap;

use super::diversity::feature_dissimilarity;
use super::relevance::UserJudgments;
use crate::domain::foundation::UserId;
use crate::domain::records::Candidate;

/// Highest graded relevance, used to normalize relevance into [0, 1].
const MAX_RELEVANCE: f64 = 5.0;

/// Fraction of a list's targets the user has never interacted with.
///
/// `None` for an empty list.
pub fn novelty(list: &[Candidate], judgments: &UserJudgments) -> Option<f64> {
    if list.is_empty() {
        return None;
    }
    let unseen = list
        .iter()
        .filter(|c| !judgments.seen.contains(&c.target_user_id))
        .count();
    Some(unseen as f64 / list.len() as f64)
}

/// Everything a serendipity scorer may consult for one user.
pub struct SerendipityContext<'a> {
    /// The user's judgments, split into prior history and in-window outcomes.
    pub judgments: &'a UserJudgments,
    /// Known feature profiles for every recommended target.
    pub profiles: &'a HashMap<UserId, Candidate>,
}

/// Scores how unexpected yet relevant a single recommendation was.
///
/// Implementations must return a value in [0, 1] and must return 0 for
/// targets already in the user's prior history.
pub trait SerendipityScorer: Send + Sync {
    fn score(&self, candidate: &Candidate, context: &SerendipityContext<'_>) -> f64;

    /// Scorer name for logging.
    fn name(&self) -> &'static str;
}

/// Unexpectedness × relevance.
///
/// Unexpectedness is the mean feature dissimilarity between the candidate
/// and the profiles of targets in the user's prior history (1.0 if nothing
/// comparable is known). Relevance is the in-window graded relevance over 5.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnexpectedRelevance;

impl SerendipityScorer for UnexpectedRelevance {
    fn score(&self, candidate: &Candidate, context: &SerendipityContext<'_>) -> f64 {
        let judgments = context.judgments;
        if judgments.prior.contains(&candidate.target_user_id) {
            return 0.0;
        }

        let relevance = judgments
            .recent
            .get(&candidate.target_user_id)
            .map(|r| f64::from(*r) / MAX_RELEVANCE)
            .unwrap_or(0.0);
        if relevance <= 0.0 {
            return 0.0;
        }

        let distances: Vec<f64> = judgments
            .prior
            .iter()
            .filter_map(|target| context.profiles.get(target))
            .filter_map(|profile| feature_dissimilarity(candidate, profile))
            .collect();
        let unexpectedness = if distances.is_empty() {
            1.0
        } else {
            distances.iter().sum::<f64>() / distances.len() as f64
        };

        (unexpectedness * relevance).clamp(0.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "unexpected_relevance"
    }
}

/// Mean serendipity across a list, `None` for an empty list.
pub fn serendipity(
    list: &[Candidate],
    scorer: &dyn SerendipityScorer,
    context: &SerendipityContext<'_>,
) -> Option<f64> {
    if list.is_empty() {
        return None;
    }
    let total: f64 = list
        .iter()
        .map(|c| scorer.score(c, context).clamp(0.0, 1.0))
        .sum();
    Some(total / list.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(n: u64) -> UserId {
        UserId::from(n)
    }

    fn list(ids: &[u64]) -> Vec<Candidate> {
        ids.iter().map(|id| Candidate::new(uid(*id))).collect()
    }

    #[test]
    fn novelty_counts_unseen_targets() {
        let judgments = UserJudgments {
            seen: [uid(10)].into_iter().collect(),
            ..UserJudgments::default()
        };
        assert_eq!(novelty(&list(&[10, 11, 12, 13]), &judgments), Some(0.75));
        assert_eq!(novelty(&[], &judgments), None);
    }

    #[test]
    fn serendipity_zero_when_list_is_history() {
        let judgments = UserJudgments {
            prior: [uid(10), uid(11)].into_iter().collect(),
            recent: [(uid(10), 5)].into_iter().collect(),
            ..UserJudgments::default()
        };
        let profiles = HashMap::new();
        let context = SerendipityContext {
            judgments: &judgments,
            profiles: &profiles,
        };

        let score = serendipity(&list(&[10, 11]), &UnexpectedRelevance, &context);
        assert_eq!(score, Some(0.0));
    }

    #[test]
    fn serendipity_rewards_unexpected_relevant_hits() {
        let judgments = UserJudgments {
            prior: [uid(1)].into_iter().collect(),
            recent: [(uid(20), 5)].into_iter().collect(),
            ..UserJudgments::default()
        };
        let mut profiles = HashMap::new();
        profiles.insert(uid(1), Candidate::new(uid(1)).with_location("Paris"));
        let context = SerendipityContext {
            judgments: &judgments,
            profiles: &profiles,
        };

        let surprising = Candidate::new(uid(20)).with_location("Lima");
        assert_eq!(UnexpectedRelevance.score(&surprising, &context), 1.0);

        let expected = Candidate::new(uid(20)).with_location("Paris");
        assert_eq!(UnexpectedRelevance.score(&expected, &context), 0.0);
    }

    #[test]
    fn serendipity_scales_with_relevance() {
        let judgments = UserJudgments {
            recent: [(uid(20), 1)].into_iter().collect(),
            ..UserJudgments::default()
        };
        let profiles = HashMap::new();
        let context = SerendipityContext {
            judgments: &judgments,
            profiles: &profiles,
        };
        let score = UnexpectedRelevance.score(&Candidate::new(uid(20)), &context);
        assert!((score - 0.2).abs() < 1e-12);
    }
}
