//! Coverage and popularity-concentration measures.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::foundation::UserId;
use crate::domain::records::{Interaction, RecommendationList};

/// Share of recommendation volume that defines the long tail.
const LONG_TAIL_VOLUME_SHARE: f64 = 0.2;

/// How the user-coverage denominator is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoveragePolicy {
    /// Denominator is every distinct user seen in recommendations or
    /// interactions.
    #[default]
    ObservedPopulation,
    /// Numerator and denominator both come from users with at least one
    /// recommendation, so any non-empty input scores 1.0.
    Legacy,
}

/// Share of users who received at least one recommendation.
pub fn user_coverage(
    lists: &[RecommendationList],
    interactions: &[Interaction],
    policy: CoveragePolicy,
) -> f64 {
    let served: BTreeSet<&UserId> = lists
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| &l.user_id)
        .collect();

    let population: BTreeSet<&UserId> = match policy {
        CoveragePolicy::Legacy => served.clone(),
        CoveragePolicy::ObservedPopulation => lists
            .iter()
            .map(|l| &l.user_id)
            .chain(interactions.iter().map(|i| &i.user_id))
            .collect(),
    };

    if population.is_empty() {
        return 0.0;
    }
    served.len() as f64 / population.len() as f64
}

/// How often each target was recommended, over the whole known catalog.
///
/// The catalog is every target that was recommended or interacted with;
/// targets never recommended carry a frequency of zero.
pub fn item_frequencies(
    lists: &[RecommendationList],
    interactions: &[Interaction],
) -> BTreeMap<UserId, usize> {
    let mut frequencies: BTreeMap<UserId, usize> = interactions
        .iter()
        .map(|i| (i.target_user_id.clone(), 0))
        .collect();
    for candidate in lists.iter().flat_map(|l| l.recommendations.iter()) {
        *frequencies.entry(candidate.target_user_id.clone()).or_insert(0) += 1;
    }
    frequencies
}

/// Number of distinct recommended targets.
pub fn item_coverage(frequencies: &BTreeMap<UserId, usize>) -> usize {
    frequencies.values().filter(|f| **f > 0).count()
}

/// Distinct recommended targets over the known catalog size.
pub fn catalog_coverage(frequencies: &BTreeMap<UserId, usize>) -> f64 {
    if frequencies.is_empty() {
        return 0.0;
    }
    item_coverage(frequencies) as f64 / frequencies.len() as f64
}

/// Share of recommended items that sit in the long tail.
///
/// Items are ordered by ascending frequency; an item is in the tail while
/// the cumulative frequency up to and including it stays within the
/// bottom 20% of total recommendation volume. Zero-frequency items are
/// not recommended and are ignored.
pub fn long_tail_coverage(frequencies: &[usize]) -> f64 {
    let mut recommended: Vec<usize> = frequencies.iter().copied().filter(|f| *f > 0).collect();
    if recommended.is_empty() {
        return 0.0;
    }
    recommended.sort_unstable();

    let total: usize = recommended.iter().sum();
    let mut cumulative = 0usize;
    let mut tail = 0usize;
    for frequency in &recommended {
        cumulative += frequency;
        if cumulative as f64 / total as f64 <= LONG_TAIL_VOLUME_SHARE + f64::EPSILON {
            tail += 1;
        } else {
            break;
        }
    }
    tail as f64 / recommended.len() as f64
}

/// Gini coefficient of a frequency distribution.
///
/// With frequencies sorted ascending as `x_1..x_n`:
/// `G = Σ (2i - n - 1)·x_i / (n·Σx)`. Zero when every frequency is zero.
pub fn gini_coefficient(frequencies: &[f64]) -> f64 {
    let n = frequencies.len();
    let total: f64 = frequencies.iter().sum();
    if n == 0 || total <= 0.0 {
        return 0.0;
    }

    let mut sorted = frequencies.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, x)| (2.0 * (i + 1) as f64 - n as f64 - 1.0) * x)
        .sum();
    (weighted / (n as f64 * total)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::{Action, Candidate};

    fn uid(n: u64) -> UserId {
        UserId::from(n)
    }

    fn rec(user: u64, targets: &[u64]) -> RecommendationList {
        RecommendationList::new(
            uid(user),
            targets.iter().map(|t| Candidate::new(uid(*t))).collect(),
        )
    }

    #[test]
    fn legacy_user_coverage_is_always_full() {
        let lists = vec![rec(1, &[10]), rec(2, &[])];
        let log = vec![Interaction::new(uid(3), uid(10), Action::Like)];
        assert_eq!(user_coverage(&lists, &log, CoveragePolicy::Legacy), 1.0);
    }

    #[test]
    fn observed_user_coverage_counts_unserved_users() {
        let lists = vec![rec(1, &[10]), rec(2, &[])];
        let log = vec![Interaction::new(uid(3), uid(10), Action::Like)];
        let coverage = user_coverage(&lists, &log, CoveragePolicy::ObservedPopulation);
        assert!((coverage - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn user_coverage_empty_input_is_zero() {
        assert_eq!(user_coverage(&[], &[], CoveragePolicy::ObservedPopulation), 0.0);
        assert_eq!(user_coverage(&[], &[], CoveragePolicy::Legacy), 0.0);
    }

    #[test]
    fn frequencies_include_interacted_catalog() {
        let lists = vec![rec(1, &[10, 11]), rec(2, &[10])];
        let log = vec![Interaction::new(uid(1), uid(12), Action::View)];
        let freq = item_frequencies(&lists, &log);

        assert_eq!(freq.get(&uid(10)), Some(&2));
        assert_eq!(freq.get(&uid(12)), Some(&0));
        assert_eq!(item_coverage(&freq), 2);
        assert!((catalog_coverage(&freq) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn gini_uniform_is_zero() {
        assert_eq!(gini_coefficient(&[3.0, 3.0, 3.0, 3.0]), 0.0);
    }

    #[test]
    fn gini_concentrated_is_high() {
        let g = gini_coefficient(&[0.0, 0.0, 0.0, 10.0]);
        assert!((g - 0.75).abs() < 1e-12);
    }

    #[test]
    fn gini_all_zero_is_zero() {
        assert_eq!(gini_coefficient(&[0.0, 0.0]), 0.0);
        assert_eq!(gini_coefficient(&[]), 0.0);
    }

    #[test]
    fn gini_ignores_input_order() {
        assert_eq!(
            gini_coefficient(&[10.0, 0.0, 5.0]),
            gini_coefficient(&[0.0, 5.0, 10.0])
        );
    }

    #[test]
    fn long_tail_uniform_distribution() {
        assert!((long_tail_coverage(&[1; 10]) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn long_tail_skewed_distribution() {
        // 1 + 1 + 1 = 3% of volume sits below the head item.
        assert!((long_tail_coverage(&[1, 1, 1, 97]) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn long_tail_single_item_has_no_tail() {
        assert_eq!(long_tail_coverage(&[5]), 0.0);
        assert_eq!(long_tail_coverage(&[0, 0]), 0.0);
    }
}
