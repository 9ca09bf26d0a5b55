//! Diversity measures over candidate features and recommendation lists.
//!
//! Every measure averages over whichever features are present and skips
//! the ones that are missing, so sparse profiles degrade the sample size
//! rather than the result. All values lie in [0, 1].

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::domain::foundation::UserId;
use crate::domain::records::{Candidate, Interaction, RecommendationList};

/// Age gap at which two candidates count as fully dissimilar.
const AGE_SPAN: f64 = 50.0;

/// Plant-based tenure gap (years) at which two candidates count as fully dissimilar.
const TENURE_SPAN: f64 = 10.0;

/// Jaccard similarity of two sets; 0 when both are empty.
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Feature dissimilarity of two candidates.
///
/// Averages the normalized distance of each feature present on both
/// candidates: age gap over 50 years, location inequality, interest
/// Jaccard distance, and tenure gap over 10 years. Returns `None` when the
/// two candidates share no comparable feature.
pub fn feature_dissimilarity(a: &Candidate, b: &Candidate) -> Option<f64> {
    let mut distances = Vec::with_capacity(4);

    if let (Some(x), Some(y)) = (a.age, b.age) {
        distances.push(((x - y).abs() / AGE_SPAN).min(1.0));
    }
    if let (Some(x), Some(y)) = (&a.location, &b.location) {
        distances.push(if x == y { 0.0 } else { 1.0 });
    }
    if let (Some(x), Some(y)) = (&a.interests, &b.interests) {
        distances.push(1.0 - jaccard(x, y));
    }
    if let (Some(x), Some(y)) = (a.years_plant_based, b.years_plant_based) {
        distances.push(((x - y).abs() / TENURE_SPAN).min(1.0));
    }

    mean(distances)
}

/// Mean pairwise dissimilarity within one list.
///
/// Pairs with no comparable feature are skipped; `None` if no pair remains.
pub fn intra_list_diversity(list: &[Candidate]) -> Option<f64> {
    let mut pairs = Vec::new();
    for (i, a) in list.iter().enumerate() {
        for b in &list[i + 1..] {
            if let Some(d) = feature_dissimilarity(a, b) {
                pairs.push(d);
            }
        }
    }
    mean(pairs)
}

/// Mean pairwise Jaccard distance between the target sets of different users.
pub fn inter_list_diversity(lists: &[RecommendationList]) -> f64 {
    let sets: Vec<BTreeSet<&UserId>> = lists
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| l.recommendations.iter().map(|c| &c.target_user_id).collect())
        .collect();

    let mut distances = Vec::new();
    for (i, a) in sets.iter().enumerate() {
        for b in &sets[i + 1..] {
            distances.push(1.0 - jaccard(a, b));
        }
    }
    mean(distances).unwrap_or(0.0)
}

/// How much each user's engaged targets rotate from one active day to the next.
///
/// Interactions are bucketed per user by calendar day; the measure is the
/// mean Jaccard distance between consecutive buckets. Unstamped
/// interactions and users active on fewer than two days are skipped.
pub fn temporal_diversity(interactions: &[Interaction]) -> f64 {
    let mut by_user: HashMap<&UserId, BTreeMap<String, BTreeSet<&UserId>>> = HashMap::new();
    for interaction in interactions {
        if let Some(ts) = interaction.timestamp {
            by_user
                .entry(&interaction.user_id)
                .or_default()
                .entry(ts.day_key())
                .or_default()
                .insert(&interaction.target_user_id);
        }
    }

    let per_user = by_user.values().filter_map(|days| {
        let buckets: Vec<&BTreeSet<&UserId>> = days.values().collect();
        mean(buckets.windows(2).map(|w| 1.0 - jaccard(w[0], w[1])))
    });
    mean(per_user).unwrap_or(0.0)
}

/// Demographic spread of one list: age range over 50 years and the share of
/// distinct locations, averaged over whichever is observable.
pub fn demographic_diversity(list: &[Candidate]) -> Option<f64> {
    let mut components = Vec::with_capacity(2);

    let ages: Vec<f64> = list.iter().filter_map(|c| c.age).collect();
    if ages.len() >= 2 {
        let min = ages.iter().copied().fold(f64::INFINITY, f64::min);
        let max = ages.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        components.push(((max - min) / AGE_SPAN).min(1.0));
    }

    let locations: Vec<&String> = list.iter().filter_map(|c| c.location.as_ref()).collect();
    if locations.len() >= 2 {
        let distinct: HashSet<&&String> = locations.iter().collect();
        components.push((distinct.len() - 1) as f64 / (locations.len() - 1) as f64);
    }

    mean(components)
}

/// Catalog-wide feature variety across all distinct recommended candidates.
///
/// Interests: distinct interests over total interest mentions. Tenure:
/// tenure range over 10 years.
pub fn feature_diversity(lists: &[RecommendationList]) -> f64 {
    let mut unique: HashMap<&UserId, &Candidate> = HashMap::new();
    for candidate in lists.iter().flat_map(|l| l.recommendations.iter()) {
        unique.entry(&candidate.target_user_id).or_insert(candidate);
    }

    let mut components = Vec::with_capacity(2);

    let mut mentions = 0usize;
    let mut distinct: HashSet<&String> = HashSet::new();
    for interests in unique.values().filter_map(|c| c.interests.as_ref()) {
        mentions += interests.len();
        distinct.extend(interests.iter());
    }
    if mentions > 0 {
        components.push(distinct.len() as f64 / mentions as f64);
    }

    let tenures: Vec<f64> = unique.values().filter_map(|c| c.years_plant_based).collect();
    if tenures.len() >= 2 {
        let min = tenures.iter().copied().fold(f64::INFINITY, f64::min);
        let max = tenures.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        components.push(((max - min) / TENURE_SPAN).min(1.0));
    }

    mean(components).unwrap_or(0.0)
}
