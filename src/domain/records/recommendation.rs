//! Ranked recommendation lists and their candidates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::UserId;

/// A ranked list of candidates recommended to one user.
///
/// The order of `recommendations` is the rank order and is never re-sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationList {
    pub user_id: UserId,
    #[serde(default)]
    pub recommendations: Vec<Candidate>,
}

impl RecommendationList {
    /// Creates a list for a user from candidates in rank order.
    pub fn new(user_id: UserId, recommendations: Vec<Candidate>) -> Self {
        Self {
            user_id,
            recommendations,
        }
    }

    /// Returns the top `k` candidates (fewer if the list is shorter).
    pub fn top(&self, k: usize) -> &[Candidate] {
        &self.recommendations[..k.min(self.recommendations.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}

/// A recommended target user with optional profile features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub target_user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_plant_based: Option<f64>,
}

impl Candidate {
    /// Creates a candidate with no known features.
    pub fn new(target_user_id: UserId) -> Self {
        Self {
            target_user_id,
            age: None,
            location: None,
            interests: None,
            years_plant_based: None,
        }
    }

    pub fn with_age(mut self, age: f64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = Some(interests.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_years_plant_based(mut self, years: f64) -> Self {
        self.years_plant_based = Some(years);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_candidate() {
        let list: RecommendationList = serde_json::from_str(
            r#"{"userId": 1, "recommendations": [{"targetUserId": 10}, {"targetUserId": "11"}]}"#,
        )
        .unwrap();

        assert_eq!(list.user_id.as_str(), "1");
        assert_eq!(list.recommendations.len(), 2);
        assert!(list.recommendations[0].age.is_none());
        assert_eq!(list.recommendations[1].target_user_id.as_str(), "11");
    }

    #[test]
    fn deserializes_features() {
        let candidate: Candidate = serde_json::from_str(
            r#"{"targetUserId": 3, "age": 29, "location": "Berlin",
                "interests": ["hiking", "cooking", "hiking"], "yearsPlantBased": 4.5}"#,
        )
        .unwrap();

        assert_eq!(candidate.age, Some(29.0));
        assert_eq!(candidate.location.as_deref(), Some("Berlin"));
        assert_eq!(candidate.interests.as_ref().map(|s| s.len()), Some(2));
        assert_eq!(candidate.years_plant_based, Some(4.5));
    }

    #[test]
    fn missing_recommendations_field_is_empty_list() {
        let list: RecommendationList = serde_json::from_str(r#"{"userId": "u"}"#).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn top_truncates_to_list_length() {
        let list = RecommendationList::new(
            UserId::from(1),
            vec![Candidate::new(UserId::from(2)), Candidate::new(UserId::from(3))],
        );
        assert_eq!(list.top(5).len(), 2);
        assert_eq!(list.top(1).len(), 1);
    }
}
