//! Interaction events between users.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

/// Kind of interaction a user performed on a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Like,
    SuperLike,
    Match,
    Message,
    Date,
    #[serde(other)]
    Other,
}

impl Action {
    /// Graded relevance of this action.
    ///
    /// like=1, super_like=2, match=3, message=4, date=5, anything else 0.
    /// Ranking formulas depend on this exact ordering.
    pub fn relevance(&self) -> u8 {
        match self {
            Action::Like => 1,
            Action::SuperLike => 2,
            Action::Match => 3,
            Action::Message => 4,
            Action::Date => 5,
            Action::View | Action::Other => 0,
        }
    }

    /// Whether the action counts as a relevant hit for precision and MAP.
    pub fn is_qualifying(&self) -> bool {
        matches!(self, Action::Like | Action::Match)
    }
}

/// A single logged interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub user_id: UserId,
    pub target_user_id: UserId,
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

impl Interaction {
    /// Creates an interaction without a timestamp.
    pub fn new(user_id: UserId, target_user_id: UserId, action: Action) -> Self {
        Self {
            user_id,
            target_user_id,
            action,
            timestamp: None,
        }
    }

    pub fn at(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relevance_mapping_is_fixed() {
        assert_eq!(Action::View.relevance(), 0);
        assert_eq!(Action::Like.relevance(), 1);
        assert_eq!(Action::SuperLike.relevance(), 2);
        assert_eq!(Action::Match.relevance(), 3);
        assert_eq!(Action::Message.relevance(), 4);
        assert_eq!(Action::Date.relevance(), 5);
        assert_eq!(Action::Other.relevance(), 0);
    }

    #[test]
    fn only_like_and_match_qualify() {
        assert!(Action::Like.is_qualifying());
        assert!(Action::Match.is_qualifying());
        assert!(!Action::SuperLike.is_qualifying());
        assert!(!Action::Date.is_qualifying());
        assert!(!Action::View.is_qualifying());
    }

    #[test]
    fn deserializes_snake_case_actions() {
        let i: Interaction = serde_json::from_str(
            r#"{"userId": 1, "targetUserId": 10, "action": "super_like"}"#,
        )
        .unwrap();
        assert_eq!(i.action, Action::SuperLike);
        assert!(i.timestamp.is_none());
    }

    #[test]
    fn unknown_action_maps_to_other() {
        let i: Interaction = serde_json::from_str(
            r#"{"userId": 1, "targetUserId": 10, "action": "block", "timestamp": "2024-05-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(i.action, Action::Other);
        assert!(i.timestamp.is_some());
    }
}
