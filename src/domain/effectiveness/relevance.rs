//! Per-user relevance judgments derived from the interaction log.

use std::collections::{HashMap, HashSet};

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::records::Interaction;

/// What one user is known to have done with each target.
#[derive(Debug, Clone, Default)]
pub struct UserJudgments {
    /// Highest graded relevance seen per target.
    pub graded: HashMap<UserId, u8>,
    /// Targets with a qualifying (like or match) interaction.
    pub relevant: HashSet<UserId>,
    /// Every target the user interacted with in any way.
    pub seen: HashSet<UserId>,
    /// Targets interacted with before the evaluation window opened.
    pub prior: HashSet<UserId>,
    /// Highest graded relevance per target inside the evaluation window.
    pub recent: HashMap<UserId, u8>,
}

impl UserJudgments {
    /// All known graded relevance values, highest first.
    pub fn ideal_gains(&self) -> Vec<f64> {
        let mut gains: Vec<f64> = self
            .graded
            .values()
            .filter(|r| **r > 0)
            .map(|r| f64::from(*r))
            .collect();
        gains.sort_by(|a, b| b.total_cmp(a));
        gains
    }

    pub fn relevance_of(&self, target: &UserId) -> u8 {
        self.graded.get(target).copied().unwrap_or(0)
    }
}

/// Relevance judgments for every user in an interaction log.
#[derive(Debug, Clone, Default)]
pub struct RelevanceIndex {
    users: HashMap<UserId, UserJudgments>,
    empty: UserJudgments,
}

impl RelevanceIndex {
    /// Indexes an interaction log.
    ///
    /// Interactions stamped before `window_start` are treated as prior
    /// history; unstamped interactions count as inside the window.
    pub fn build(interactions: &[Interaction], window_start: &Timestamp) -> Self {
        let mut users: HashMap<UserId, UserJudgments> = HashMap::new();

        for interaction in interactions {
            let judgments = users.entry(interaction.user_id.clone()).or_default();
            let target = interaction.target_user_id.clone();
            let relevance = interaction.action.relevance();

            let graded = judgments.graded.entry(target.clone()).or_insert(0);
            *graded = (*graded).max(relevance);

            if interaction.action.is_qualifying() {
                judgments.relevant.insert(target.clone());
            }
            judgments.seen.insert(target.clone());

            let is_prior = interaction
                .timestamp
                .map(|ts| ts.is_before(window_start))
                .unwrap_or(false);
            if is_prior {
                judgments.prior.insert(target);
            } else {
                let recent = judgments.recent.entry(target).or_insert(0);
                *recent = (*recent).max(relevance);
            }
        }

        Self {
            users,
            empty: UserJudgments::default(),
        }
    }

    /// Judgments for a user; an empty set if the user never interacted.
    pub fn for_user(&self, user: &UserId) -> &UserJudgments {
        self.users.get(user).unwrap_or(&self.empty)
    }

    /// Users that appear as the actor of at least one interaction.
    pub fn users(&self) -> impl Iterator<Item = &UserId> {
        self.users.keys()
    }
}
