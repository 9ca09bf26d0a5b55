//! User and match records used by the business engine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

/// A platform user with activity counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub created_at: Timestamp,
    #[serde(default)]
    pub last_active: Option<Timestamp>,
    #[serde(default)]
    pub sessions_last_week: Option<f64>,
    #[serde(default)]
    pub swipes_last_week: Option<f64>,
    /// Average session length in minutes.
    #[serde(default)]
    pub avg_session_duration: Option<f64>,
}

impl UserRecord {
    pub fn new(id: UserId, created_at: Timestamp) -> Self {
        Self {
            id,
            created_at,
            last_active: None,
            sessions_last_week: None,
            swipes_last_week: None,
            avg_session_duration: None,
        }
    }

    pub fn last_seen(mut self, last_active: Timestamp) -> Self {
        self.last_active = Some(last_active);
        self
    }

    /// True if the user was active within `days` days before `now`.
    pub fn active_within(&self, now: &Timestamp, days: i64) -> bool {
        self.last_active
            .map(|last| !last.is_before(&now.minus_days(days)))
            .unwrap_or(false)
    }

    pub fn sessions(&self) -> f64 {
        self.sessions_last_week.unwrap_or(0.0)
    }

    pub fn swipes(&self) -> f64 {
        self.swipes_last_week.unwrap_or(0.0)
    }

    pub fn session_duration(&self) -> f64 {
        self.avg_session_duration.unwrap_or(0.0)
    }
}

/// A match between users and its conversation volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    #[serde(default)]
    pub message_count: Option<u32>,
    #[serde(default)]
    pub participants: Option<Vec<UserId>>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl MatchRecord {
    pub fn with_messages(count: u32) -> Self {
        Self {
            message_count: Some(count),
            ..Self::default()
        }
    }

    pub fn between(mut self, a: UserId, b: UserId) -> Self {
        self.participants = Some(vec![a, b]);
        self
    }

    pub fn messages(&self) -> u32 {
        self.message_count.unwrap_or(0)
    }

    pub fn participant_ids(&self) -> &[UserId] {
        self.participants.as_deref().unwrap_or(&[])
    }
}
