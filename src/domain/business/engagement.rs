//! Engagement: activity rates, per-user usage and conversation volume.

use super::snapshot::EngagementMetrics;
use super::ratio;
use crate::domain::foundation::Timestamp;
use crate::domain::records::{MatchRecord, UserRecord};

/// Activity window for the daily-active count.
pub const DAILY_WINDOW_DAYS: i64 = 1;

/// Activity window for the weekly-active count.
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

/// Share of matches whose conversation got past the opening message.
///
/// Denominator is matches with at least one message; a reply means at
/// least two messages. Zero when no conversation started.
pub fn message_response_rate(matches: &[MatchRecord]) -> f64 {
    let started = matches.iter().filter(|m| m.messages() >= 1).count();
    let answered = matches.iter().filter(|m| m.messages() >= 2).count();
    ratio(answered as f64, started as f64)
}

/// Mean message count over matches with at least one message.
pub fn avg_conversation_length(matches: &[MatchRecord]) -> f64 {
    let started: Vec<u32> = matches
        .iter()
        .map(MatchRecord::messages)
        .filter(|m| *m >= 1)
        .collect();
    let total: u64 = started.iter().map(|m| u64::from(*m)).sum();
    ratio(total as f64, started.len() as f64)
}

/// Computes engagement metrics as of `now`.
pub fn engagement(users: &[UserRecord], matches: &[MatchRecord], now: &Timestamp) -> EngagementMetrics {
    let population = users.len() as f64;

    let daily_active_users = users
        .iter()
        .filter(|u| u.active_within(now, DAILY_WINDOW_DAYS))
        .count();
    let weekly_active_users = users
        .iter()
        .filter(|u| u.active_within(now, WEEKLY_WINDOW_DAYS))
        .count();

    let sessions: f64 = users.iter().map(UserRecord::sessions).sum();
    let duration: f64 = users.iter().map(UserRecord::session_duration).sum();
    let swipes: f64 = users.iter().map(UserRecord::swipes).sum();

    let total_messages: u64 = matches.iter().map(|m| u64::from(m.messages())).sum();

    EngagementMetrics {
        daily_active_users,
        weekly_active_users,
        daily_active_rate: ratio(daily_active_users as f64, population),
        weekly_active_rate: ratio(weekly_active_users as f64, population),
        avg_sessions_per_user: ratio(sessions, population),
        avg_session_duration: ratio(duration, population),
        avg_swipes_per_user: ratio(swipes, population),
        total_messages,
        avg_messages_per_match: ratio(total_messages as f64, matches.len() as f64),
        message_response_rate: message_response_rate(matches),
        avg_conversation_length: avg_conversation_length(matches),
    }
}
