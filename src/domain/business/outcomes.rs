//! Conversion, satisfaction and network-effect measures.
//!
//! All values are deterministic functions of the same user, match and
//! revenue records the other business metrics read. Rates lie in [0, 1];
//! averages are non-negative.

use std::collections::BTreeSet;

use super::ratio;
use super::snapshot::{
    ConversionMetrics, EngagementMetrics, NetworkMetrics, RetentionMetrics, RevenueMetrics,
    SatisfactionMetrics,
};
use crate::domain::foundation::UserId;
use crate::domain::records::{MatchRecord, UserRecord};

/// Messages a conversation needs before the match counts as engaged.
pub const ENGAGED_MATCH_MESSAGES: u32 = 10;

const RESPONSE_WEIGHT: f64 = 0.4;
const ACTIVITY_WEIGHT: f64 = 0.3;
const RETENTION_WEIGHT: f64 = 0.3;

/// How matches turn into conversations and users into payers.
pub fn conversion(
    users: &[UserRecord],
    matches: &[MatchRecord],
    revenue: &RevenueMetrics,
) -> ConversionMetrics {
    let population = users.len() as f64;
    let messaged = matches.iter().filter(|m| m.messages() >= 1).count();

    ConversionMetrics {
        matches_per_user: ratio(matches.len() as f64, population),
        message_conversion_rate: ratio(messaged as f64, matches.len() as f64),
        paid_conversion_rate: ratio(revenue.paying_users as f64, population).min(1.0),
    }
}

/// Composite satisfaction proxy.
///
/// `0.4·response rate + 0.3·weekly active rate + 0.3·day-30 retention`.
pub fn satisfaction(
    matches: &[MatchRecord],
    engagement: &EngagementMetrics,
    retention: &RetentionMetrics,
) -> SatisfactionMetrics {
    let engaged = matches
        .iter()
        .filter(|m| m.messages() >= ENGAGED_MATCH_MESSAGES)
        .count();

    let score = RESPONSE_WEIGHT * engagement.message_response_rate
        + ACTIVITY_WEIGHT * engagement.weekly_active_rate
        + RETENTION_WEIGHT * retention.day_30_retention;

    SatisfactionMetrics {
        satisfaction_score: score.clamp(0.0, 1.0),
        engaged_match_rate: ratio(engaged as f64, matches.len() as f64),
    }
}

/// Shape of the match graph over the known user base.
///
/// Only participants that are known users are counted, and a match lists
/// its participants as one connected group.
pub fn network_effects(users: &[UserRecord], matches: &[MatchRecord]) -> NetworkMetrics {
    let known: BTreeSet<&UserId> = users.iter().map(|u| &u.id).collect();
    let n = known.len();

    let mut connected: BTreeSet<&UserId> = BTreeSet::new();
    let mut edges: BTreeSet<(&UserId, &UserId)> = BTreeSet::new();
    for record in matches {
        let members: BTreeSet<&UserId> = record
            .participant_ids()
            .iter()
            .filter(|p| known.contains(p))
            .collect();
        let members: Vec<&UserId> = members.into_iter().collect();
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                edges.insert((*a, *b));
                connected.insert(*a);
                connected.insert(*b);
            }
        }
    }

    let possible = (n * n.saturating_sub(1)) as f64 / 2.0;
    NetworkMetrics {
        connected_user_rate: ratio(connected.len() as f64, n as f64),
        network_density: ratio(edges.len() as f64, possible),
        avg_connections_per_user: ratio(2.0 * edges.len() as f64, n as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn users(n: u64) -> Vec<UserRecord> {
        let now = Timestamp::now();
        (1..=n).map(|i| UserRecord::new(UserId::from(i), now)).collect()
    }

    fn pair(a: u64, b: u64, messages: u32) -> MatchRecord {
        MatchRecord::with_messages(messages).between(UserId::from(a), UserId::from(b))
    }

    #[test]
    fn conversion_rates() {
        let matches = vec![pair(1, 2, 3), pair(3, 4, 0)];
        let revenue = RevenueMetrics {
            paying_users: 1,
            ..RevenueMetrics::default()
        };

        let m = conversion(&users(4), &matches, &revenue);
        assert_eq!(m.matches_per_user, 0.5);
        assert_eq!(m.message_conversion_rate, 0.5);
        assert_eq!(m.paid_conversion_rate, 0.25);
    }

    #[test]
    fn satisfaction_blends_inputs() {
        let engagement = EngagementMetrics {
            message_response_rate: 1.0,
            weekly_active_rate: 0.5,
            ..EngagementMetrics::default()
        };
        let retention = RetentionMetrics {
            day_30_retention: 0.0,
            ..RetentionMetrics::default()
        };
        let matches = vec![pair(1, 2, 12), pair(1, 3, 2)];

        let m = satisfaction(&matches, &engagement, &retention);
        assert!((m.satisfaction_score - 0.55).abs() < 1e-12);
        assert_eq!(m.engaged_match_rate, 0.5);
    }

    #[test]
    fn network_of_one_edge() {
        let matches = vec![pair(1, 2, 0), pair(2, 1, 4), pair(1, 99, 1)];

        let m = network_effects(&users(4), &matches);
        assert_eq!(m.connected_user_rate, 0.5);
        assert!((m.network_density - 1.0 / 6.0).abs() < 1e-12);
        assert_eq!(m.avg_connections_per_user, 0.5);
    }

    #[test]
    fn network_without_users_is_zero() {
        assert_eq!(network_effects(&[], &[pair(1, 2, 1)]), NetworkMetrics::default());
    }
}
