//! Business Calculator - turns platform records into a snapshot.

use super::engagement::engagement;
use super::outcomes::{conversion, network_effects, satisfaction};
use super::retention::retention;
use super::revenue::revenue;
use super::snapshot::BusinessSnapshot;
use crate::domain::foundation::{SnapshotId, Timestamp};
use crate::domain::records::{MatchRecord, RevenueRecord, UserRecord};

/// Pure calculator for business-impact metrics.
pub struct BusinessCalculator;

impl BusinessCalculator {
    /// Computes every business metric as of `now`.
    ///
    /// `time_window_days` sets the churn window; the other windows (1, 7,
    /// 30 and 90 days, monthly cohorts) are fixed.
    pub fn compute(
        users: &[UserRecord],
        matches: &[MatchRecord],
        revenue_records: &[RevenueRecord],
        time_window_days: u32,
        now: Timestamp,
    ) -> BusinessSnapshot {
        let engagement = engagement(users, matches, &now);
        let retention = retention(users, time_window_days, &now);
        let revenue = revenue(revenue_records, users);
        let conversion = conversion(users, matches, &revenue);
        let satisfaction = satisfaction(matches, &engagement, &retention);
        let network_effects = network_effects(users, matches);

        BusinessSnapshot {
            snapshot_id: SnapshotId::new(),
            timestamp: now,
            time_window: time_window_days,
            user_count: users.len(),
            engagement,
            retention,
            revenue,
            conversion,
            satisfaction,
            network_effects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::benchmark::{MetricFamily, MetricSource};
    use crate::domain::foundation::UserId;
    use crate::domain::records::{BillingPeriod, RevenueType};

    #[test]
    fn empty_input_yields_zeros() {
        let snapshot = BusinessCalculator::compute(&[], &[], &[], 30, Timestamp::now());

        for family in MetricFamily::BUSINESS {
            for (key, value) in snapshot.family_values(family) {
                assert_eq!(value, 0.0, "{} should be zero", key);
            }
        }
        assert!(snapshot.retention.cohorts.is_empty());
    }

    #[test]
    fn headline_metrics_from_small_population() {
        let now = Timestamp::now();
        let a = UserId::new("a").unwrap();
        let b = UserId::new("b").unwrap();
        let users = vec![
            UserRecord::new(a.clone(), now.minus_days(60)).last_seen(now),
            UserRecord::new(b.clone(), now.minus_days(60)).last_seen(now.minus_days(45)),
        ];
        let matches = vec![MatchRecord::with_messages(12).between(a.clone(), b.clone())];
        let revenue = vec![
            RevenueRecord::new(a.clone(), 10.0, RevenueType::Subscription)
                .billed(BillingPeriod::Monthly),
            RevenueRecord::new(a, 10.0, RevenueType::Subscription).billed(BillingPeriod::Monthly),
        ];

        let s = BusinessCalculator::compute(&users, &matches, &revenue, 30, now);

        assert_eq!(s.engagement.weekly_active_rate, 0.5);
        assert_eq!(s.retention.day_30_retention, 0.5);
        assert_eq!(s.retention.churn_rate, 0.5);
        assert_eq!(s.revenue.mrr, 20.0);
        assert_eq!(s.revenue.renewal_rate, 1.0);
        assert_eq!(s.network_effects.connected_user_rate, 1.0);
        assert_eq!(s.satisfaction.engaged_match_rate, 1.0);
        assert_eq!(s.time_window, 30);
        assert_eq!(s.user_count, 2);
    }
}
