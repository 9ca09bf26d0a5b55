//! Revenue: totals, recurring revenue, per-user value and subscription health.

use std::collections::{BTreeMap, BTreeSet};

use super::ratio;
use super::snapshot::RevenueMetrics;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::records::{RevenueRecord, UserRecord};

/// Floor on the purchase interval used by the lifetime-value estimate.
pub const MIN_PURCHASE_INTERVAL_DAYS: f64 = 30.0;

const DAYS_PER_YEAR: f64 = 365.0;

/// Sum of monthly subscription payments.
pub fn monthly_recurring_revenue(records: &[RevenueRecord]) -> f64 {
    records
        .iter()
        .filter(|r| r.is_monthly_subscription())
        .map(RevenueRecord::value)
        .sum()
}

/// Mean days between consecutive purchases, or `None` with fewer than two
/// stamped purchases.
fn mean_purchase_interval(records: &[&RevenueRecord]) -> Option<f64> {
    let mut stamps: Vec<Timestamp> = records.iter().filter_map(|r| r.created_at).collect();
    if stamps.len() < 2 {
        return None;
    }
    stamps.sort();
    let first = stamps[0];
    let last = stamps[stamps.len() - 1];
    Some(last.days_since(&first) / (stamps.len() - 1) as f64)
}

/// Lifetime value of one customer:
/// `avg purchase × 365 / max(avg days between purchases, 30)`.
///
/// A single purchase (or unstamped purchases) uses the 30-day floor.
pub fn customer_lifetime_value(records: &[&RevenueRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let average = records.iter().map(|r| r.value()).sum::<f64>() / records.len() as f64;
    let interval = mean_purchase_interval(records)
        .unwrap_or(MIN_PURCHASE_INTERVAL_DAYS)
        .max(MIN_PURCHASE_INTERVAL_DAYS);
    average * (DAYS_PER_YEAR / interval)
}

/// Computes revenue metrics.
///
/// Paying users are users with at least one positive payment; ARPU and CLV
/// average over them. Conversion is distinct subscribers over the user
/// base, renewal is subscribers with two or more subscription payments
/// over all subscribers.
pub fn revenue(records: &[RevenueRecord], users: &[UserRecord]) -> RevenueMetrics {
    let total_revenue: f64 = records.iter().map(RevenueRecord::value).sum();

    let mut by_user: BTreeMap<&UserId, Vec<&RevenueRecord>> = BTreeMap::new();
    for record in records {
        by_user.entry(&record.user_id).or_default().push(record);
    }

    let paying: Vec<&Vec<&RevenueRecord>> = by_user
        .values()
        .filter(|rs| rs.iter().any(|r| r.value() > 0.0))
        .collect();
    let clv_total: f64 = paying.iter().map(|rs| customer_lifetime_value(rs)).sum();

    let mut subscriptions: BTreeMap<&UserId, usize> = BTreeMap::new();
    for record in records.iter().filter(|r| r.is_subscription()) {
        *subscriptions.entry(&record.user_id).or_insert(0) += 1;
    }
    let renewed = subscriptions.values().filter(|n| **n >= 2).count();

    let user_base: BTreeSet<&UserId> = users.iter().map(|u| &u.id).collect();

    RevenueMetrics {
        total_revenue,
        mrr: monthly_recurring_revenue(records),
        arpu: ratio(total_revenue, paying.len() as f64),
        clv: ratio(clv_total, paying.len() as f64),
        conversion_rate: ratio(subscriptions.len() as f64, user_base.len() as f64).min(1.0),
        renewal_rate: ratio(renewed as f64, subscriptions.len() as f64),
        paying_users: paying.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::{BillingPeriod, RevenueType};

    fn id(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    fn monthly(user: &str, amount: f64) -> RevenueRecord {
        RevenueRecord::new(id(user), amount, RevenueType::Subscription).billed(BillingPeriod::Monthly)
    }

    #[test]
    fn mrr_sums_monthly_subscriptions() {
        let records = vec![monthly("a", 10.0), monthly("a", 10.0)];
        assert_eq!(monthly_recurring_revenue(&records), 20.0);
    }

    #[test]
    fn mrr_ignores_other_billing() {
        let records = vec![
            monthly("a", 10.0),
            RevenueRecord::new(id("b"), 100.0, RevenueType::Subscription)
                .billed(BillingPeriod::Yearly),
            RevenueRecord::new(id("c"), 5.0, RevenueType::Boost),
        ];
        assert_eq!(monthly_recurring_revenue(&records), 10.0);
    }

    #[test]
    fn clv_single_purchase_uses_floor() {
        let record = RevenueRecord::new(id("a"), 10.0, RevenueType::Purchase);
        let clv = customer_lifetime_value(&[&record]);
        assert!((clv - 10.0 * 365.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn clv_uses_purchase_interval() {
        let now = Timestamp::now();
        let first = RevenueRecord::new(id("a"), 20.0, RevenueType::Purchase).at(now.minus_days(146));
        let second = RevenueRecord::new(id("a"), 20.0, RevenueType::Purchase).at(now);
        let clv = customer_lifetime_value(&[&first, &second]);
        assert!((clv - 20.0 * 365.0 / 146.0).abs() < 1e-9);
    }

    #[test]
    fn clv_interval_is_floored() {
        let now = Timestamp::now();
        let first = RevenueRecord::new(id("a"), 10.0, RevenueType::Purchase).at(now.minus_days(2));
        let second = RevenueRecord::new(id("a"), 10.0, RevenueType::Purchase).at(now);
        let clv = customer_lifetime_value(&[&first, &second]);
        assert!((clv - 10.0 * 365.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn rates_over_user_base() {
        let now = Timestamp::now();
        let users: Vec<UserRecord> = ["a", "b", "c", "d"]
            .iter()
            .map(|u| UserRecord::new(id(u), now))
            .collect();
        let records = vec![
            monthly("a", 10.0),
            monthly("a", 10.0),
            monthly("b", 10.0),
            RevenueRecord::new(id("c"), 10.0, RevenueType::Purchase),
        ];

        let m = revenue(&records, &users);
        assert_eq!(m.total_revenue, 40.0);
        assert_eq!(m.mrr, 30.0);
        assert_eq!(m.paying_users, 3);
        assert!((m.arpu - 40.0 / 3.0).abs() < 1e-9);
        assert_eq!(m.conversion_rate, 0.5);
        assert_eq!(m.renewal_rate, 0.5);
    }

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(revenue(&[], &[]), RevenueMetrics::default());
    }
}
