//! Retention: day-N retention, churn and monthly signup cohorts.

use std::collections::BTreeMap;

use super::engagement::WEEKLY_WINDOW_DAYS;
use super::ratio;
use super::snapshot::{CohortRetention, RetentionMetrics};
use crate::domain::foundation::Timestamp;
use crate::domain::records::UserRecord;

/// Checkpoints per cohort: `month_0` through `month_12`.
pub const COHORT_CHECKPOINTS: u32 = 13;

/// Share of users old enough to be measured who were still around N days
/// after signing up.
///
/// Eligible users signed up at least `days` before `now`. An eligible user
/// is retained if their last activity is at or after signup + `days`.
pub fn day_n_retention(users: &[UserRecord], days: i64, now: &Timestamp) -> f64 {
    let cutoff = now.minus_days(days);
    let eligible: Vec<&UserRecord> = users
        .iter()
        .filter(|u| !u.created_at.is_after(&cutoff))
        .collect();

    let retained = eligible
        .iter()
        .filter(|u| {
            let mark = u.created_at.plus_days(days);
            u.last_active.map(|last| !last.is_before(&mark)).unwrap_or(false)
        })
        .count();

    ratio(retained as f64, eligible.len() as f64)
}

/// Churn over a rolling window.
///
/// The base population is users who had signed up before the window opened;
/// those still weekly-active at `now` are retained. Zero when nobody
/// predates the window.
pub fn churn_rate(users: &[UserRecord], window_days: u32, now: &Timestamp) -> f64 {
    let window_start = now.minus_days(i64::from(window_days));
    let population: Vec<&UserRecord> = users
        .iter()
        .filter(|u| u.created_at.is_before(&window_start))
        .collect();
    if population.is_empty() {
        return 0.0;
    }

    let still_active = population
        .iter()
        .filter(|u| u.active_within(now, WEEKLY_WINDOW_DAYS))
        .count();
    1.0 - still_active as f64 / population.len() as f64
}

/// Groups users by signup month and measures activity at each monthly
/// checkpoint after the cohort's first day.
///
/// A user counts as active at checkpoint `m` if their last activity is at
/// or after the cohort start plus `m` months. Checkpoints later than `now`
/// are `None`. Cohorts come back ordered by month.
pub fn cohort_analysis(users: &[UserRecord], now: &Timestamp) -> Vec<CohortRetention> {
    let mut cohorts: BTreeMap<String, (Timestamp, Vec<&UserRecord>)> = BTreeMap::new();
    for user in users {
        cohorts
            .entry(user.created_at.month_key())
            .or_insert_with(|| (user.created_at.start_of_month(), Vec::new()))
            .1
            .push(user);
    }

    cohorts
        .into_iter()
        .map(|(cohort, (start, members))| {
            let checkpoints = (0..COHORT_CHECKPOINTS)
                .map(|month| {
                    let checkpoint = start.plus_months(month)?;
                    if checkpoint.is_after(now) {
                        return None;
                    }
                    let active = members
                        .iter()
                        .filter(|u| {
                            u.last_active
                                .map(|last| !last.is_before(&checkpoint))
                                .unwrap_or(false)
                        })
                        .count();
                    Some(ratio(active as f64, members.len() as f64))
                })
                .collect();

            CohortRetention {
                cohort,
                size: members.len(),
                checkpoints,
            }
        })
        .collect()
}

/// Computes retention metrics as of `now`.
pub fn retention(users: &[UserRecord], window_days: u32, now: &Timestamp) -> RetentionMetrics {
    RetentionMetrics {
        day_1_retention: day_n_retention(users, 1, now),
        day_7_retention: day_n_retention(users, 7, now),
        day_30_retention: day_n_retention(users, 30, now),
        day_90_retention: day_n_retention(users, 90, now),
        churn_rate: churn_rate(users, window_days, now),
        cohorts: cohort_analysis(users, now),
    }
}
