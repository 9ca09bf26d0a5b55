//! Business impact - what the recommendations do for the platform.
//!
//! - `engagement` - active users, usage and conversation volume
//! - `retention` - day-N retention, churn and signup cohorts
//! - `revenue` - totals, MRR, ARPU, CLV, conversion and renewal
//! - `outcomes` - conversion funnel, satisfaction and network effects
//! - `calculator` - assembles a [`BusinessSnapshot`]
//! - `events` - `BusinessMetricsUpdated`, published after each calculation

mod calculator;
mod engagement;
mod events;
mod outcomes;
mod retention;
mod revenue;
mod snapshot;

pub use calculator::BusinessCalculator;
pub use engagement::{
    avg_conversation_length, engagement, message_response_rate, DAILY_WINDOW_DAYS,
    WEEKLY_WINDOW_DAYS,
};
pub use events::BusinessMetricsUpdated;
pub use outcomes::{conversion, network_effects, satisfaction, ENGAGED_MATCH_MESSAGES};
pub use retention::{churn_rate, cohort_analysis, day_n_retention, retention, COHORT_CHECKPOINTS};
pub use revenue::{
    customer_lifetime_value, monthly_recurring_revenue, revenue, MIN_PURCHASE_INTERVAL_DAYS,
};
pub use snapshot::{
    BusinessSnapshot, CohortRetention, ConversionMetrics, EngagementMetrics, NetworkMetrics,
    RetentionMetrics, RevenueMetrics, SatisfactionMetrics,
};

/// Division that yields 0 for a zero or non-finite denominator.
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        0.0
    } else {
        numerator / denominator
    }
}
