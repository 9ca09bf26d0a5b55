//! Revenue records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

/// Category of a revenue record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueType {
    Subscription,
    Purchase,
    Boost,
    #[serde(other)]
    Other,
}

/// Billing cadence of a subscription payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    Monthly,
    Quarterly,
    Yearly,
    #[serde(other)]
    Other,
}

/// A single payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueRecord {
    pub user_id: UserId,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: RevenueType,
    #[serde(default)]
    pub billing_period: Option<BillingPeriod>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

impl RevenueRecord {
    pub fn new(user_id: UserId, amount: f64, kind: RevenueType) -> Self {
        Self {
            user_id,
            amount,
            kind,
            billing_period: None,
            created_at: None,
        }
    }

    pub fn billed(mut self, period: BillingPeriod) -> Self {
        self.billing_period = Some(period);
        self
    }

    pub fn at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Amount with non-finite values treated as zero.
    pub fn value(&self) -> f64 {
        if self.amount.is_finite() {
            self.amount
        } else {
            0.0
        }
    }

    pub fn is_subscription(&self) -> bool {
        self.kind == RevenueType::Subscription
    }

    /// Subscription billed monthly; the only records counted toward MRR.
    pub fn is_monthly_subscription(&self) -> bool {
        self.is_subscription() && self.billing_period == Some(BillingPeriod::Monthly)
    }
}
