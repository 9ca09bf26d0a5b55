//! Input records supplied by collaborators.
//!
//! These are caller-owned shapes deserialized from JSON. The engines only
//! read the documented fields; optional fields fall back to zero or
//! "unknown" through the accessor methods rather than failing.

mod interaction;
mod recommendation;
mod revenue;
mod user;

pub use interaction::{Action, Interaction};
pub use recommendation::{Candidate, RecommendationList};
pub use revenue::{BillingPeriod, RevenueRecord, RevenueType};
pub use user::{MatchRecord, UserRecord};
