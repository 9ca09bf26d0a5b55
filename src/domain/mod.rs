//! Domain layer containing metric logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, errors, events)
//! - `records` - Input records: recommendation lists, interactions, users, matches, revenue
//! - `benchmark` - Metric families, metric sources and benchmark targets
//! - `effectiveness` - Recommendation quality metrics
//! - `business` - Business impact metrics
//! - `reporting` - Trend analysis, benchmark scoring and reports

pub mod benchmark;
pub mod business;
pub mod effectiveness;
pub mod foundation;
pub mod records;
pub mod reporting;
