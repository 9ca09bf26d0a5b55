//! Benchmark module - Target thresholds per metric family.
//!
//! # Components
//!
//! - `MetricFamily` - The named metric groups and the metric keys each one recognizes
//! - `BenchmarkTable` - Immutable, validated targets consumed by both report generators
//! - `MetricSource` - Read access to snapshot values by family and key

mod family;
mod source;
mod table;

pub use family::MetricFamily;
pub use source::MetricSource;
pub use table::{BenchmarkError, BenchmarkTable};
