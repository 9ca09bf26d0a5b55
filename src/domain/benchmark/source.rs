//! Uniform read access to computed snapshots.

use std::collections::BTreeMap;

use super::MetricFamily;
use crate::domain::foundation::Timestamp;

/// Anything that exposes named metric values grouped by family.
///
/// Both snapshot types implement this so that benchmark scoring and trend
/// analysis can be written once.
pub trait MetricSource {
    /// When the values were computed.
    fn computed_at(&self) -> Timestamp;

    /// All metric values of one family, keyed by metric name.
    ///
    /// Families the source does not produce return an empty map.
    fn family_values(&self, family: MetricFamily) -> BTreeMap<&'static str, f64>;

    /// A single metric value.
    fn metric(&self, family: MetricFamily, key: &str) -> Option<f64> {
        self.family_values(family).get(key).copied()
    }
}
