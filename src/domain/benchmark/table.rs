//! Benchmark table - validated target thresholds per metric family.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use super::MetricFamily;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Raw nested mapping as it appears in configuration files.
type RawTargets = BTreeMap<String, BTreeMap<String, f64>>;

/// Errors raised while loading a benchmark file.
#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("Failed to read benchmark file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse benchmark file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid benchmark: {0}")]
    Invalid(#[from] ValidationError),
}

impl From<BenchmarkError> for DomainError {
    fn from(err: BenchmarkError) -> Self {
        DomainError::new(ErrorCode::InvalidBenchmark, err.to_string())
    }
}

/// Target thresholds, keyed by metric family and then metric name.
///
/// Every family and metric key is checked against the recognized set and
/// every target must be finite and strictly positive. Once built the table
/// is read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTargets", into = "RawTargets")]
pub struct BenchmarkTable {
    targets: BTreeMap<MetricFamily, BTreeMap<String, f64>>,
}

impl BenchmarkTable {
    /// Builds a table, validating every family, key and target.
    pub fn new(
        targets: BTreeMap<MetricFamily, BTreeMap<String, f64>>,
    ) -> Result<Self, ValidationError> {
        for (family, metrics) in &targets {
            for (key, target) in metrics {
                family.check_key(key)?;
                if !target.is_finite() || *target <= 0.0 {
                    return Err(ValidationError::out_of_range(
                        format!("{}.{}", family, key),
                        f64::MIN_POSITIVE,
                        f64::MAX,
                        *target,
                    ));
                }
            }
        }
        Ok(Self { targets })
    }

    /// An empty table; every category evaluates to zero against it.
    pub fn empty() -> Self {
        Self {
            targets: BTreeMap::new(),
        }
    }

    /// Parses a YAML (or JSON) document into a validated table.
    pub fn from_yaml_str(source: &str) -> Result<Self, BenchmarkError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Reads and validates a benchmark file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, BenchmarkError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    /// Returns a copy of this table with `overrides` layered on top.
    ///
    /// Overrides replace individual targets; families or keys missing
    /// from `overrides` keep their current value.
    pub fn merged_with(&self, overrides: &BenchmarkTable) -> Self {
        let mut targets = self.targets.clone();
        for (family, metrics) in &overrides.targets {
            let entry = targets.entry(*family).or_default();
            for (key, target) in metrics {
                entry.insert(key.clone(), *target);
            }
        }
        Self { targets }
    }

    /// Targets for a family, if any were configured.
    pub fn targets(&self, family: MetricFamily) -> Option<&BTreeMap<String, f64>> {
        self.targets.get(&family)
    }

    /// A single target.
    pub fn target(&self, family: MetricFamily, key: &str) -> Option<f64> {
        self.targets.get(&family).and_then(|m| m.get(key)).copied()
    }

    /// Families with at least one configured target.
    pub fn families(&self) -> impl Iterator<Item = MetricFamily> + '_ {
        self.targets.keys().copied()
    }

    /// Built-in targets for recommendation quality.
    pub fn effectiveness_defaults() -> Self {
        Self::from_static(&[
            (
                MetricFamily::Precision,
                &[
                    ("precision_at_5", 0.20),
                    ("precision_at_10", 0.15),
                    ("precision_at_20", 0.10),
                ],
            ),
            (
                MetricFamily::Ranking,
                &[("ndcg_at_10", 0.35), ("map_at_10", 0.25), ("mrr", 0.40)],
            ),
            (
                MetricFamily::Diversity,
                &[
                    ("intra_list_diversity", 0.60),
                    ("inter_list_diversity", 0.70),
                    ("demographic_diversity", 0.50),
                ],
            ),
            (
                MetricFamily::Coverage,
                &[
                    ("user_coverage", 0.95),
                    ("catalog_coverage", 0.60),
                    ("long_tail_coverage", 0.20),
                ],
            ),
            (
                MetricFamily::Novelty,
                &[("novelty", 0.70), ("serendipity", 0.15)],
            ),
        ])
    }

    /// Built-in targets for business impact.
    pub fn business_defaults() -> Self {
        Self::from_static(&[
            (
                MetricFamily::Engagement,
                &[
                    ("weekly_active_rate", 0.60),
                    ("daily_active_rate", 0.25),
                    ("avg_messages_per_match", 8.0),
                    ("message_response_rate", 0.60),
                ],
            ),
            (
                MetricFamily::Retention,
                &[
                    ("day_1_retention", 0.60),
                    ("day_7_retention", 0.40),
                    ("day_30_retention", 0.25),
                ],
            ),
            (
                MetricFamily::Revenue,
                &[
                    ("mrr", 10_000.0),
                    ("arpu", 15.0),
                    ("clv", 120.0),
                    ("conversion_rate", 0.08),
                ],
            ),
            (
                MetricFamily::Conversion,
                &[
                    ("message_conversion_rate", 0.50),
                    ("paid_conversion_rate", 0.05),
                ],
            ),
            (
                MetricFamily::Satisfaction,
                &[("satisfaction_score", 0.70)],
            ),
            (
                MetricFamily::NetworkEffects,
                &[("connected_user_rate", 0.50)],
            ),
        ])
    }

    // Built-in tables only use recognized keys and positive targets.
    fn from_static(entries: &[(MetricFamily, &[(&str, f64)])]) -> Self {
        let targets = entries
            .iter()
            .map(|(family, metrics)| {
                let metrics = metrics
                    .iter()
                    .map(|(key, target)| (key.to_string(), *target))
                    .collect();
                (*family, metrics)
            })
            .collect();
        Self { targets }
    }
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        Self::effectiveness_defaults().merged_with(&Self::business_defaults())
    }
}

impl TryFrom<RawTargets> for BenchmarkTable {
    type Error = ValidationError;

    fn try_from(raw: RawTargets) -> Result<Self, Self::Error> {
        let mut targets = BTreeMap::new();
        for (family, metrics) in raw {
            targets.insert(family.parse::<MetricFamily>()?, metrics);
        }
        Self::new(targets)
    }
}

impl From<BenchmarkTable> for RawTargets {
    fn from(table: BenchmarkTable) -> Self {
        table
            .targets
            .into_iter()
            .map(|(family, metrics)| (family.as_str().to_string(), metrics))
            .collect()
    }
}
