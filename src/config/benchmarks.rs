//! Benchmark override configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ConfigError;
use crate::domain::benchmark::BenchmarkTable;

/// Optional YAML files layered over the built-in benchmark tables
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BenchmarksConfig {
    /// Overrides for recommendation-quality targets
    pub effectiveness_path: Option<PathBuf>,

    /// Overrides for business-impact targets
    pub business_path: Option<PathBuf>,
}

impl BenchmarksConfig {
    /// Built-in effectiveness targets with any file overrides applied.
    pub fn effectiveness(&self) -> Result<BenchmarkTable, ConfigError> {
        layered(BenchmarkTable::effectiveness_defaults(), self.effectiveness_path.as_ref())
    }

    /// Built-in business targets with any file overrides applied.
    pub fn business(&self) -> Result<BenchmarkTable, ConfigError> {
        layered(BenchmarkTable::business_defaults(), self.business_path.as_ref())
    }
}

fn layered(defaults: BenchmarkTable, path: Option<&PathBuf>) -> Result<BenchmarkTable, ConfigError> {
    match path {
        Some(path) => {
            let overrides = BenchmarkTable::from_yaml_file(path)?;
            Ok(defaults.merged_with(&overrides))
        }
        None => Ok(defaults),
    }
}
