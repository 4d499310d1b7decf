//! Run parameters for a mining pipeline.

use crate::apriori::mining::{check_max_len, check_min_support};
use crate::error::Result;
use crate::rules::Metric;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters of one mining run.
///
/// ```toml
/// min_support = 0.5
/// metric = "lift"
/// min_threshold = 1.0
/// max_len = 3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MiningConfig {
    /// Minimum fraction of transactions an itemset must appear in, in (0, 1].
    pub min_support: f64,
    /// Metric rules are filtered on.
    pub metric: Metric,
    /// Minimum value of `metric` for a rule to be kept.
    pub min_threshold: f64,
    /// Largest itemset size to mine, unbounded when absent.
    pub max_len: Option<usize>,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: 0.15,
            metric: Metric::Confidence,
            min_threshold: 0.15,
            max_len: None,
        }
    }
}

impl MiningConfig {
    pub fn new(min_support: f64, metric: Metric, min_threshold: f64) -> Self {
        Self {
            min_support,
            metric,
            min_threshold,
            max_len: None,
        }
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Check every parameter before any mining work starts.
    pub fn validate(&self) -> Result<()> {
        check_min_support(self.min_support)?;
        check_max_len(self.max_len)?;
        self.metric.check_threshold(self.min_threshold)
    }
}
