use crate::error::{MiningError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Supports of one directional rule A -> C, as fractions of all transactions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleSupports {
    pub antecedent: f64,
    pub consequent: f64,
    pub joint: f64,
    pub num_transactions: usize,
}

/// The ten interestingness measures a rule can be ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Support,
    Confidence,
    Lift,
    Representativity,
    Leverage,
    Conviction,
    ZhangsMetric,
    Jaccard,
    Certainty,
    Kulczynski,
}

type Formula = fn(&RuleSupports) -> Option<f64>;

/// Indexed by `Metric as usize`.
const FORMULAS: [Formula; Metric::COUNT] = [
    support,
    confidence,
    lift,
    representativity,
    leverage,
    conviction,
    zhangs_metric,
    jaccard,
    certainty,
    kulczynski,
];

impl Metric {
    pub const COUNT: usize = 10;

    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::Support,
        Metric::Confidence,
        Metric::Lift,
        Metric::Representativity,
        Metric::Leverage,
        Metric::Conviction,
        Metric::ZhangsMetric,
        Metric::Jaccard,
        Metric::Certainty,
        Metric::Kulczynski,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Support => "support",
            Metric::Confidence => "confidence",
            Metric::Lift => "lift",
            Metric::Representativity => "representativity",
            Metric::Leverage => "leverage",
            Metric::Conviction => "conviction",
            Metric::ZhangsMetric => "zhangs_metric",
            Metric::Jaccard => "jaccard",
            Metric::Certainty => "certainty",
            Metric::Kulczynski => "kulczynski",
        }
    }

    /// Thresholds accepted for filtering on this metric.
    pub fn valid_range(self) -> RangeInclusive<f64> {
        match self {
            Metric::Support
            | Metric::Confidence
            | Metric::Representativity
            | Metric::Jaccard
            | Metric::Kulczynski => 0.0..=1.0,
            Metric::Lift | Metric::Conviction => 0.0..=f64::MAX,
            Metric::Leverage | Metric::ZhangsMetric => -1.0..=1.0,
            Metric::Certainty => f64::MIN..=1.0,
        }
    }

    pub fn check_threshold(self, min_threshold: f64) -> Result<()> {
        let range = self.valid_range();
        if range.contains(&min_threshold) {
            Ok(())
        } else {
            Err(MiningError::invalid(
                "min_threshold",
                format!(
                    "{min_threshold} is outside [{}, {}] for {self}",
                    range.start(),
                    range.end()
                ),
            ))
        }
    }

    /// `None` when the formula is undefined for these supports.
    pub fn evaluate(self, supports: &RuleSupports) -> Option<f64> {
        FORMULAS[self as usize](supports).filter(|value| !value.is_nan())
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = MiningError;

    fn from_str(s: &str) -> Result<Self> {
        Metric::ALL
            .into_iter()
            .find(|metric| metric.name() == s)
            .ok_or_else(|| MiningError::invalid("metric", format!("unknown metric `{s}`")))
    }
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator != 0.0).then(|| numerator / denominator)
}

fn support(s: &RuleSupports) -> Option<f64> {
    Some(s.joint)
}

fn confidence(s: &RuleSupports) -> Option<f64> {
    ratio(s.joint, s.antecedent)
}

fn lift(s: &RuleSupports) -> Option<f64> {
    ratio(confidence(s)?, s.consequent)
}

/// Supports come from exact counting over every transaction.
fn representativity(s: &RuleSupports) -> Option<f64> {
    (s.num_transactions > 0).then_some(1.0)
}

fn leverage(s: &RuleSupports) -> Option<f64> {
    Some(s.joint - s.antecedent * s.consequent)
}

fn conviction(s: &RuleSupports) -> Option<f64> {
    let conf = confidence(s)?;
    if conf >= 1.0 {
        return Some(f64::INFINITY);
    }
    Some((1.0 - s.consequent) / (1.0 - conf))
}

fn zhangs_metric(s: &RuleSupports) -> Option<f64> {
    let conf = confidence(s)?;
    let denominator = f64::max(conf * (1.0 - s.consequent), s.consequent * (1.0 - conf));
    ratio(conf - s.consequent, denominator)
}

fn jaccard(s: &RuleSupports) -> Option<f64> {
    ratio(s.joint, s.antecedent + s.consequent - s.joint)
}

fn certainty(s: &RuleSupports) -> Option<f64> {
    let conf = confidence(s)?;
    if s.consequent >= 1.0 {
        return Some(0.0);
    }
    Some((conf - s.consequent) / (1.0 - s.consequent))
}

fn kulczynski(s: &RuleSupports) -> Option<f64> {
    let forward = ratio(s.joint, s.antecedent)?;
    let backward = ratio(s.joint, s.consequent)?;
    Some(0.5 * (forward + backward))
}

/// All ten metric values of one rule, `None` where undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricValues([Option<f64>; Metric::COUNT]);

impl MetricValues {
    pub fn compute(supports: &RuleSupports) -> Self {
        Self(Metric::ALL.map(|metric| metric.evaluate(supports)))
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.0[metric as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, Option<f64>)> + '_ {
        Metric::ALL.into_iter().zip(self.0.iter().copied())
    }
}
