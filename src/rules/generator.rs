use super::metrics::{Metric, MetricValues, RuleSupports};
use crate::apriori::{FrequentItemsets, Itemset};
use crate::error::Result;
use rayon::prelude::*;
use std::fmt;
use tracing::{debug, info};

/// A directional rule `antecedent -> consequent` with all ten metrics.
#[derive(Debug, Clone)]
pub struct Rule {
    antecedent: Itemset,
    consequent: Itemset,
    metrics: MetricValues,
}

impl Rule {
    pub fn antecedent(&self) -> &Itemset {
        &self.antecedent
    }

    pub fn consequent(&self) -> &Itemset {
        &self.consequent
    }

    pub fn metrics(&self) -> &MetricValues {
        &self.metrics
    }

    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(metric)
    }

    pub fn support(&self) -> f64 {
        self.metrics.get(Metric::Support).unwrap_or(0.0)
    }

    pub fn confidence(&self) -> Option<f64> {
        self.metrics.get(Metric::Confidence)
    }

    pub fn lift(&self) -> Option<f64> {
        self.metrics.get(Metric::Lift)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} -> {:?}",
            self.antecedent.items(),
            self.consequent.items()
        )
    }
}

/// Rules that met the selected metric threshold, in generation order.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    metric: Metric,
    min_threshold: f64,
    num_candidates: usize,
}

impl RuleSet {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn min_threshold(&self) -> f64 {
        self.min_threshold
    }

    /// Rules enumerated before threshold filtering.
    pub fn num_candidates(&self) -> usize {
        self.num_candidates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }

    /// `(antecedent, consequent, selected metric value)` for each rule.
    pub fn selected(&self) -> impl Iterator<Item = (&Itemset, &Itemset, f64)> + '_ {
        self.rules.iter().filter_map(move |rule| {
            rule.metric(self.metric)
                .map(|value| (&rule.antecedent, &rule.consequent, value))
        })
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Enumerate every directional rule of every frequent itemset and score it.
///
/// Itemsets keep their mined order. Within one itemset antecedents run from
/// size n-1 down to 1, each size in lexicographic combination order.
pub fn candidate_rules(frequent: &FrequentItemsets) -> Vec<Rule> {
    let per_itemset: Vec<Vec<Rule>> = frequent
        .as_slice()
        .par_iter()
        .filter(|itemset| itemset.len() >= 2)
        .map(|itemset| rules_for_itemset(itemset, frequent))
        .collect();

    per_itemset.into_iter().flatten().collect()
}

/// Score all candidate rules and keep those whose `metric` is defined and at
/// least `min_threshold`.
pub fn generate_rules(
    frequent: &FrequentItemsets,
    metric: Metric,
    min_threshold: f64,
) -> Result<RuleSet> {
    metric.check_threshold(min_threshold)?;

    let candidates = candidate_rules(frequent);
    let num_candidates = candidates.len();
    let rules: Vec<Rule> = candidates
        .into_iter()
        .filter(|rule| rule.metric(metric).is_some_and(|value| value >= min_threshold))
        .collect();

    info!(
        candidates = num_candidates,
        retained = rules.len(),
        %metric,
        min_threshold,
        "generated rules"
    );

    Ok(RuleSet {
        rules,
        metric,
        min_threshold,
        num_candidates,
    })
}

fn rules_for_itemset(itemset: &Itemset, frequent: &FrequentItemsets) -> Vec<Rule> {
    let items = itemset.items();
    let mut rules = Vec::new();
    let mut current = Vec::with_capacity(items.len());

    for antecedent_size in (1..items.len()).rev() {
        let mut emit = |antecedent: &[usize]| {
            let consequent: Vec<usize> = items
                .iter()
                .copied()
                .filter(|item| antecedent.binary_search(item).is_err())
                .collect();

            match (frequent.get(antecedent), frequent.get(&consequent)) {
                (Some(a), Some(c)) => {
                    rules.push(score(itemset, a, c, frequent.num_transactions()));
                }
                _ => debug!(
                    itemset = ?items,
                    antecedent = ?antecedent,
                    "skipping rule with unknown subset support"
                ),
            }
        };
        generate_combinations_recursive(items, antecedent_size, 0, &mut current, &mut emit);
    }

    rules
}

fn score(
    joint: &Itemset,
    antecedent: &Itemset,
    consequent: &Itemset,
    num_transactions: usize,
) -> Rule {
    let supports = RuleSupports {
        antecedent: antecedent.support(),
        consequent: consequent.support(),
        joint: joint.support(),
        num_transactions,
    };

    Rule {
        antecedent: antecedent.clone(),
        consequent: consequent.clone(),
        metrics: MetricValues::compute(&supports),
    }
}

/// Calls `callback` with every k-combination of `items`, in lexicographic order.
pub fn generate_combinations_recursive<F>(
    items: &[usize],
    k: usize,
    start: usize,
    current: &mut Vec<usize>,
    callback: &mut F,
) where
    F: FnMut(&[usize]),
{
    if current.len() == k {
        callback(current);
        return;
    }

    for i in start..items.len() {
        current.push(items[i]);
        generate_combinations_recursive(items, k, i + 1, current, callback);
        current.pop();
    }
}
