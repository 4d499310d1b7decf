//! Frequent itemset mining (Apriori) and association rules.
//!
//! The pipeline runs in four stages, each consuming the previous stage's
//! output in full:
//!
//! 1. [`encode()`] turns raw transactions into a boolean membership matrix
//!    over a sorted, deduplicated vocabulary.
//! 2. [`apriori()`] mines every itemset meeting the minimum support.
//! 3. [`rules::candidate_rules`] enumerates every directional split of every
//!    frequent itemset and scores it with ten metrics.
//! 4. [`rules::generate_rules`] keeps the rules meeting a threshold on one
//!    selected metric.
//!
//! ```
//! use apriors::{run, Metric, MiningConfig};
//!
//! let transactions = vec![
//!     vec![Some("bread"), Some("milk")],
//!     vec![Some("bread"), Some("eggs")],
//!     vec![Some("bread"), Some("milk"), Some("eggs")],
//!     vec![Some("milk"), Some("eggs")],
//! ];
//! let config = MiningConfig::new(0.5, Metric::Confidence, 0.6);
//! let result = run(transactions, &config).unwrap();
//!
//! assert_eq!(result.itemsets().len(), 6);
//! assert_eq!(result.rules().len(), 6);
//! ```

pub mod apriori;
pub mod config;
pub mod encode;
pub mod error;
pub mod rules;

pub use apriori::{apriori, FrequentItemsets, Itemset};
pub use config::MiningConfig;
pub use encode::{encode, encode_one_hot, encode_str_rows, MembershipMatrix, TransactionContext};
pub use error::{MiningError, Result};
pub use rules::{generate_rules, Metric, MetricValues, Rule, RuleSet};

use std::fmt::Display;
use std::io::Write;
use tracing::info;

/// Everything one run produced. Rules never outlive the itemsets they were
/// derived from.
#[derive(Debug, Clone)]
pub struct MiningResult<T> {
    context: TransactionContext<T>,
    itemsets: FrequentItemsets,
    rules: RuleSet,
}

impl<T: Ord + Clone> MiningResult<T> {
    pub fn context(&self) -> &TransactionContext<T> {
        &self.context
    }

    pub fn itemsets(&self) -> &FrequentItemsets {
        &self.itemsets
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Frequent itemsets as `(labels, support)`, in mined order.
    pub fn labeled_itemsets(&self) -> Vec<(Vec<&T>, f64)> {
        self.itemsets
            .iter()
            .map(|itemset| (itemset.labels(&self.context), itemset.support()))
            .collect()
    }

    /// Filtered rules as `(antecedent labels, consequent labels, metric value)`.
    pub fn labeled_rules(&self) -> Vec<(Vec<&T>, Vec<&T>, f64)> {
        self.rules
            .selected()
            .map(|(a, c, value)| (a.labels(&self.context), c.labels(&self.context), value))
            .collect()
    }
}

impl<T: Ord + Clone + Display> MiningResult<T> {
    pub fn write_itemsets_csv<W: Write>(&self, out: W) -> Result<()> {
        rules::write_itemsets_csv(out, &self.itemsets, &self.context)
    }

    pub fn write_rules_csv<W: Write>(&self, out: W) -> Result<()> {
        rules::write_rules_csv(out, &self.rules, &self.context)
    }

    pub fn write_selected_csv<W: Write>(&self, out: W) -> Result<()> {
        rules::write_selected_csv(out, &self.rules, &self.context)
    }
}

/// Validate `config`, encode `transactions` and mine itemsets and rules.
///
/// `None` cells are missing values. Only invalid parameters fail; empty
/// input or no matching rules yield empty results.
pub fn run<T, R, C>(transactions: R, config: &MiningConfig) -> Result<MiningResult<T>>
where
    T: Ord + Clone,
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = Option<T>>,
{
    config.validate()?;
    run_context(encode(transactions), config)
}

/// Same as [`run`] over an already encoded context.
pub fn run_context<T: Ord + Clone>(
    context: TransactionContext<T>,
    config: &MiningConfig,
) -> Result<MiningResult<T>> {
    config.validate()?;

    let itemsets = apriori(context.matrix(), config.min_support, config.max_len)?;
    let rules = generate_rules(&itemsets, config.metric, config.min_threshold)?;

    info!(
        transactions = context.num_transactions(),
        items = context.vocabulary().len(),
        itemsets = itemsets.len(),
        rules = rules.len(),
        "mining run complete"
    );

    Ok(MiningResult {
        context,
        itemsets,
        rules,
    })
}
