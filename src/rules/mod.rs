pub mod export;
pub mod generator;
pub mod metrics;

pub use export::{render_itemset, write_itemsets_csv, write_rules_csv, write_selected_csv};
pub use generator::{candidate_rules, generate_rules, Rule, RuleSet};
pub use metrics::{Metric, MetricValues, RuleSupports};
