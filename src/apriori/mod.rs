pub mod candidates;
pub mod itemset;
pub mod mining;
pub mod storage;

pub use itemset::{FrequentItemsets, Itemset};
pub use mining::apriori;
pub use storage::{FrequentLevel, ItemsetStorage};
