use super::storage::FrequentLevel;
use crate::encode::TransactionContext;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// A set of vocabulary indices with its absolute and relative support.
///
/// Items are kept sorted so identity does not depend on insertion order.
#[derive(Debug, Clone)]
pub struct Itemset {
    items: Vec<usize>,
    count: usize,
    support: f64,
}

impl Itemset {
    pub(crate) fn new(mut items: Vec<usize>, count: usize, num_transactions: usize) -> Self {
        items.sort_unstable();
        items.dedup();
        let support = if num_transactions == 0 {
            0.0
        } else {
            count as f64 / num_transactions as f64
        };
        Self {
            items,
            count,
            support,
        }
    }

    pub fn items(&self) -> &[usize] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn support(&self) -> f64 {
        self.support
    }

    pub fn contains(&self, item: usize) -> bool {
        self.items.binary_search(&item).is_ok()
    }

    pub fn is_subset(&self, other: &Itemset) -> bool {
        self.items.iter().all(|&item| other.contains(item))
    }

    /// Resolve indices to items, in vocabulary order.
    pub fn labels<'a, T: Ord + Clone>(&self, context: &'a TransactionContext<T>) -> Vec<&'a T> {
        context.items(&self.items)
    }
}

impl PartialEq for Itemset {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for Itemset {}

impl Hash for Itemset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.items.hash(state);
    }
}

/// Output order: support descending, then smaller itemsets, then
/// lexicographic item order.
fn mined_order(a: &Itemset, b: &Itemset) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| a.items.len().cmp(&b.items.len()))
        .then_with(|| a.items.cmp(&b.items))
}

/// The finalized, read-only result of a mining run.
#[derive(Debug, Clone)]
pub struct FrequentItemsets {
    itemsets: Vec<Itemset>,
    index: HashMap<Vec<usize>, usize>,
    num_transactions: usize,
}

impl FrequentItemsets {
    pub(crate) fn empty(num_transactions: usize) -> Self {
        Self {
            itemsets: Vec::new(),
            index: HashMap::new(),
            num_transactions,
        }
    }

    pub(crate) fn from_levels(levels: Vec<FrequentLevel>, num_transactions: usize) -> Self {
        let mut itemsets: Vec<Itemset> = levels
            .iter()
            .flat_map(|level| level.iter())
            .map(|(items, count)| Itemset::new(items.to_vec(), count, num_transactions))
            .collect();
        itemsets.sort_by(mined_order);

        let index = itemsets
            .iter()
            .enumerate()
            .map(|(idx, itemset)| (itemset.items.clone(), idx))
            .collect();

        Self {
            itemsets,
            index,
            num_transactions,
        }
    }

    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    pub fn num_transactions(&self) -> usize {
        self.num_transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Itemset> {
        self.itemsets.iter()
    }

    pub fn as_slice(&self) -> &[Itemset] {
        &self.itemsets
    }

    /// Look up an itemset by its items. `items` must be sorted.
    pub fn get(&self, items: &[usize]) -> Option<&Itemset> {
        self.index.get(items).map(|&idx| &self.itemsets[idx])
    }

    pub fn support(&self, items: &[usize]) -> Option<f64> {
        self.get(items).map(Itemset::support)
    }

    /// Size of the largest itemset found, 0 when empty.
    pub fn max_len(&self) -> usize {
        self.itemsets.iter().map(Itemset::len).max().unwrap_or(0)
    }

    pub fn of_size(&self, size: usize) -> impl Iterator<Item = &Itemset> {
        self.itemsets.iter().filter(move |itemset| itemset.len() == size)
    }
}

impl<'a> IntoIterator for &'a FrequentItemsets {
    type Item = &'a Itemset;
    type IntoIter = std::slice::Iter<'a, Itemset>;

    fn into_iter(self) -> Self::IntoIter {
        self.itemsets.iter()
    }
}
