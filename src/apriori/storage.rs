/// Flat itemset storage: one item buffer, `(start, len)` offsets and a
/// transaction count per itemset.
#[derive(Debug, Clone, Default)]
pub struct ItemsetStorage {
    items: Vec<usize>,
    offsets: Vec<(usize, usize)>,
    counts: Vec<usize>,
}

/// All frequent itemsets of one size, as discovered by one mining level.
#[derive(Debug, Clone)]
pub struct FrequentLevel {
    storage: ItemsetStorage,
    pub itemset_size: usize,
}

impl ItemsetStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(estimated_items: usize, estimated_itemsets: usize) -> Self {
        Self {
            items: Vec::with_capacity(estimated_items),
            offsets: Vec::with_capacity(estimated_itemsets),
            counts: Vec::with_capacity(estimated_itemsets),
        }
    }

    pub fn add_itemset(&mut self, mut items: Vec<usize>, count: usize) -> usize {
        items.sort_unstable();
        items.dedup();

        let start = self.items.len();
        self.items.extend_from_slice(&items);
        self.offsets.push((start, items.len()));
        self.counts.push(count);

        self.offsets.len() - 1
    }

    pub fn get_itemset(&self, idx: usize) -> &[usize] {
        let (start, len) = self.offsets[idx];
        &self.items[start..start + len]
    }

    pub fn count(&self, idx: usize) -> usize {
        self.counts[idx]
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

impl FrequentLevel {
    pub fn new(itemset_size: usize) -> Self {
        Self {
            storage: ItemsetStorage::new(),
            itemset_size,
        }
    }

    pub fn with_capacity(itemset_size: usize, estimated_itemsets: usize) -> Self {
        Self {
            storage: ItemsetStorage::with_capacity(
                estimated_itemsets * itemset_size,
                estimated_itemsets,
            ),
            itemset_size,
        }
    }

    pub fn add_itemset(&mut self, items: Vec<usize>, count: usize) -> usize {
        debug_assert_eq!(items.len(), self.itemset_size);
        self.storage.add_itemset(items, count)
    }

    pub fn get_itemset(&self, idx: usize) -> &[usize] {
        self.storage.get_itemset(idx)
    }

    pub fn count(&self, idx: usize) -> usize {
        self.storage.count(idx)
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn iter_itemsets(&self) -> impl Iterator<Item = &[usize]> {
        (0..self.storage.len()).map(move |idx| self.get_itemset(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[usize], usize)> {
        (0..self.storage.len()).map(move |idx| (self.get_itemset(idx), self.count(idx)))
    }
}
