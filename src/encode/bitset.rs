const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-capacity bitset addressed by position.
///
/// Used for transaction-id sets (one per vocabulary column) and for item
/// membership of a single transaction row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemBitset {
    words: Vec<u64>,
    capacity: usize,
}

impl ItemBitset {
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(WORD_BITS)],
            capacity,
        }
    }

    /// A bitset with every position below `capacity` set.
    pub fn full(capacity: usize) -> Self {
        let mut bits = Self {
            words: vec![u64::MAX; capacity.div_ceil(WORD_BITS)],
            capacity,
        };
        let tail = capacity % WORD_BITS;
        if tail != 0 {
            if let Some(last) = bits.words.last_mut() {
                *last = (1u64 << tail) - 1;
            }
        }
        bits
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn insert(&mut self, pos: usize) {
        debug_assert!(pos < self.capacity);
        self.words[pos / WORD_BITS] |= 1u64 << (pos % WORD_BITS);
    }

    pub fn contains(&self, pos: usize) -> bool {
        pos < self.capacity && self.words[pos / WORD_BITS] & (1u64 << (pos % WORD_BITS)) != 0
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// In-place intersection. Both sets must share the same capacity.
    pub fn intersect_with(&mut self, other: &ItemBitset) {
        debug_assert_eq!(self.capacity, other.capacity);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= *b;
        }
    }

    pub fn is_subset(&self, other: &ItemBitset) -> bool {
        self.words
            .iter()
            .zip(&other.words)
            .all(|(a, b)| a & !b == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(w_idx, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(w_idx * WORD_BITS + bit)
            })
        })
    }
}

impl FromIterator<usize> for ItemBitset {
    /// Capacity is one past the largest position seen.
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let positions: Vec<usize> = iter.into_iter().collect();
        let capacity = positions.iter().max().map_or(0, |&m| m + 1);
        let mut bits = ItemBitset::new(capacity);
        for pos in positions {
            bits.insert(pos);
        }
        bits
    }
}
