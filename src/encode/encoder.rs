use super::bitset::ItemBitset;
use crate::error::{MiningError, Result};
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use std::collections::BTreeSet;
use tracing::debug;

/// Sorted, deduplicated item vocabulary. Position doubles as column index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary<T> {
    items: Vec<T>,
}

impl<T: Ord> Vocabulary<T> {
    fn from_sorted(items: Vec<T>) -> Self {
        debug_assert!(items.windows(2).all(|w| w[0] < w[1]));
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.items.get(idx)
    }

    pub fn position(&self, item: &T) -> Option<usize> {
        self.items.binary_search(item).ok()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

/// Boolean transactions x items matrix plus per-column transaction-id sets.
#[derive(Debug, Clone)]
pub struct MembershipMatrix {
    cells: Array2<bool>,
    columns: Vec<ItemBitset>,
}

impl MembershipMatrix {
    pub fn from_cells(cells: Array2<bool>) -> Self {
        let num_transactions = cells.nrows();
        let columns = cells
            .axis_iter(Axis(1))
            .map(|column| column_tids(column, num_transactions))
            .collect();
        Self { cells, columns }
    }

    pub fn num_transactions(&self) -> usize {
        self.cells.nrows()
    }

    pub fn num_items(&self) -> usize {
        self.cells.ncols()
    }

    pub fn cells(&self) -> ArrayView2<'_, bool> {
        self.cells.view()
    }

    pub fn contains(&self, tx: usize, item: usize) -> bool {
        self.cells[[tx, item]]
    }

    /// Transactions containing `item`.
    pub fn column(&self, item: usize) -> &ItemBitset {
        &self.columns[item]
    }

    /// Items present in transaction `tx`.
    pub fn row(&self, tx: usize) -> ItemBitset {
        let mut bits = ItemBitset::new(self.num_items());
        for (item, &present) in self.cells.row(tx).iter().enumerate() {
            if present {
                bits.insert(item);
            }
        }
        bits
    }

    /// Number of transactions containing every item in `items`.
    ///
    /// The empty itemset is contained in every transaction.
    pub fn support_count(&self, items: &[usize]) -> usize {
        match items.split_first() {
            None => self.num_transactions(),
            Some((&first, rest)) => {
                let mut tids = self.columns[first].clone();
                for &item in rest {
                    tids.intersect_with(&self.columns[item]);
                }
                tids.count_ones()
            }
        }
    }
}

fn column_tids(column: ArrayView1<'_, bool>, num_transactions: usize) -> ItemBitset {
    let mut tids = ItemBitset::new(num_transactions);
    for (tx, &present) in column.iter().enumerate() {
        if present {
            tids.insert(tx);
        }
    }
    tids
}

/// Immutable run context: the vocabulary and the matrix built from it.
#[derive(Debug, Clone)]
pub struct TransactionContext<T> {
    vocabulary: Vocabulary<T>,
    matrix: MembershipMatrix,
}

impl<T: Ord + Clone> TransactionContext<T> {
    pub fn vocabulary(&self) -> &Vocabulary<T> {
        &self.vocabulary
    }

    pub fn matrix(&self) -> &MembershipMatrix {
        &self.matrix
    }

    pub fn num_transactions(&self) -> usize {
        self.matrix.num_transactions()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.num_transactions() == 0 || self.vocabulary.is_empty()
    }

    /// Resolve column indices back to items.
    pub fn items(&self, indices: &[usize]) -> Vec<&T> {
        indices
            .iter()
            .filter_map(|&idx| self.vocabulary.get(idx))
            .collect()
    }

    /// Decode the matrix back into per-transaction item lists in vocabulary order.
    pub fn inverse_transform(&self) -> Vec<Vec<T>> {
        self.matrix
            .cells
            .axis_iter(Axis(0))
            .map(|row| {
                row.iter()
                    .zip(self.vocabulary.iter())
                    .filter(|(present, _)| **present)
                    .map(|(_, item)| item.clone())
                    .collect()
            })
            .collect()
    }
}

/// Encode raw transactions into a membership matrix.
///
/// `None` cells are missing values and are dropped. Repeated items within
/// one transaction collapse to a single membership.
pub fn encode<T, R, C>(transactions: R) -> TransactionContext<T>
where
    T: Ord + Clone,
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = Option<T>>,
{
    let mut dropped = 0usize;
    let rows: Vec<BTreeSet<T>> = transactions
        .into_iter()
        .map(|cells| {
            cells
                .into_iter()
                .filter_map(|cell| {
                    if cell.is_none() {
                        dropped += 1;
                    }
                    cell
                })
                .collect()
        })
        .collect();

    let vocabulary: BTreeSet<&T> = rows.iter().flatten().collect();
    let vocabulary = Vocabulary::from_sorted(vocabulary.into_iter().cloned().collect());

    let mut cells = Array2::from_elem((rows.len(), vocabulary.len()), false);
    for (tx, row) in rows.iter().enumerate() {
        for item in row {
            if let Some(col) = vocabulary.position(item) {
                cells[[tx, col]] = true;
            }
        }
    }

    debug!(
        transactions = rows.len(),
        items = vocabulary.len(),
        dropped_cells = dropped,
        "encoded transactions"
    );

    TransactionContext {
        vocabulary,
        matrix: MembershipMatrix::from_cells(cells),
    }
}

/// Encode textual rows, treating empty or whitespace-only cells as missing.
pub fn encode_str_rows<R, C, S>(rows: R) -> TransactionContext<String>
where
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    encode(rows.into_iter().map(|row| {
        row.into_iter()
            .map(|cell| {
                let cell = cell.as_ref().trim();
                (!cell.is_empty()).then(|| cell.to_string())
            })
            .collect::<Vec<_>>()
    }))
}

/// Build a context from an already one-hot encoded matrix.
///
/// Any non-zero cell marks presence. Columns sharing a label are merged.
pub fn encode_one_hot<T: Ord + Clone>(
    labels: &[T],
    transactions: ArrayView2<'_, i32>,
) -> Result<TransactionContext<T>> {
    if labels.len() != transactions.ncols() {
        return Err(MiningError::invalid(
            "labels",
            format!(
                "{} labels for {} matrix columns",
                labels.len(),
                transactions.ncols()
            ),
        ));
    }

    let unique: BTreeSet<&T> = labels.iter().collect();
    let vocabulary = Vocabulary::from_sorted(unique.into_iter().cloned().collect());
    let targets: Vec<usize> = labels
        .iter()
        .filter_map(|label| vocabulary.position(label))
        .collect();

    let mut cells = Array2::from_elem((transactions.nrows(), vocabulary.len()), false);
    for ((tx, col), &value) in transactions.indexed_iter() {
        if value != 0 {
            cells[[tx, targets[col]]] = true;
        }
    }

    Ok(TransactionContext {
        vocabulary,
        matrix: MembershipMatrix::from_cells(cells),
    })
}
