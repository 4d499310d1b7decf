use super::storage::FrequentLevel;
use std::collections::HashSet;

/// Candidates of size k+1 that survived subset pruning.
#[derive(Debug, Default)]
pub struct CandidateBatch {
    pub candidates: Vec<Vec<usize>>,
    pub pruned: usize,
}

/// Join frequent k-itemsets sharing their first k-1 items, then drop every
/// candidate that has an infrequent k-subset.
pub fn generate_candidates(level: &FrequentLevel) -> CandidateBatch {
    let k = level.itemset_size;
    let mut sorted: Vec<&[usize]> = level.iter_itemsets().collect();
    sorted.sort_unstable();

    let frequent: HashSet<&[usize]> = sorted.iter().copied().collect();
    let mut batch = CandidateBatch::default();
    let mut subset = Vec::with_capacity(k);

    for (i, &left) in sorted.iter().enumerate() {
        for &right in &sorted[i + 1..] {
            if left[..k - 1] != right[..k - 1] {
                break;
            }

            let mut candidate = Vec::with_capacity(k + 1);
            candidate.extend_from_slice(left);
            candidate.push(right[k - 1]);

            if has_infrequent_subset(&candidate, &frequent, &mut subset) {
                batch.pruned += 1;
            } else {
                batch.candidates.push(candidate);
            }
        }
    }

    batch
}

/// The two subsets obtained by dropping one of the last two items are the
/// joined parents, so only the remaining positions need a lookup.
fn has_infrequent_subset(
    candidate: &[usize],
    frequent: &HashSet<&[usize]>,
    subset: &mut Vec<usize>,
) -> bool {
    let parents_from = candidate.len().saturating_sub(2);
    (0..parents_from).any(|skip| {
        subset.clear();
        subset.extend(
            candidate
                .iter()
                .enumerate()
                .filter(|&(idx, _)| idx != skip)
                .map(|(_, &item)| item),
        );
        !frequent.contains(subset.as_slice())
    })
}
