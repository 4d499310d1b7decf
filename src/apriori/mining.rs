use super::candidates::generate_candidates;
use super::itemset::FrequentItemsets;
use super::storage::FrequentLevel;
use crate::encode::MembershipMatrix;
use crate::error::{MiningError, Result};
use rayon::prelude::*;
use tracing::{debug, info};

/// Reject a minimum support outside (0, 1].
pub fn check_min_support(min_support: f64) -> Result<()> {
    if min_support.is_finite() && min_support > 0.0 && min_support <= 1.0 {
        Ok(())
    } else {
        Err(MiningError::invalid(
            "min_support",
            format!("{min_support} is outside (0, 1]"),
        ))
    }
}

pub fn check_max_len(max_len: Option<usize>) -> Result<()> {
    match max_len {
        Some(0) => Err(MiningError::invalid("max_len", "must be at least 1")),
        _ => Ok(()),
    }
}

/// Level-wise Apriori over a membership matrix.
///
/// Returns every itemset with `count / num_transactions >= min_support`,
/// optionally capped at `max_len` items, sorted by support descending.
pub fn apriori(
    matrix: &MembershipMatrix,
    min_support: f64,
    max_len: Option<usize>,
) -> Result<FrequentItemsets> {
    check_min_support(min_support)?;
    check_max_len(max_len)?;

    let num_transactions = matrix.num_transactions();
    if num_transactions == 0 || matrix.num_items() == 0 {
        debug!(num_transactions, "empty input, nothing to mine");
        return Ok(FrequentItemsets::empty(num_transactions));
    }

    let is_frequent = |count: usize| count as f64 / num_transactions as f64 >= min_support;
    let max_len = max_len.unwrap_or(usize::MAX);

    let mut levels = Vec::new();
    let mut level = frequent_singletons(matrix, &is_frequent);
    debug!(size = 1, frequent = level.len(), "mined level");

    while !level.is_empty() {
        if level.itemset_size >= max_len {
            levels.push(level);
            break;
        }

        let batch = generate_candidates(&level);
        let size = level.itemset_size + 1;
        let num_candidates = batch.candidates.len();
        let next = count_candidates(matrix, batch.candidates, size, &is_frequent);

        debug!(
            size,
            candidates = num_candidates,
            pruned = batch.pruned,
            frequent = next.len(),
            "mined level"
        );

        levels.push(level);
        level = next;
    }

    let result = FrequentItemsets::from_levels(levels, num_transactions);
    info!(
        itemsets = result.len(),
        max_len = result.max_len(),
        min_support,
        "apriori finished"
    );
    Ok(result)
}

fn frequent_singletons<F>(matrix: &MembershipMatrix, is_frequent: &F) -> FrequentLevel
where
    F: Fn(usize) -> bool + Sync,
{
    let counts: Vec<usize> = (0..matrix.num_items())
        .into_par_iter()
        .map(|item| matrix.column(item).count_ones())
        .collect();

    let mut level = FrequentLevel::new(1);
    for (item, count) in counts.into_iter().enumerate() {
        if is_frequent(count) {
            level.add_itemset(vec![item], count);
        }
    }
    level
}

fn count_candidates<F>(
    matrix: &MembershipMatrix,
    candidates: Vec<Vec<usize>>,
    itemset_size: usize,
    is_frequent: &F,
) -> FrequentLevel
where
    F: Fn(usize) -> bool + Sync,
{
    let counted: Vec<(Vec<usize>, usize)> = candidates
        .into_par_iter()
        .filter_map(|candidate| {
            let count = matrix.support_count(&candidate);
            is_frequent(count).then_some((candidate, count))
        })
        .collect();

    let mut level = FrequentLevel::with_capacity(itemset_size, counted.len());
    for (items, count) in counted {
        level.add_itemset(items, count);
    }
    level
}
