use bitvec::prelude::*;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::{
    config::MiningConfig,
    error::{MiningError, Result},
    itemsets::{candidates::generate_candidates, hash_tree::HashTree},
    types::{FrequentItemsets, ItemCounts, ItemId, Itemset, ItemsetCounts, Transaction},
};

/// Mine all frequent itemsets, level by level.
///
/// `transactions` must be sorted and duplicate-free. Levels that come up
/// empty are not stored: the table holds levels `1..k` where level `k` was
/// the first with no frequent itemsets.
pub fn generate_frequent_itemsets(transactions: &[Transaction], config: &MiningConfig) -> Result<FrequentItemsets> {
    config.validate()?;
    if transactions.is_empty() {
        return Err(MiningError::EmptyCorpus);
    }

    let mut all_frequent_itemsets: FrequentItemsets = HashMap::new();
    let min_support_count = config.min_support_count(transactions.len());

    // 1-itemset
    info!("Counting itemsets of length 1.");
    let item_counts = generate_frequent_1_itemset_counts(transactions, min_support_count);
    debug!("Frequent items: {}", item_counts.len());
    if item_counts.is_empty() {
        return Ok(all_frequent_itemsets);
    }

    let mut frequent_items: Vec<ItemId> = item_counts.keys().copied().collect();
    frequent_items.sort_unstable();
    let mut transactions = retain_frequent_items(transactions, &frequent_items);
    all_frequent_itemsets.insert(1, convert_to_itemset_counts(item_counts));

    // k-itemset, k >= 2
    let mut size = 2;
    while config.allows_length(size) {
        info!("Counting itemsets of length {}.", size);
        transactions.retain(|transaction| transaction.len() >= size);

        let candidates = generate_candidates(&frequent_items, &all_frequent_itemsets[&(size - 1)]);
        if candidates.is_empty() {
            break;
        }

        let mut itemset_counts = count_support(candidates, &transactions, size, config)?;
        eliminate_candidates(&mut itemset_counts, min_support_count);
        debug!("Frequent itemsets of length {}: {}", size, itemset_counts.len());
        if itemset_counts.is_empty() {
            break;
        }

        all_frequent_itemsets.insert(size, itemset_counts);
        size += 1;
    }

    Ok(all_frequent_itemsets)
}

/// Support counts of single items, restricted to those reaching `min_support_count`.
pub fn generate_frequent_1_itemset_counts(transactions: &[Transaction], min_support_count: f64) -> ItemCounts {
    let mut item_counts: ItemCounts = HashMap::new();
    for transaction in transactions {
        for &item in transaction {
            *item_counts.entry(item).or_insert(0) += 1;
        }
    }

    item_counts.retain(|_, &mut support_count| f64::from(support_count) >= min_support_count);
    item_counts
}

/// Strip items that are not in sorted `frequent_items` from every transaction.
fn retain_frequent_items(transactions: &[Transaction], frequent_items: &[ItemId]) -> Vec<Transaction> {
    let num_items = frequent_items.last().map_or(0, |&item| item + 1);
    let mut is_frequent: BitVec = BitVec::repeat(false, num_items);
    for &item in frequent_items {
        is_frequent.set(item, true);
    }

    transactions
        .iter()
        .map(|transaction| {
            transaction
                .iter()
                .copied()
                .filter(|&item| item < num_items && is_frequent[item])
                .collect()
        })
        .collect()
}

/// Count how many transactions contain each candidate of length `size`.
///
/// Candidates go into a hash tree; transactions are matched against it in
/// parallel and the partial counts summed.
pub fn count_support(
    candidates: Vec<Itemset>,
    transactions: &[Transaction],
    size: usize,
    config: &MiningConfig,
) -> Result<ItemsetCounts> {
    let tree = HashTree::from_itemsets(size, config.branching_factor, config.leaf_capacity, candidates)?;
    debug!(
        "Hash tree for length {}: {} candidates, depth {}",
        size,
        tree.len(),
        tree.depth()
    );

    let num_candidates = tree.len();
    let counts = transactions
        .par_iter()
        .try_fold(
            || vec![0_u32; num_candidates],
            |mut counts, transaction| -> Result<Vec<u32>> {
                tree.match_transaction(transaction, &mut counts)?;
                Ok(counts)
            },
        )
        .try_reduce(
            || vec![0_u32; num_candidates],
            |mut counts, partial| -> Result<Vec<u32>> {
                counts
                    .iter_mut()
                    .zip(partial)
                    .for_each(|(count, add)| *count += add);
                Ok(counts)
            },
        )?;

    Ok(tree.into_itemsets().into_iter().zip(counts).collect())
}

/// Drop candidates whose support count is below `min_support_count`.
pub fn eliminate_candidates(candidate_counts: &mut ItemsetCounts, min_support_count: f64) {
    candidate_counts.retain(|_, &mut support_count| f64::from(support_count) >= min_support_count);
}

fn convert_to_itemset_counts(item_counts: ItemCounts) -> ItemsetCounts {
    item_counts.into_iter().map(|(k, v)| (vec![k], v)).collect()
}
