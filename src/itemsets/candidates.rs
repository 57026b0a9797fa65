use itertools::Itertools;
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::debug;

use crate::{
    combi::{drop_one, with_item},
    types::{ItemId, Itemset, ItemsetCounts},
};

/// Candidate k-itemsets from the frequent (k-1)-itemsets and the frequent items.
///
/// Every frequent (k-1)-itemset is extended by every frequent item it does not
/// already contain. Candidates are deduplicated, then pruned unless all of
/// their (k-1)-subsets are frequent. The result is sorted.
pub fn generate_candidates(frequent_items: &[ItemId], prev_itemset_counts: &ItemsetCounts) -> Vec<Itemset> {
    let mut registered: HashSet<Itemset> = HashSet::with_capacity(prev_itemset_counts.len());
    let mut candidates: Vec<Itemset> = vec![];

    for itemset in prev_itemset_counts.keys().sorted() {
        for &item in frequent_items {
            if let Some(candidate) = with_item(itemset, item) {
                if registered.insert(candidate.clone()) {
                    candidates.push(candidate);
                }
            }
        }
    }

    debug!("Candidates before pruning: {}", candidates.len());
    let candidates = prune(candidates, prev_itemset_counts);
    debug!("Candidates after pruning: {}", candidates.len());

    candidates
}

/// Keep only candidates whose every one-smaller subset is in `prev_itemset_counts`.
pub fn prune(candidates: Vec<Itemset>, prev_itemset_counts: &ItemsetCounts) -> Vec<Itemset> {
    let mut candidates: Vec<Itemset> = candidates
        .into_par_iter()
        .filter(|candidate| has_frequent_subsets(candidate, prev_itemset_counts))
        .collect();
    candidates.sort_unstable();
    candidates
}

pub fn has_frequent_subsets(candidate: &[ItemId], prev_itemset_counts: &ItemsetCounts) -> bool {
    drop_one(candidate).all(|subset| prev_itemset_counts.contains_key(&subset))
}
