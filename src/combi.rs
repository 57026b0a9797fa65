use itertools::Itertools;

use crate::types::{ItemId, Itemset};

/// Join sorted itemsets of equal length that differ only in their last item.
///
/// Every pair sharing the same (len - 1)-prefix yields one itemset of
/// length len + 1. Output itemsets are sorted.
/// https://github.com/tommyod/Efficient-Apriori/blob/master/efficient_apriori/itemsets.py
pub fn join_step(mut itemsets: Vec<Itemset>) -> Vec<Itemset> {
    if itemsets.is_empty() {
        return vec![];
    }

    itemsets.sort_unstable();
    itemsets.dedup();

    let mut final_itemsets: Vec<Itemset> = Vec::with_capacity(itemsets.len());

    let mut i = 0;
    while i < itemsets.len() {
        let size = itemsets[i].len();
        let prefix = &itemsets[i][..size.saturating_sub(1)];

        let mut skip = 1;
        while i + skip < itemsets.len() {
            let other = &itemsets[i + skip];
            if other.len() == size && other.starts_with(prefix) {
                skip += 1;
            } else {
                break;
            }
        }

        for (first, second) in itemsets[i..i + skip].iter().tuple_combinations() {
            if let Some(&last) = second.last() {
                let mut itemset = first.to_owned();
                itemset.push(last);
                final_itemsets.push(itemset);
            }
        }

        i += skip;
    }

    final_itemsets
}

/// All subsets of `itemset` with exactly one item removed, in order of the
/// removed position.
pub fn drop_one(itemset: &[ItemId]) -> impl Iterator<Item = Itemset> + '_ {
    (0..itemset.len()).map(move |skip| {
        itemset
            .iter()
            .enumerate()
            .filter(|&(position, _)| position != skip)
            .map(|(_, &item)| item)
            .collect()
    })
}

/// `itemset` with `item` added at its sorted position, or `None` if it is
/// already a member.
pub fn with_item(itemset: &[ItemId], item: ItemId) -> Option<Itemset> {
    match itemset.binary_search(&item) {
        Ok(_) => None,
        Err(position) => {
            let mut extended = Vec::with_capacity(itemset.len() + 1);
            extended.extend_from_slice(&itemset[..position]);
            extended.push(item);
            extended.extend_from_slice(&itemset[position..]);
            Some(extended)
        }
    }
}

/// Items of sorted `itemset` that are not in sorted `removed`.
pub fn difference(itemset: &[ItemId], removed: &[ItemId]) -> Itemset {
    itemset
        .iter()
        .filter(|item| removed.binary_search(item).is_err())
        .copied()
        .collect()
}

/// Whether sorted `subset` is contained in sorted `superset`.
pub fn is_subset(subset: &[ItemId], superset: &[ItemId]) -> bool {
    let mut remaining = superset.iter();
    subset
        .iter()
        .all(|item| remaining.any(|candidate| candidate == item))
}
