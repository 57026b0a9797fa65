use std::collections::HashMap;

pub type ItemId = usize;
pub type ItemName = String;
pub type Itemset = Vec<ItemId>;

pub type RawTransaction = Vec<ItemName>;
pub type Transaction = Vec<ItemId>;

pub type ItemCounts = HashMap<ItemId, u32>;
pub type ItemsetCounts = HashMap<Itemset, u32>;

pub type ItemsetLength = usize;
pub type FrequentItemsets = HashMap<ItemsetLength, ItemsetCounts>;

/// Support count of `itemset` in the frequent-itemset table.
///
/// Itemsets that were never frequent (or never counted) have support 0.
pub fn support_count(frequent_itemsets: &FrequentItemsets, itemset: &[ItemId]) -> u32 {
    frequent_itemsets
        .get(&itemset.len())
        .and_then(|itemset_counts| itemset_counts.get(itemset))
        .copied()
        .unwrap_or(0)
}
