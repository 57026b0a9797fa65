use itertools::Itertools;
use std::collections::HashMap;

use crate::types::{ItemId, ItemName, RawTransaction, Transaction};

/// Bijection between item labels and dense item ids.
///
/// Ids are handed out in lexicographic label order, so id order and
/// label order agree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    labels: Vec<ItemName>,
    reverse_lookup: HashMap<ItemName, ItemId>,
}

impl Inventory {
    pub fn from_transactions(raw_transactions: &[RawTransaction]) -> Self {
        let labels: Vec<ItemName> = raw_transactions
            .iter()
            .flatten()
            .unique()
            .sorted()
            .cloned()
            .collect();
        let reverse_lookup = labels
            .iter()
            .enumerate()
            .map(|(item_id, label)| (label.to_owned(), item_id))
            .collect();

        Self {
            labels,
            reverse_lookup,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn id_of(&self, label: &str) -> Option<ItemId> {
        self.reverse_lookup.get(label).copied()
    }

    pub fn label_of(&self, item_id: ItemId) -> Option<&str> {
        self.labels.get(item_id).map(String::as_str)
    }

    /// Rewrite a raw transaction as ascending, duplicate-free ids.
    /// Labels unknown to the inventory are dropped.
    pub fn encode(&self, raw_transaction: &[ItemName]) -> Transaction {
        let mut items: Transaction = raw_transaction
            .iter()
            .filter_map(|label| self.id_of(label))
            .collect();
        items.sort_unstable();
        items.dedup();
        items
    }

    pub fn encode_all(&self, raw_transactions: &[RawTransaction]) -> Vec<Transaction> {
        raw_transactions
            .iter()
            .map(|raw_transaction| self.encode(raw_transaction))
            .collect()
    }

    pub fn decode(&self, itemset: &[ItemId]) -> Vec<ItemName> {
        itemset
            .iter()
            .filter_map(|&item_id| self.label_of(item_id))
            .map(str::to_owned)
            .collect()
    }
}
