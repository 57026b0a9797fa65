use itertools::Itertools;
use tracing::info;

use crate::{
    config::MiningConfig,
    error::{MiningError, Result},
    inventory::Inventory,
    itemsets::count::generate_frequent_itemsets,
    rules::{
        rule::{LabelledRule, Rule},
        search::generate_rules,
    },
    types::{support_count, FrequentItemsets, ItemId, ItemName, Itemset, RawTransaction, Transaction},
};

/// State of one mining run: the item inventory, the encoded corpus and the
/// frequent-itemset table every later lookup is served from.
#[derive(Debug, Clone)]
pub struct MiningContext {
    config: MiningConfig,
    inventory: Inventory,
    transactions: Vec<Transaction>,
    frequent_itemsets: FrequentItemsets,
}

impl MiningContext {
    /// Validate `config`, enumerate items and mine every frequent itemset.
    pub fn mine(raw_transactions: &[RawTransaction], config: MiningConfig) -> Result<Self> {
        config.validate()?;
        if raw_transactions.is_empty() {
            return Err(MiningError::EmptyCorpus);
        }

        let inventory = Inventory::from_transactions(raw_transactions);
        let transactions = inventory.encode_all(raw_transactions);
        info!(
            "Mining {} transactions over {} items",
            transactions.len(),
            inventory.len()
        );

        let frequent_itemsets = generate_frequent_itemsets(&transactions, &config)?;
        info!(
            "Found {} frequent itemsets",
            frequent_itemsets.values().map(|counts| counts.len()).sum::<usize>()
        );

        Ok(Self {
            config,
            inventory,
            transactions,
            frequent_itemsets,
        })
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn num_transactions(&self) -> usize {
        self.transactions.len()
    }

    pub fn frequent_itemsets(&self) -> &FrequentItemsets {
        &self.frequent_itemsets
    }

    /// Support count of `itemset`; 0 if it is not frequent.
    pub fn support(&self, itemset: &[ItemId]) -> u32 {
        support_count(&self.frequent_itemsets, itemset)
    }

    /// Frequent itemsets with their counts, by length and then id order.
    pub fn itemset_counts(&self) -> Vec<(Itemset, u32)> {
        self.frequent_itemsets
            .iter()
            .sorted_by_key(|(itemset_size, _)| **itemset_size)
            .flat_map(|(_, itemset_counts)| {
                itemset_counts
                    .iter()
                    .sorted()
                    .map(|(itemset, &count)| (itemset.to_owned(), count))
            })
            .collect()
    }

    /// Frequent itemsets as labels, in the order of [`Self::itemset_counts`].
    pub fn labelled_itemsets(&self) -> Vec<Vec<ItemName>> {
        self.itemset_counts()
            .iter()
            .map(|(itemset, _)| self.inventory.decode(itemset))
            .collect()
    }

    /// Rules meeting the configured minimum confidence.
    pub fn rules(&self) -> Vec<Rule> {
        let rules = generate_rules(
            self.config.min_confidence,
            &self.frequent_itemsets,
            self.num_transactions(),
        );
        info!("Generated {} rules", rules.len());
        rules
    }

    pub fn labelled_rules(&self) -> Vec<LabelledRule> {
        self.rules()
            .iter()
            .map(|rule| LabelledRule::new(rule, &self.inventory))
            .collect()
    }
}
