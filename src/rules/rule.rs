use std::fmt::{self, Display, Formatter};

use crate::{
    combi::difference,
    inventory::Inventory,
    notation::{Braced, ARROW},
    types::{support_count, FrequentItemsets, ItemId, ItemName},
};

/// Association rule `antecedent => consequent` over one frequent itemset.
///
/// `combi` holds the antecedent followed by the consequent, each sorted;
/// `split` is the antecedent length.
#[derive(Debug, Clone)]
pub struct Rule {
    pub split: usize,
    pub combi: Vec<ItemId>,
    /// Support count of the whole itemset.
    pub support: u32,
    pub confidence: f64,
    pub lift: f64,
}

impl Rule {
    /// The rule `itemset - consequent => consequent`. Both arguments sorted.
    pub fn from_consequent(itemset: &[ItemId], consequent: &[ItemId]) -> Rule {
        let mut combi = difference(itemset, consequent);
        let split = combi.len();
        combi.extend_from_slice(consequent);
        Rule {
            split,
            combi,
            support: 0,
            confidence: 0.0,
            lift: 0.0,
        }
    }

    pub fn get_antecedent(&self) -> &[ItemId] {
        &self.combi[..self.split]
    }

    pub fn get_consequent(&self) -> &[ItemId] {
        &self.combi[self.split..]
    }

    /// Fill in support, confidence and lift from the frequent-itemset table.
    ///
    /// Returns `false`, leaving the metrics untouched, when the antecedent has
    /// no recorded support.
    pub fn compute_confidence(
        &mut self,
        counter: &FrequentItemsets,
        itemset_support: u32,
        num_transactions: usize,
    ) -> bool {
        let antecedent_support = support_count(counter, self.get_antecedent());
        if antecedent_support == 0 {
            return false;
        }
        let consequent_support = support_count(counter, self.get_consequent());

        self.support = itemset_support;
        self.confidence = f64::from(itemset_support) / f64::from(antecedent_support);
        self.lift = if consequent_support == 0 {
            0.0
        } else {
            self.confidence * num_transactions as f64 / f64::from(consequent_support)
        };
        true
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Rule) -> bool {
        self.get_antecedent() == other.get_antecedent()
            && self.get_consequent() == other.get_consequent()
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            Braced(self.get_antecedent()),
            ARROW,
            Braced(self.get_consequent())
        )
    }
}

/// A rule with item ids translated back to labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledRule {
    pub antecedent: Vec<ItemName>,
    pub consequent: Vec<ItemName>,
    pub support: u32,
    pub confidence: f64,
    pub lift: f64,
}

impl LabelledRule {
    pub fn new(rule: &Rule, inventory: &Inventory) -> Self {
        Self {
            antecedent: inventory.decode(rule.get_antecedent()),
            consequent: inventory.decode(rule.get_consequent()),
            support: rule.support,
            confidence: rule.confidence,
            lift: rule.lift,
        }
    }
}

impl Display for LabelledRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            Braced(&self.antecedent),
            ARROW,
            Braced(&self.consequent)
        )
    }
}
