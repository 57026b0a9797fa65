//! Frequent itemset and association rule mining with the Apriori algorithm.
//!
//! Candidates of each length are counted against the corpus through a
//! hash tree, and rules are grown from the frequent itemsets by consequent
//! size.
pub mod combi;
pub mod config;
pub mod context;
pub mod error;
pub mod inventory;
pub mod itemsets;
pub mod notation;
pub mod rules;
pub mod types;
#[cfg(feature = "python")]
mod wrapper;

pub use config::MiningConfig;
pub use context::MiningContext;
pub use error::MiningError;
pub use rules::rule::{LabelledRule, Rule};

use types::{ItemName, RawTransaction};

/// Frequent itemsets of `transactions` as label lists, singletons included.
pub fn mine_frequent_itemsets(
    transactions: &[RawTransaction],
    min_support: f64,
) -> error::Result<Vec<Vec<ItemName>>> {
    let config = MiningConfig {
        min_support,
        ..MiningConfig::default()
    };
    let context = MiningContext::mine(transactions, config)?;
    Ok(context.labelled_itemsets())
}

/// Association rules of `transactions` meeting both thresholds.
pub fn mine_association_rules(
    transactions: &[RawTransaction],
    min_support: f64,
    min_confidence: f64,
) -> error::Result<Vec<LabelledRule>> {
    let context = MiningContext::mine(transactions, MiningConfig::new(min_support, min_confidence))?;
    Ok(context.labelled_rules())
}
