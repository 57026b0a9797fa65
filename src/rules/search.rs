use itertools::Itertools;
use rayon::prelude::*;
use std::collections::HashSet;

use crate::{
    combi::{drop_one, join_step},
    rules::rule::Rule,
    types::{support_count, FrequentItemsets, ItemId, Itemset},
};

/// Generate rules from every frequent itemset of length >= 2.
///
/// Rules come out grouped by itemset, shorter itemsets first.
pub fn generate_rules(min_conf: f64, counter: &FrequentItemsets, num_transactions: usize) -> Vec<Rule> {
    let itemsets: Vec<&Itemset> = counter
        .iter()
        .filter(|(itemset_size, _)| **itemset_size > 1)
        .sorted_by_key(|(itemset_size, _)| **itemset_size)
        .flat_map(|(_, itemset_counts)| itemset_counts.keys().sorted())
        .collect();

    itemsets
        .par_iter()
        .flat_map_iter(|itemset| ap_genrules(itemset, min_conf, counter, num_transactions))
        .collect()
}

/// Rules drawn from one frequent itemset, grown level-wise by consequent size.
///
/// Only consequents of rules that pass `min_conf` are joined into larger
/// consequents: moving an item from antecedent to consequent never raises
/// confidence.
pub fn ap_genrules(
    itemset: &[ItemId],
    min_conf: f64,
    counter: &FrequentItemsets,
    num_transactions: usize,
) -> Vec<Rule> {
    let size = itemset.len();
    let itemset_support = support_count(counter, itemset);
    let mut final_rules = vec![];

    let mut consequents: Vec<Itemset> = itemset.iter().map(|&item| vec![item]).collect();
    let mut consequent_size = 1;

    while !consequents.is_empty() && consequent_size < size {
        let mut retained = Vec::with_capacity(consequents.len());
        for consequent in consequents {
            let mut rule = Rule::from_consequent(itemset, &consequent);
            if rule.compute_confidence(counter, itemset_support, num_transactions)
                && rule.confidence >= min_conf
            {
                final_rules.push(rule);
                retained.push(consequent);
            }
        }

        if size <= consequent_size + 1 {
            break;
        }
        consequents = next_consequents(retained);
        consequent_size += 1;
    }

    final_rules
}

/// Consequents one item larger whose every sub-consequent was retained.
pub fn next_consequents(retained: Vec<Itemset>) -> Vec<Itemset> {
    let retained_set: HashSet<Itemset> = retained.iter().cloned().collect();
    join_step(retained)
        .into_iter()
        .filter(|consequent| drop_one(consequent).all(|subset| retained_set.contains(&subset)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    fn counter() -> FrequentItemsets {
        hashmap! {
            1 => hashmap! {
                vec![1] => 9,
                vec![2] => 8,
                vec![3] => 12,
                vec![4] => 13,
            },
            2 => hashmap! {
                vec![1, 2] => 4,
                vec![1, 3] => 5,
                vec![1, 4] => 6,
                vec![2, 3] => 3,
                vec![2, 4] => 5,
                vec![3, 4] => 3,
            },
            3 => hashmap! {
                vec![1, 2, 3] => 3,
                vec![1, 2, 4] => 3,
                vec![1, 3, 4] => 3,
                vec![2, 3, 4] => 3,
            },
            4 => hashmap! {
                vec![1, 2, 3, 4] => 2,
            },
        }
    }

    fn rendered(rules: &[Rule]) -> Vec<String> {
        rules.iter().map(|rule| rule.to_string()).collect()
    }

    #[test]
    fn test_high_confidence() {
        let assoc_rules = generate_rules(0.8, &counter(), 20);

        assert_eq!(
            rendered(&assoc_rules),
            vec![
                "{2,3} => {1}",
                "{3,4} => {1}",
                "{3,4} => {2}",
                "{2,3} => {4}",
            ]
        );
        assert!(assoc_rules.iter().all(|rule| rule.confidence >= 0.8));
    }

    #[test]
    fn test_multi_item_consequents() {
        let assoc_rules = ap_genrules(&[1, 2, 3, 4], 0.6, &counter(), 20);

        // {1, 2, 4} is joined from {1, 2} and {1, 4} but {2, 4} failed
        assert_eq!(
            rendered(&assoc_rules),
            vec![
                "{2,3,4} => {1}",
                "{1,3,4} => {2}",
                "{1,2,4} => {3}",
                "{1,2,3} => {4}",
                "{3,4} => {1,2}",
                "{2,3} => {1,4}",
            ]
        );
    }

    #[test]
    fn test_grows_consequents() {
        let counter: FrequentItemsets = hashmap! {
            1 => hashmap! { vec![0] => 4, vec![1] => 4, vec![2] => 4 },
            2 => hashmap! { vec![0, 1] => 4, vec![0, 2] => 4, vec![1, 2] => 4 },
            3 => hashmap! { vec![0, 1, 2] => 4 },
        };
        let assoc_rules = ap_genrules(&[0, 1, 2], 1.0, &counter, 4);

        assert_eq!(
            rendered(&assoc_rules),
            vec![
                "{1,2} => {0}",
                "{0,2} => {1}",
                "{0,1} => {2}",
                "{2} => {0,1}",
                "{1} => {0,2}",
                "{0} => {1,2}",
            ]
        );
    }

    #[test]
    fn test_pruned_consequents_are_never_tested() {
        // {0} => {1, 2} would pass, but {0, 2} => {1} fails so {1, 2} is never joined
        let counter: FrequentItemsets = hashmap! {
            1 => hashmap! { vec![0] => 2, vec![1] => 9, vec![2] => 9 },
            2 => hashmap! { vec![0, 1] => 9, vec![0, 2] => 9, vec![1, 2] => 2 },
            3 => hashmap! { vec![0, 1, 2] => 2 },
        };
        let assoc_rules = ap_genrules(&[0, 1, 2], 0.9, &counter, 10);

        assert_eq!(rendered(&assoc_rules), vec!["{1,2} => {0}"]);
    }

    #[test]
    fn test_missing_support_rejects_rule() {
        let counter: FrequentItemsets = hashmap! {
            2 => hashmap! { vec![0, 1] => 3 },
        };
        assert!(ap_genrules(&[0, 1], 0.1, &counter, 5).is_empty());
    }

    #[test]
    fn test_next_consequents() {
        let next = next_consequents(vec![vec![1], vec![2], vec![4]]);
        assert_eq!(next, vec![vec![1, 2], vec![1, 4], vec![2, 4]]);

        let next = next_consequents(vec![vec![1, 2], vec![1, 3], vec![1, 4], vec![2, 3]]);
        assert_eq!(next, vec![vec![1, 2, 3]]);
    }
}
