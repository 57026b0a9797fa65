//! Hash tree over candidate itemsets of one fixed size.
//!
//! An internal node at depth `d` routes an itemset to child
//! `itemset[d] % branching_factor`. Leaves hold indices into the tree's
//! itemset table. A leaf that grows past `leaf_capacity` is replaced by an
//! internal node, unless it sits at depth `size`, where no coordinate is
//! left to branch on and it keeps growing.
use itertools::Itertools;
use std::mem;

use crate::{
    error::{MiningError, Result},
    types::{ItemId, Itemset},
};

#[derive(Debug)]
enum Node {
    Leaf(Vec<usize>),
    Internal(Vec<Node>),
}

#[derive(Debug, Clone, Copy)]
struct Shape {
    size: usize,
    branching_factor: usize,
    leaf_capacity: usize,
}

impl Node {
    fn internal(branching_factor: usize) -> Self {
        Node::Internal((0..branching_factor).map(|_| Node::Leaf(vec![])).collect())
    }

    fn insert(&mut self, index: usize, depth: usize, itemsets: &[Itemset], shape: Shape) -> Result<()> {
        match self {
            Node::Leaf(values) => {
                values.push(index);
                if values.len() > shape.leaf_capacity && depth < shape.size {
                    let values = mem::take(values);
                    let mut subtree = Node::internal(shape.branching_factor);
                    for value in values {
                        subtree.insert(value, depth, itemsets, shape)?;
                    }
                    *self = subtree;
                }
                Ok(())
            }
            Node::Internal(children) => {
                let child = route(children, &itemsets[index], depth, shape)?;
                child.insert(index, depth + 1, itemsets, shape)
            }
        }
    }
}

fn route<'n>(children: &'n mut [Node], path: &[ItemId], depth: usize, shape: Shape) -> Result<&'n mut Node> {
    let defect = MiningError::HashTreeDepth {
        depth,
        size: shape.size,
    };
    let item = path.get(depth).ok_or_else(|| defect.clone())?;
    children
        .get_mut(item % shape.branching_factor)
        .ok_or(defect)
}

#[derive(Debug)]
pub struct HashTree {
    shape: Shape,
    itemsets: Vec<Itemset>,
    root: Node,
}

impl HashTree {
    pub fn new(size: usize, branching_factor: usize, leaf_capacity: usize) -> Result<Self> {
        if branching_factor == 0 {
            return Err(MiningError::InvalidBranchingFactor(branching_factor));
        }
        if leaf_capacity == 0 {
            return Err(MiningError::InvalidLeafCapacity(leaf_capacity));
        }
        if size == 0 {
            return Err(MiningError::ItemsetSize {
                expected: 1,
                found: 0,
            });
        }

        Ok(Self {
            shape: Shape {
                size,
                branching_factor,
                leaf_capacity,
            },
            itemsets: vec![],
            root: Node::internal(branching_factor),
        })
    }

    pub fn from_itemsets(
        size: usize,
        branching_factor: usize,
        leaf_capacity: usize,
        itemsets: Vec<Itemset>,
    ) -> Result<Self> {
        let mut tree = Self::new(size, branching_factor, leaf_capacity)?;
        for itemset in itemsets {
            tree.insert(itemset)?;
        }
        Ok(tree)
    }

    /// Insert a sorted itemset of the tree's size and return its index.
    /// Inserting an itemset that is already present returns the existing index.
    pub fn insert(&mut self, itemset: Itemset) -> Result<usize> {
        if itemset.len() != self.shape.size {
            return Err(MiningError::ItemsetSize {
                expected: self.shape.size,
                found: itemset.len(),
            });
        }
        if let Some(index) = self.position(&itemset)? {
            return Ok(index);
        }

        let index = self.itemsets.len();
        self.itemsets.push(itemset);
        self.root.insert(index, 0, &self.itemsets, self.shape)?;
        Ok(index)
    }

    pub fn size(&self) -> usize {
        self.shape.size
    }

    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    pub fn itemsets(&self) -> &[Itemset] {
        &self.itemsets
    }

    pub fn into_itemsets(self) -> Vec<Itemset> {
        self.itemsets
    }

    /// Index of `itemset` if it is stored in the tree.
    pub fn position(&self, itemset: &[ItemId]) -> Result<Option<usize>> {
        let leaf = self.leaf_for(itemset)?;
        Ok(leaf
            .iter()
            .copied()
            .find(|&index| self.itemsets[index] == itemset))
    }

    /// Walk from the root to the leaf that `path` hashes to.
    fn leaf_for(&self, path: &[ItemId]) -> Result<&[usize]> {
        let mut node = &self.root;
        let mut depth = 0;
        loop {
            match node {
                Node::Leaf(values) => return Ok(values.as_slice()),
                Node::Internal(children) => {
                    let defect = MiningError::HashTreeDepth {
                        depth,
                        size: self.shape.size,
                    };
                    if depth >= self.shape.size {
                        return Err(defect);
                    }
                    let item = path.get(depth).ok_or_else(|| defect.clone())?;
                    node = children
                        .get(item % self.shape.branching_factor)
                        .ok_or(defect)?;
                    depth += 1;
                }
            }
        }
    }

    /// Credit every stored itemset contained in `transaction`.
    ///
    /// `transaction` must be sorted ascending and duplicate-free. Each
    /// size-k subsequence of it is walked down the tree, so each stored
    /// itemset is credited at most once per transaction.
    pub fn match_transaction(&self, transaction: &[ItemId], counts: &mut [u32]) -> Result<()> {
        if transaction.len() < self.shape.size || self.is_empty() {
            return Ok(());
        }

        for path in transaction.iter().copied().combinations(self.shape.size) {
            for &index in self.leaf_for(&path)? {
                if self.itemsets[index] == path {
                    if let Some(count) = counts.get_mut(index) {
                        *count += 1;
                    }
                }
            }
        }
        Ok(())
    }

    /// Indices of stored itemsets contained in `transaction`, ascending.
    #[cfg(test)]
    pub(crate) fn matches(&self, transaction: &[ItemId]) -> Result<Vec<usize>> {
        let mut counts = vec![0; self.len()];
        self.match_transaction(transaction, &mut counts)?;
        Ok(counts
            .iter()
            .positions(|&count| count > 0)
            .collect())
    }

    /// Deepest leaf depth.
    pub fn depth(&self) -> usize {
        fn walk(node: &Node, depth: usize) -> usize {
            match node {
                Node::Leaf(_) => depth,
                Node::Internal(children) => children
                    .iter()
                    .map(|child| walk(child, depth + 1))
                    .max()
                    .unwrap_or(depth),
            }
        }
        walk(&self.root, 0)
    }

    /// `(depth, number of itemsets)` of every non-empty leaf.
    pub fn leaf_sizes(&self) -> Vec<(usize, usize)> {
        fn walk(node: &Node, depth: usize, sizes: &mut Vec<(usize, usize)>) {
            match node {
                Node::Leaf(values) if values.is_empty() => {}
                Node::Leaf(values) => sizes.push((depth, values.len())),
                Node::Internal(children) => {
                    for child in children {
                        walk(child, depth + 1, sizes);
                    }
                }
            }
        }
        let mut sizes = vec![];
        walk(&self.root, 0, &mut sizes);
        sizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combi::is_subset;

    fn example_itemsets() -> Vec<Itemset> {
        vec![
            vec![1, 2, 3],
            vec![1, 2, 4],
            vec![4, 5, 7],
            vec![1, 2, 5],
            vec![4, 5, 8],
            vec![1, 5, 9],
            vec![1, 3, 6],
            vec![2, 3, 4],
            vec![5, 6, 7],
            vec![3, 4, 5],
            vec![3, 5, 6],
            vec![3, 5, 7],
            vec![6, 8, 9],
            vec![3, 6, 8],
            vec![3, 6, 7],
        ]
    }

    fn brute_force_counts(itemsets: &[Itemset], transactions: &[Vec<ItemId>]) -> Vec<u32> {
        itemsets
            .iter()
            .map(|itemset| {
                transactions
                    .iter()
                    .filter(|transaction| is_subset(itemset, transaction))
                    .count() as u32
            })
            .collect()
    }

    #[test]
    fn stores_every_itemset_once() {
        let tree = HashTree::from_itemsets(3, 5, 5, example_itemsets()).unwrap();

        assert_eq!(tree.size(), 3);
        assert_eq!(tree.len(), 15);
        for itemset in example_itemsets() {
            assert!(tree.position(&itemset).unwrap().is_some());
        }
        assert_eq!(tree.position(&[1, 2, 6]).unwrap(), None);
        let total: usize = tree.leaf_sizes().iter().map(|&(_, size)| size).sum();
        assert_eq!(total, 15);
    }

    #[test]
    fn duplicate_insert_returns_existing_index() {
        let mut tree = HashTree::new(2, 3, 2).unwrap();
        let first = tree.insert(vec![1, 2]).unwrap();
        tree.insert(vec![2, 3]).unwrap();
        let again = tree.insert(vec![1, 2]).unwrap();

        assert_eq!(first, again);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn rejects_wrong_size() {
        let mut tree = HashTree::new(3, 5, 5).unwrap();
        assert_eq!(
            tree.insert(vec![1, 2]),
            Err(MiningError::ItemsetSize {
                expected: 3,
                found: 2
            })
        );
        assert!(tree.is_empty());
        assert!(HashTree::new(0, 5, 5).is_err());
        assert!(HashTree::new(2, 0, 5).is_err());
    }

    #[test]
    fn overloaded_leaves_divide_until_max_depth() {
        let tree = HashTree::from_itemsets(3, 5, 2, example_itemsets()).unwrap();

        assert!(tree.depth() <= 3);
        for (depth, size) in tree.leaf_sizes() {
            assert!(depth >= 1);
            if depth < 3 {
                assert!(size <= 2, "leaf at depth {} holds {}", depth, size);
            }
        }
    }

    #[test]
    fn leaves_at_max_depth_never_divide() {
        // Every itemset hashes to child 0 at each depth with branching factor 1.
        let itemsets: Vec<Itemset> = (0..10).map(|i| vec![i, i + 10]).collect();
        let tree = HashTree::from_itemsets(2, 1, 1, itemsets).unwrap();

        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.leaf_sizes(), vec![(2, 10)]);
    }

    #[test]
    fn matches_agree_with_brute_force() {
        let itemsets = example_itemsets();
        let transactions: Vec<Vec<ItemId>> = vec![
            vec![1, 2, 3, 5, 6],
            vec![3, 4, 5, 6, 7, 8],
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9],
            vec![2, 3],
            vec![],
            vec![4, 5, 7],
        ];

        for &(branching_factor, leaf_capacity) in &[(5, 5), (3, 1), (2, 2), (7, 3)] {
            let tree = HashTree::from_itemsets(3, branching_factor, leaf_capacity, itemsets.clone())
                .unwrap();
            let mut counts = vec![0; tree.len()];
            for transaction in &transactions {
                tree.match_transaction(transaction, &mut counts).unwrap();
            }
            assert_eq!(counts, brute_force_counts(tree.itemsets(), &transactions));
        }
    }

    #[test]
    fn transactions_built_from_stored_itemsets_match_exactly() {
        let itemsets = example_itemsets();
        let tree = HashTree::from_itemsets(3, 5, 3, itemsets.clone()).unwrap();
        let mut counts = vec![0; tree.len()];
        for itemset in &itemsets {
            tree.match_transaction(itemset, &mut counts).unwrap();
        }

        assert_eq!(counts, brute_force_counts(tree.itemsets(), &itemsets));
        assert!(counts.iter().all(|&count| count == 1));
    }

    #[test]
    fn matches_lists_contained_itemsets() {
        let tree = HashTree::from_itemsets(2, 3, 1, vec![vec![0, 1], vec![0, 2], vec![1, 3]]).unwrap();

        assert_eq!(tree.matches(&[0, 1, 2]).unwrap(), vec![0, 1]);
        assert_eq!(tree.matches(&[1, 3]).unwrap(), vec![2]);
        assert!(tree.matches(&[3]).unwrap().is_empty());
    }

    #[test]
    fn internal_node_below_max_depth_is_a_defect() {
        let shape = Shape {
            size: 1,
            branching_factor: 1,
            leaf_capacity: 1,
        };
        let tree = HashTree {
            shape,
            itemsets: vec![vec![0]],
            root: Node::Internal(vec![Node::Internal(vec![Node::Leaf(vec![0])])]),
        };
        let defect = MiningError::HashTreeDepth { depth: 1, size: 1 };

        assert_eq!(tree.leaf_for(&[0]), Err(defect.clone()));
        let mut counts = vec![0; tree.len()];
        assert_eq!(tree.match_transaction(&[0], &mut counts), Err(defect));
        assert_eq!(counts, vec![0]);
    }

    #[test]
    fn path_shorter_than_tree_is_a_defect() {
        let mut tree = HashTree::new(2, 1, 1).unwrap();
        tree.insert(vec![0, 1]).unwrap();
        tree.insert(vec![0, 2]).unwrap();

        assert!(tree.leaf_for(&[0, 1]).is_ok());
        assert!(matches!(
            tree.leaf_for(&[0]),
            Err(MiningError::HashTreeDepth { depth: 1, size: 2 })
        ));
        assert!(matches!(
            tree.position(&[0]),
            Err(MiningError::HashTreeDepth { .. })
        ));
    }
}
