pub mod candidates;
pub mod count;
pub mod hash_tree;
