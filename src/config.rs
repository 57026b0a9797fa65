use crate::error::{MiningError, Result};

pub const DEFAULT_BRANCHING_FACTOR: usize = 5;
pub const DEFAULT_LEAF_CAPACITY: usize = 5;

/// Parameters of one mining run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiningConfig {
    pub min_support: f64,
    pub min_confidence: f64,
    /// Number of children of every internal hash tree node.
    pub branching_factor: usize,
    /// Number of itemsets a hash tree leaf holds before it is divided.
    pub leaf_capacity: usize,
    /// Longest itemset to mine. `None` runs until a level comes up empty.
    pub max_length: Option<usize>,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: 0.01,
            min_confidence: 0.5,
            branching_factor: DEFAULT_BRANCHING_FACTOR,
            leaf_capacity: DEFAULT_LEAF_CAPACITY,
            max_length: None,
        }
    }
}

impl MiningConfig {
    pub fn new(min_support: f64, min_confidence: f64) -> Self {
        Self {
            min_support,
            min_confidence,
            ..Self::default()
        }
    }

    pub fn with_branching_factor(mut self, branching_factor: usize) -> Self {
        self.branching_factor = branching_factor;
        self
    }

    pub fn with_leaf_capacity(mut self, leaf_capacity: usize) -> Self {
        self.leaf_capacity = leaf_capacity;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !is_fraction(self.min_support) {
            return Err(MiningError::InvalidMinSupport(self.min_support));
        }
        if !is_fraction(self.min_confidence) {
            return Err(MiningError::InvalidMinConfidence(self.min_confidence));
        }
        if self.branching_factor == 0 {
            return Err(MiningError::InvalidBranchingFactor(self.branching_factor));
        }
        if self.leaf_capacity == 0 {
            return Err(MiningError::InvalidLeafCapacity(self.leaf_capacity));
        }
        if self.max_length == Some(0) {
            return Err(MiningError::InvalidMaxLength(0));
        }
        Ok(())
    }

    /// Real-valued support threshold for a corpus of `num_transactions`.
    /// Not rounded: an itemset is frequent iff its count is >= this value.
    pub fn min_support_count(&self, num_transactions: usize) -> f64 {
        self.min_support * num_transactions as f64
    }

    pub(crate) fn allows_length(&self, size: usize) -> bool {
        self.max_length.map_or(true, |max_length| size <= max_length)
    }
}

fn is_fraction(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}
