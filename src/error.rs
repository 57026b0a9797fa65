use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum MiningError {
    InvalidMinSupport(f64),
    InvalidMinConfidence(f64),
    InvalidBranchingFactor(usize),
    InvalidLeafCapacity(usize),
    InvalidMaxLength(usize),
    EmptyCorpus,
    ItemsetSize { expected: usize, found: usize },
    HashTreeDepth { depth: usize, size: usize },
    Io(String),
}

impl fmt::Display for MiningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MiningError::InvalidMinSupport(value) => {
                write!(f, "min support must be in (0, 1], got {}", value)
            }
            MiningError::InvalidMinConfidence(value) => {
                write!(f, "min confidence must be in (0, 1], got {}", value)
            }
            MiningError::InvalidBranchingFactor(value) => {
                write!(f, "hash tree branching factor must be positive, got {}", value)
            }
            MiningError::InvalidLeafCapacity(value) => {
                write!(f, "hash tree leaf capacity must be positive, got {}", value)
            }
            MiningError::InvalidMaxLength(value) => {
                write!(f, "max itemset length must be positive, got {}", value)
            }
            MiningError::EmptyCorpus => write!(f, "no transactions to mine"),
            MiningError::ItemsetSize { expected, found } => write!(
                f,
                "hash tree holds itemsets of size {}, got one of size {}",
                expected, found
            ),
            MiningError::HashTreeDepth { depth, size } => write!(
                f,
                "hash tree traversal for size {} broke at depth {}",
                size, depth
            ),
            MiningError::Io(msg) => write!(f, "I/O failed: {}", msg),
        }
    }
}

impl std::error::Error for MiningError {}

impl From<std::io::Error> for MiningError {
    fn from(err: std::io::Error) -> Self {
        MiningError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MiningError>;
