use num_bigint::BigUint;
use thiserror::Error;

/// Errors raised by the sharing, chunking and encryption layers.
///
/// Every failure is detected synchronously, names the invariant that was
/// violated together with the offending values, and leaves no partial
/// state behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharingError {
    /// A sharing, resharing or codec was configured with parameters that
    /// cannot produce a valid instance.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// An operand lies outside the domain of the operation, such as
    /// inverting zero or encrypting with an out-of-range ephemeral.
    #[error("invalid operand: {0}")]
    InvalidOperand(String),

    /// Fewer distinct shares were supplied than the threshold requires.
    #[error("insufficient shares: got {got}, need {need}")]
    InsufficientShares { got: usize, need: usize },

    /// Two shares with the same index were supplied to a reconstruction.
    #[error("duplicate share index {index}")]
    DuplicateShareIndex { index: u32 },

    /// A chunk handed to reassembly does not fit below the chunk bound.
    #[error("chunk {chunk} is not below the chunk bound {bound}")]
    ChunkOverflow { chunk: BigUint, bound: BigUint },

    /// Discrete-log search exhausted the exponent range without a match.
    #[error("no discrete log found below bound {bound}")]
    ChunkNotFound { bound: u64 },
}
