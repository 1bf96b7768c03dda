//! Error types for costflow-domain.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// A cost field could not be turned into a whole, non-negative amount.
    ///
    /// `row` is the 1-based data row, not counting the header.
    #[error("malformed cost {value:?} in data row {row}: {defect}")]
    MalformedCost {
        row: usize,
        value: String,
        defect: CostDefect,
    },
}

/// Why a single cost value was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CostDefect {
    #[error("empty value")]
    Empty,

    #[error("not a number")]
    NotANumber,

    #[error("negative amount")]
    Negative,

    #[error("amount out of range")]
    OutOfRange,
}
