//! Error types shared by the whole crate.

use thiserror::Error;

/// Result type alias for ID3 operations
pub type Result<T> = std::result::Result<T, Id3Error>;

#[derive(Error, Debug)]
pub enum Id3Error {
    #[error("Attribute index {index} is out of bounds for a record of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Some attribute names are the same: {0}")]
    DuplicateAttribute(String),

    #[error("Should be at least one attribute in the data.")]
    NoAttributes,

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Row {row} should have {expected} values, got {actual}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Domain of attribute '{0}' does not match the values of its column")]
    DomainMismatch(String),

    #[error("Dataset has no records")]
    EmptyDataset,

    #[error("Node holds no instances")]
    EmptyNode,

    #[error("Tree wasn't built yet.")]
    NotFitted,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Predictions and labels are of different sizes: {expected} != {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
