//! Error types for dataflow execution.

use thiserror::Error;

/// Result type for dataflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced while building or running an operator tree.
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying tuple or value error.
    #[error(transparent)]
    Core(#[from] factdb_core::Error),

    /// A projection referenced an alias absent from the source schema.
    #[error("Unknown alias: {alias:?} is not produced by the source operator")]
    UnknownAlias {
        /// The alias that could not be resolved.
        alias: String,
    },

    /// A join referenced a column index outside its side's schema.
    #[error("Join column {index} out of range for schema of width {width}")]
    JoinColumnOutOfRange {
        /// The offending column index.
        index: usize,
        /// Width of the schema the index was resolved against.
        width: usize,
    },

    /// A decoded row did not match the width the operator's schema promises.
    #[error("Row width mismatch: expected {expected} elements, got {actual}")]
    RowWidth {
        /// Width the schema promises.
        expected: usize,
        /// Width actually decoded.
        actual: usize,
    },
}

// ========================================
// Tests
// ========================================
