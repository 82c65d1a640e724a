//! Error types for the core crate
//!
//! This module defines the errors produced by the tuple codec and by typed
//! element access. We use `thiserror` for automatic `Display` and `Error`
//! trait implementations.

use crate::limits::LimitError;
use crate::value::ElementType;
use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by tuple encoding, decoding, and element access
#[derive(Debug, Error)]
pub enum Error {
    /// Encoded bytes could not be decoded into a tuple
    #[error("Decode error at byte {offset}: {reason}")]
    Decode {
        /// Byte offset where decoding failed
        offset: usize,
        /// What was wrong with the input
        reason: String,
    },

    /// A typed accessor was called on an element of a different type
    #[error("Type mismatch at element {index}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Element index within the tuple
        index: usize,
        /// Type the caller asked for
        expected: ElementType,
        /// Type actually stored
        actual: ElementType,
    },

    /// An element index was outside the tuple
    #[error("Element index out of range: {index} (tuple has {len} elements)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of elements in the tuple
        len: usize,
    },

    /// A size limit was exceeded
    #[error("Limit exceeded: {0}")]
    Limit(#[from] LimitError),
}

impl Error {
    /// Build a `Decode` error at the given byte offset.
    pub fn decode(offset: usize, reason: impl Into<String>) -> Self {
        Error::Decode {
            offset,
            reason: reason.into(),
        }
    }
}
