//! Error types for the engine crate

use factdb_core::LimitError;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the fact database
#[derive(Debug, Error)]
pub enum Error {
    /// Tuple codec or element access error
    #[error(transparent)]
    Core(#[from] factdb_core::Error),

    /// A name or value exceeded a configured size limit
    #[error("Limit exceeded: {0}")]
    Limit(#[from] LimitError),

    /// An ident name was looked up before being created
    #[error("Unknown ident: {name:?}")]
    UnknownIdent {
        /// The name that failed to resolve
        name: String,
    },

    /// A temp id was used but never assigned an identity
    #[error("Every temp id in a transaction must be assigned an identity")]
    UnassignedTempId,

    /// The identity attribute held something that cannot name an entity
    #[error("Invalid identity field: {reason}")]
    InvalidIdentityField {
        /// What was wrong with the field
        reason: String,
    },
}
