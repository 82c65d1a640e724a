//! Error types for query compilation and execution.

use thiserror::Error;

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced while compiling or executing a query.
///
/// Structural errors (`UnsupportedRuleShape`, `DuplicateAlias`,
/// `CartesianJoinNotPermitted`, `UnknownVariable`, `EmptyPlan`) are detected
/// during compilation, before any index scan runs, so a failing query has no
/// partial results.
#[derive(Error, Debug)]
pub enum Error {
    /// Database lookup or storage error.
    #[error(transparent)]
    Engine(#[from] factdb_engine::Error),

    /// Operator construction or execution error.
    #[error(transparent)]
    Dataflow(#[from] factdb_dataflow::Error),

    /// A rule mixes bound slots and variables in a way no index serves.
    #[error("Unsupported rule shape: {reason}")]
    UnsupportedRuleShape {
        /// What made the rule unusable.
        reason: String,
    },

    /// Two distinct variables in one query share a display alias.
    #[error("Duplicate variable alias: {alias:?} names two different variables")]
    DuplicateAlias {
        /// The colliding alias.
        alias: String,
    },

    /// The rules split into groups that share no variable.
    #[error("Cartesian join not permitted: rules do not share a variable")]
    CartesianJoinNotPermitted,

    /// The output pattern names a variable no rule binds.
    #[error("Unknown variable: {alias:?} does not appear in any rule")]
    UnknownVariable {
        /// Alias of the unbound variable.
        alias: String,
    },

    /// Every rule was fully bound, leaving nothing to scan.
    #[error("Query compiled to an empty plan: no rule produces rows")]
    EmptyPlan,
}

// ========================================
// Tests
// ========================================
