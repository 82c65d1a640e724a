//! The pull-based operator interface.
//!
//! ## Design
//!
//! Operators form a tree pulled from the root: each call to [`Operator::next`]
//! produces at most one row, drawing on the operator's sources as needed.
//! Nothing runs until the consumer asks, so a [`Limit`](crate::Limit) near the
//! root stops upstream work as soon as its quota is met.
//!
//! [`Operator::schema`] describes the rows an operator emits and is available
//! before the first `next` call; consumers resolve aliases against it once and
//! then address row elements by position.
//!
//! [`Operator::close`] releases any held resources. Implementations are
//! idempotent: closing twice is harmless, and `next` after `close` reports
//! exhaustion rather than panicking.

use crate::error::Result;
use crate::schema::RowSchema;
use factdb_core::Tuple;

/// A single materialized row flowing between operators.
pub type Row = Tuple;

/// A pull-based source of rows.
pub trait Operator {
    /// Produces the next row, or `None` once the operator is exhausted.
    fn next(&mut self) -> Result<Option<Row>>;

    /// The shape of the rows this operator emits.
    fn schema(&self) -> &RowSchema;

    /// Releases resources held by this operator and its sources.
    fn close(&mut self) -> Result<()>;
}

impl<T: Operator + ?Sized> Operator for Box<T> {
    fn next(&mut self) -> Result<Option<Row>> {
        (**self).next()
    }

    fn schema(&self) -> &RowSchema {
        (**self).schema()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Drains `op` to exhaustion and returns every row it produced.
///
/// The operator is left exhausted but not closed; callers that are done with
/// the tree should still call [`Operator::close`].
pub fn collect<O: Operator + ?Sized>(op: &mut O) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    while let Some(row) = op.next()? {
        rows.push(row);
    }
    Ok(rows)
}

// ========================================
// Tests
// ========================================
