//! An operator that keeps only rows matching a predicate.

use crate::error::Result;
use crate::operator::{Operator, Row};
use crate::schema::RowSchema;

/// Predicate applied to each candidate row alongside the source schema.
///
/// The schema lets predicates resolve aliases instead of hard-coding
/// positions. Returning an error aborts the pull.
pub type FilterPredicate = Box<dyn Fn(&Row, &RowSchema) -> Result<bool>>;

/// Emits only the source rows for which the predicate returns `true`.
///
/// The output schema is the source schema unchanged.
pub struct Filter {
    source: Box<dyn Operator>,
    predicate: FilterPredicate,
}

impl Filter {
    /// Creates a filter over `source` governed by `predicate`.
    pub fn new(source: Box<dyn Operator>, predicate: FilterPredicate) -> Self {
        Filter { source, predicate }
    }
}

impl Operator for Filter {
    fn next(&mut self) -> Result<Option<Row>> {
        loop {
            let row = match self.source.next()? {
                Some(row) => row,
                None => return Ok(None),
            };
            if (self.predicate)(&row, self.source.schema())? {
                return Ok(Some(row));
            }
        }
    }

    fn schema(&self) -> &RowSchema {
        self.source.schema()
    }

    fn close(&mut self) -> Result<()> {
        self.source.close()
    }
}

// ========================================
// Tests
// ========================================
