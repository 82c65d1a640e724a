//! An operator that emits a fixed, in-memory list of rows.

use std::collections::VecDeque;

use crate::error::Result;
use crate::operator::{Operator, Row};
use crate::schema::RowSchema;

/// Emits a caller-supplied list of rows in order.
///
/// Useful as a leaf for tests and for feeding already-materialized data into
/// an operator tree.
pub struct Generate {
    schema: RowSchema,
    rows: VecDeque<Row>,
}

impl Generate {
    /// Creates a source that yields `rows` one at a time under `schema`.
    ///
    /// The rows are not checked against the schema; callers are expected to
    /// hand in rows of the advertised shape.
    pub fn new(schema: RowSchema, rows: Vec<Row>) -> Self {
        Generate {
            schema,
            rows: rows.into(),
        }
    }
}

impl Operator for Generate {
    fn next(&mut self) -> Result<Option<Row>> {
        Ok(self.rows.pop_front())
    }

    fn schema(&self) -> &RowSchema {
        &self.schema
    }

    fn close(&mut self) -> Result<()> {
        self.rows.clear();
        Ok(())
    }
}

// ========================================
// Tests
// ========================================
