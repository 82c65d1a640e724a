//! An operator that caps how many rows flow past it.

use crate::error::Result;
use crate::operator::{Operator, Row};
use crate::schema::RowSchema;

/// Emits at most `remaining` rows from its source, then reports exhaustion.
///
/// Once the cap is hit the source is no longer pulled, so upstream operators
/// do no further work.
pub struct Limit {
    source: Box<dyn Operator>,
    remaining: usize,
}

impl Limit {
    /// Creates a limit over `source` that lets through at most `count` rows.
    pub fn new(source: Box<dyn Operator>, count: usize) -> Self {
        Limit {
            source,
            remaining: count,
        }
    }
}

impl Operator for Limit {
    fn next(&mut self) -> Result<Option<Row>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        match self.source.next()? {
            Some(row) => {
                self.remaining -= 1;
                Ok(Some(row))
            }
            None => {
                self.remaining = 0;
                Ok(None)
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
