//! A nested-loop inner join over two operators.

use crate::error::{Error, Result};
use crate::operator::{collect, Operator, Row};
use crate::schema::RowSchema;

struct JoinState {
    left_rows: Vec<Row>,
    right_rows: Vec<Row>,
    i: usize,
    j: usize,
}

/// Joins two sources on equality of one column from each side.
///
/// Output rows are `left ++ right` and the output schema is the concatenation
/// of both source schemas, so duplicate aliases can appear; downstream lookups
/// resolve to the leftmost occurrence.
///
/// ## Design
///
/// Both sides are fully materialized on the first [`next`](Operator::next)
/// call, then matched with a nested loop. The cursor pair survives between
/// calls, so each `next` resumes exactly where the previous match left off and
/// non-unique keys produce one output row per matching pair.
///
/// Values only join when both type and payload agree; an `Int` never equals a
/// `UInt`, even for the same number.
pub struct InnerJoin {
    left: Box<dyn Operator>,
    right: Box<dyn Operator>,
    left_key: usize,
    right_key: usize,
    schema: RowSchema,
    state: Option<JoinState>,
    closed: bool,
}

impl std::fmt::Debug for InnerJoin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InnerJoin")
            .field("left_key", &self.left_key)
            .field("right_key", &self.right_key)
            .field("schema", &self.schema)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl InnerJoin {
    /// Creates a join matching `left`'s column `left_key` against `right`'s
    /// column `right_key`.
    ///
    /// Fails with [`Error::JoinColumnOutOfRange`] if either key index falls
    /// outside its side's schema.
    pub fn new(
        left: Box<dyn Operator>,
        left_key: usize,
        right: Box<dyn Operator>,
        right_key: usize,
    ) -> Result<Self> {
        if left_key >= left.schema().len() {
            return Err(Error::JoinColumnOutOfRange {
                index: left_key,
                width: left.schema().len(),
            });
        }
        if right_key >= right.schema().len() {
            return Err(Error::JoinColumnOutOfRange {
                index: right_key,
                width: right.schema().len(),
            });
        }
        let schema = left.schema().concat(right.schema());
        Ok(InnerJoin {
            left,
            right,
            left_key,
            right_key,
            schema,
            state: None,
            closed: false,
        })
    }
}

impl Operator for InnerJoin {
    fn next(&mut self) -> Result<Option<Row>> {
        if self.closed {
            return Ok(None);
        }
        if self.state.is_none() {
            let left_rows = collect(&mut self.left)?;
            let right_rows = collect(&mut self.right)?;
            self.state = Some(JoinState {
                left_rows,
                right_rows,
                i: 0,
                j: 0,
            });
        }
        let state = match self.state.as_mut() {
            Some(state) => state,
            None => return Ok(None),
        };
        while state.i < state.left_rows.len() {
            let left_row = &state.left_rows[state.i];
            while state.j < state.right_rows.len() {
                let right_row = &state.right_rows[state.j];
                state.j += 1;
                if left_row.get(self.left_key)? == right_row.get(self.right_key)? {
                    return Ok(Some(left_row.concat(right_row)));
                }
            }
            state.j = 0;
            state.i += 1;
        }
        Ok(None)
    }

    fn schema(&self) -> &RowSchema {
        &self.schema
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.state = None;
        let left = self.left.close();
        let right = self.right.close();
        left.and(right)
    }
}

// ========================================
// Tests
// ========================================
