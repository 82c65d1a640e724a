//! An operator that reads rows out of an ordered postings index.

use std::collections::VecDeque;

use tracing::trace;

use crate::error::{Error, Result};
use crate::operator::{Operator, Row};
use crate::schema::RowSchema;
use factdb_core::Tuple;
use factdb_storage::Scan;

/// Scans an index by key prefix and emits one row per posting.
///
/// Each matching index entry contributes `key ++ posting` rows: the decoded
/// key tuple concatenated with each decoded posting tuple. The scan runs once,
/// on the first [`next`](Operator::next) call, and buffers its rows; the
/// operator then drains the buffer.
pub struct IndexScan<S> {
    source: S,
    prefix: Vec<u8>,
    schema: RowSchema,
    buffer: Option<VecDeque<Row>>,
    closed: bool,
}

impl<S: Scan> IndexScan<S> {
    /// Creates a scan over `source` restricted to keys starting with `prefix`.
    ///
    /// `schema` must describe the concatenated key-plus-posting rows; rows of
    /// any other width are reported as an error during the scan.
    pub fn new(source: S, prefix: Vec<u8>, schema: RowSchema) -> Self {
        IndexScan {
            source,
            prefix,
            schema,
            buffer: None,
            closed: false,
        }
    }

    fn fill_buffer(&mut self) -> Result<VecDeque<Row>> {
        let mut rows = VecDeque::new();
        for entry in self.source.scan_prefix(&self.prefix) {
            let key = Tuple::decode(&entry.key)?;
            for posting in &entry.postings {
                let row = key.concat(&Tuple::decode(posting)?);
                if row.len() != self.schema.len() {
                    return Err(Error::RowWidth {
                        expected: self.schema.len(),
                        actual: row.len(),
                    });
                }
                rows.push_back(row);
            }
        }
        trace!(
            target: "factdb::dataflow",
            prefix_len = self.prefix.len(),
            rows = rows.len(),
            "Index scan buffered"
        );
        Ok(rows)
    }
}

impl<S: Scan> Operator for IndexScan<S> {
    fn next(&mut self) -> Result<Option<Row>> {
        if self.closed {
            return Ok(None);
        }
        if self.buffer.is_none() {
            let rows = self.fill_buffer()?;
            self.buffer = Some(rows);
        }
        Ok(self.buffer.as_mut().and_then(VecDeque::pop_front))
    }

    fn schema(&self) -> &RowSchema {
        &self.schema
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.buffer = None;
        Ok(())
    }
}

// ========================================
// Tests
// ========================================
