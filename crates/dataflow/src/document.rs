//! Terminal adapter that turns rows into alias-keyed documents.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::operator::Operator;
use factdb_core::Value;

/// A row rendered as a map from column alias to value.
pub type Document = BTreeMap<String, Value>;

/// Drains an operator tree into [`Document`]s instead of positional rows.
///
/// Keys come from the source schema's aliases. When the source carries
/// duplicate aliases, the rightmost column wins, so narrow the tree with a
/// projection first if that matters.
///
/// This is an output adapter rather than an [`Operator`]: documents are the
/// end of the line, not rows for further operators to consume.
pub struct IntoDocument {
    source: Box<dyn Operator>,
}

impl IntoDocument {
    /// Wraps `source` for document output.
    pub fn new(source: Box<dyn Operator>) -> Self {
        IntoDocument { source }
    }

    /// Produces the next document, or `None` once the source is exhausted.
    pub fn next(&mut self) -> Result<Option<Document>> {
        let row = match self.source.next()? {
            Some(row) => row,
            None => return Ok(None),
        };
        let mut document = Document::new();
        for (index, column) in self.source.schema().columns().iter().enumerate() {
            document.insert(column.alias().to_string(), row.get(index)?.clone());
        }
        Ok(Some(document))
    }

    /// Drains the source and returns every document.
    pub fn collect(&mut self) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        while let Some(document) = self.next()? {
            documents.push(document);
        }
        Ok(documents)
    }

    /// Closes the underlying operator tree.
    pub fn close(&mut self) -> Result<()> {
        self.source.close()
    }
}

// ========================================
// Tests
// ========================================
