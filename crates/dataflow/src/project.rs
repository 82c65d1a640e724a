//! An operator that narrows rows to selected columns, renaming as it goes.

use crate::error::{Error, Result};
use crate::operator::{Operator, Row};
use crate::schema::{ElementDescriptor, RowSchema};
use factdb_core::Tuple;

/// Maps one source column to one output column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    src: String,
    dest: String,
}

impl Projection {
    /// Projects the source column `src` under the new alias `dest`.
    pub fn new(src: impl Into<String>, dest: impl Into<String>) -> Self {
        Projection {
            src: src.into(),
            dest: dest.into(),
        }
    }

    /// Projects `alias` without renaming it.
    pub fn keep(alias: impl Into<String>) -> Self {
        let alias = alias.into();
        Projection {
            src: alias.clone(),
            dest: alias,
        }
    }

    /// The source alias to read.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// The alias the column is exposed under.
    pub fn dest(&self) -> &str {
        &self.dest
    }
}

/// Reorders, narrows, and renames the columns of its source.
///
/// Output columns keep the element type of the source column they project.
/// Aliases are resolved against the source schema once, at construction, so an
/// unknown source alias is rejected before any row flows.
pub struct ProjectRename {
    source: Box<dyn Operator>,
    indexes: Vec<usize>,
    schema: RowSchema,
}

impl std::fmt::Debug for ProjectRename {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectRename")
            .field("indexes", &self.indexes)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl ProjectRename {
    /// Creates a projection of `source` with one output column per entry in
    /// `projections`, in order.
    ///
    /// Fails with [`Error::UnknownAlias`] if any `src` alias is absent from
    /// the source schema.
    pub fn new(source: Box<dyn Operator>, projections: Vec<Projection>) -> Result<Self> {
        let mut indexes = Vec::with_capacity(projections.len());
        let mut columns = Vec::with_capacity(projections.len());
        for projection in &projections {
            let index = source
                .schema()
                .index_of(projection.src())
                .ok_or_else(|| Error::UnknownAlias {
                    alias: projection.src().to_string(),
                })?;
            let element_type = source.schema().columns()[index].element_type();
            indexes.push(index);
            columns.push(ElementDescriptor::new(projection.dest(), element_type));
        }
        Ok(ProjectRename {
            source,
            indexes,
            schema: RowSchema::new(columns),
        })
    }
}

impl Operator for ProjectRename {
    fn next(&mut self) -> Result<Option<Row>> {
        let row = match self.source.next()? {
            Some(row) => row,
            None => return Ok(None),
        };
        let mut values = Vec::with_capacity(self.indexes.len());
        for &index in &self.indexes {
            values.push(row.get(index)?.clone());
        }
        Ok(Some(Tuple::new(values)))
    }

    fn schema(&self) -> &RowSchema {
        &self.schema
    }

    fn close(&mut self) -> Result<()> {
        self.source.close()
    }
}

// ========================================
// Tests
// ========================================
