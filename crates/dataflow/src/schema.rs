//! Row schemas describing the shape of operator output.
//!
//! Every operator advertises a [`RowSchema`]: one [`ElementDescriptor`] per
//! column, pairing a caller-chosen alias with the element type found at that
//! position. Downstream operators resolve aliases to positions once, at
//! construction time, so the per-row hot path works with plain indexes.

use std::fmt;

use factdb_core::ElementType;

// === Element Descriptor ===

/// A single named column in an operator's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDescriptor {
    alias: String,
    element_type: ElementType,
}

impl ElementDescriptor {
    /// Creates a descriptor for a column named `alias` holding `element_type`.
    pub fn new(alias: impl Into<String>, element_type: ElementType) -> Self {
        ElementDescriptor {
            alias: alias.into(),
            element_type,
        }
    }

    /// The alias this column is addressed by.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The element type stored at this column.
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }
}

impl fmt::Display for ElementDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.alias, self.element_type)
    }
}

// === Row Schema ===

/// An ordered list of column descriptors.
///
/// Aliases are not required to be unique. Lookup by alias resolves to the
/// first matching column, mirroring how joined rows shadow later duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowSchema {
    columns: Vec<ElementDescriptor>,
}

impl RowSchema {
    /// Creates a schema from the given columns.
    pub fn new(columns: Vec<ElementDescriptor>) -> Self {
        RowSchema { columns }
    }

    /// Creates an empty schema.
    pub fn empty() -> Self {
        RowSchema::default()
    }

    /// The column descriptors, in row order.
    pub fn columns(&self) -> &[ElementDescriptor] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` when the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The descriptor at position `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&ElementDescriptor> {
        self.columns.get(index)
    }

    /// Position of the first column named `alias`, if any.
    pub fn index_of(&self, alias: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.alias() == alias)
    }

    /// Returns a new schema with `other`'s columns appended after this one's.
    pub fn concat(&self, other: &RowSchema) -> RowSchema {
        let mut columns = Vec::with_capacity(self.columns.len() + other.columns.len());
        columns.extend_from_slice(&self.columns);
        columns.extend_from_slice(&other.columns);
        RowSchema { columns }
    }
}

impl FromIterator<ElementDescriptor> for RowSchema {
    fn from_iter<I: IntoIterator<Item = ElementDescriptor>>(iter: I) -> Self {
        RowSchema {
            columns: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for RowSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{column}")?;
        }
        write!(f, ")")
    }
}

// ========================================
// Tests
// ========================================
