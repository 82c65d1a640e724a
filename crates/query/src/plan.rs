//! Logical plan nodes and their lowering into dataflow operators.
//!
//! The compiler builds a small tree of typed [`PlanNode`]s; lowering maps
//! each node onto exactly one dataflow operator bound to the database's
//! index handles. Keeping the plan typed means no slot lookups or runtime
//! casts happen during lowering.

use factdb_core::{ElementType, Tuple, Value};
use factdb_dataflow::{
    ElementDescriptor, Filter, IndexScan, InnerJoin, Operator, ProjectRename, Projection, Row,
    RowSchema,
};
use factdb_engine::{Database, IndexKind};

use crate::error::Result;

/// Alias of the entity column in scan output.
pub(crate) const SUBJECT: &str = "subject";
/// Alias of the predicate-name column in scan output.
pub(crate) const PREDICATE: &str = "predicate";
/// Alias of the object-value column in scan output.
pub(crate) const OBJECT: &str = "object";

/// Column layout of a raw scan over the given index, in row order.
///
/// Rows come back as decoded key elements followed by the posting, so the
/// layout tracks each index's key shape. Object values can hold any scalar
/// type, which the schema records as unknown.
pub(crate) fn scan_columns(index: IndexKind) -> [(&'static str, ElementType); 3] {
    match index {
        IndexKind::Spo => [
            (SUBJECT, ElementType::UInt),
            (PREDICATE, ElementType::String),
            (OBJECT, ElementType::Unknown),
        ],
        IndexKind::Pso => [
            (PREDICATE, ElementType::String),
            (SUBJECT, ElementType::UInt),
            (OBJECT, ElementType::Unknown),
        ],
        IndexKind::Pos => [
            (PREDICATE, ElementType::String),
            (OBJECT, ElementType::Unknown),
            (SUBJECT, ElementType::UInt),
        ],
    }
}

/// One node of a compiled logical plan.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlanNode {
    /// Prefix scan over one of the database's indexes.
    Scan {
        index: IndexKind,
        prefix: Tuple,
    },
    /// Keep only rows whose `column` equals `value`.
    Filter {
        source: Box<PlanNode>,
        column: usize,
        value: Value,
    },
    /// Narrow and rename columns, `(src, dest)` per output column.
    Project {
        source: Box<PlanNode>,
        projections: Vec<(String, String)>,
    },
    /// Inner join on equality of one column from each side.
    Join {
        left: Box<PlanNode>,
        right: Box<PlanNode>,
        left_key: usize,
        right_key: usize,
    },
}

impl PlanNode {
    /// The aliases this node outputs, in column order.
    ///
    /// Join output keeps both sides' aliases, duplicates included; alias
    /// lookups during planning resolve to the leftmost occurrence, matching
    /// the row schemas the lowered operators will advertise.
    pub(crate) fn output_aliases(&self) -> Vec<String> {
        match self {
            PlanNode::Scan { index, .. } => scan_columns(*index)
                .iter()
                .map(|(alias, _)| (*alias).to_string())
                .collect(),
            PlanNode::Filter { source, .. } => source.output_aliases(),
            PlanNode::Project { projections, .. } => {
                projections.iter().map(|(_, dest)| dest.clone()).collect()
            }
            PlanNode::Join { left, right, .. } => {
                let mut aliases = left.output_aliases();
                aliases.extend(right.output_aliases());
                aliases
            }
        }
    }

    /// Lowers this node and everything under it into an executable operator.
    pub(crate) fn lower(self, db: &Database) -> Result<Box<dyn Operator>> {
        match self {
            PlanNode::Scan { index, prefix } => {
                let columns = scan_columns(index)
                    .iter()
                    .map(|(alias, element_type)| ElementDescriptor::new(*alias, *element_type))
                    .collect();
                let scan = IndexScan::new(db.index(index), prefix.encode(), RowSchema::new(columns));
                Ok(Box::new(scan))
            }
            PlanNode::Filter {
                source,
                column,
                value,
            } => {
                let source = source.lower(db)?;
                let predicate = Box::new(move |row: &Row, _schema: &RowSchema| {
                    Ok(row.get(column)? == &value)
                });
                Ok(Box::new(Filter::new(source, predicate)))
            }
            PlanNode::Project {
                source,
                projections,
            } => {
                let source = source.lower(db)?;
                let projections = projections
                    .into_iter()
                    .map(|(src, dest)| Projection::new(src, dest))
                    .collect();
                Ok(Box::new(ProjectRename::new(source, projections)?))
            }
            PlanNode::Join {
                left,
                right,
                left_key,
                right_key,
            } => {
                let left = left.lower(db)?;
                let right = right.lower(db)?;
                Ok(Box::new(InnerJoin::new(left, left_key, right, right_key)?))
            }
        }
    }
}

// ========================================
// Tests
// ========================================
