//! Pull-based dataflow operators for query execution.
//!
//! A query runs as a tree of [`Operator`]s pulled from the root: leaves read
//! stored data ([`IndexScan`]) or fixed rows ([`Generate`]), interior nodes
//! transform what flows through them ([`Filter`], [`Limit`], [`InnerJoin`],
//! [`ProjectRename`]), and [`IntoDocument`] renders the final rows as keyed
//! documents. Rows are plain tuples; each operator advertises a [`RowSchema`]
//! naming and typing its columns so consumers can resolve aliases up front.
//!
//! # Example
//!
//! ```ignore
//! let scan = IndexScan::new(index, prefix, schema);
//! let top = Limit::new(Box::new(scan), 10);
//! let rows = collect(&mut top)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod document;
mod error;
mod filter;
mod generate;
mod index_scan;
mod join;
mod limit;
mod operator;
mod project;
mod schema;


pub use document::{Document, IntoDocument};
pub use error::{Error, Result};
pub use filter::{Filter, FilterPredicate};
pub use generate::Generate;
pub use index_scan::IndexScan;
pub use join::InnerJoin;
pub use limit::Limit;
pub use operator::{collect, Operator, Row};
pub use project::{ProjectRename, Projection};
pub use schema::{ElementDescriptor, RowSchema};
