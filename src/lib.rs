//! FactDB - embedded in-memory triple store with a conjunctive query engine.
//!
//! Facts are (subject, predicate, object) triples held in three covering
//! indexes, each keyed by an order-preserving tuple encoding. Queries are
//! conjunctions of triple patterns over logic variables, compiled to a join
//! plan and executed through a pull-based operator pipeline.
//!
//! # Quick Start
//!
//! ```ignore
//! use factdb::{Database, Pattern, Query, Rule, Var};
//!
//! let db = Database::new();
//! db.observe(1u64, "name", "Fred")?;
//! db.observe(1u64, "show", "The Flinstones")?;
//!
//! let show = Var::named("show");
//! let person = Var::named("person");
//! let result = Query::new(
//!     Pattern::new([&show]),
//!     vec![
//!         Rule::new(&person, "name", "Fred"),
//!         Rule::new(&person, "show", &show),
//!     ],
//! )
//! .execute(&db)?;
//! ```
//!
//! # Architecture
//!
//! The workspace layers cleanly: `factdb-core` owns values and the tuple
//! codec, `factdb-storage` the ordered postings indexes, `factdb-engine`
//! the fact database and transactions, `factdb-dataflow` the operator
//! pipeline, and `factdb-query` the compiler that ties them together. This
//! crate re-exports the public surface of each.

// Re-export the public API, disambiguating each layer's error type.
pub use factdb_core::{
    ElementType, EntityId, Error as CoreError, LimitError, Limits, Tuple, Value,
};
pub use factdb_dataflow::{
    collect, Document, ElementDescriptor, Error as DataflowError, Filter, FilterPredicate,
    Generate, IndexScan, InnerJoin, IntoDocument, Limit, Operator, ProjectRename, Projection,
    Row, RowSchema,
};
pub use factdb_engine::{
    AttrValue, Database, Entity, EntityUpdate, Error as DatabaseError, Fact, IndexHandle,
    IndexKind, Subject, TempId, TxData, TxResult, UpdateValue, IDENTITY_PREDICATE,
};
pub use factdb_query::{
    Error as QueryError, Pattern, Query, QueryResult, Rule, Term, Var,
};
pub use factdb_storage::{scan_decoded, DecodedEntry, IndexEntry, PostingsIndex, Scan};
