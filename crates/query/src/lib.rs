//! Conjunctive triple-pattern queries over a fact database.
//!
//! A query pairs a [`Pattern`] (which variables to return, in order) with a
//! set of [`Rule`]s (triple patterns over those variables). Compilation
//! picks a covering index for each rule based on which slots are bound,
//! merges rules that share a variable into inner joins, and rejects rule
//! sets that would need a cartesian product. The compiled plan lowers
//! one-to-one onto dataflow operators and runs synchronously.
//!
//! # Example
//!
//! ```ignore
//! let person = Var::named("p");
//! let show = Var::named("show");
//! let result = Query::new(
//!     Pattern::new([&show]),
//!     vec![
//!         Rule::new(&person, "name", "Fred"),
//!         Rule::new(&person, "show", &show),
//!     ],
//! )
//! .execute(&db)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod compile;
mod error;
mod plan;
mod query;
mod rule;
mod var;


pub use error::{Error, Result};
pub use query::{Pattern, Query, QueryResult};
pub use rule::{Rule, Term};
pub use var::Var;
