//! Queries: an output pattern plus conjunctive rules, executed against a
//! database.

use factdb_core::Value;
use factdb_dataflow::{collect, Operator, Row};
use factdb_engine::Database;
use tracing::{debug, trace};

use crate::compile::compile;
use crate::error::Result;
use crate::rule::{Rule, Term};
use crate::var::Var;

/// The ordered list of variables a query returns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    vars: Vec<Var>,
}

impl Pattern {
    /// Creates a pattern returning the given variables, in order.
    pub fn new<I, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Var>,
    {
        Pattern {
            vars: vars.into_iter().map(Into::into).collect(),
        }
    }

    /// A pattern returning no columns.
    pub fn empty() -> Self {
        Pattern::default()
    }

    /// The output variables, in declared order.
    pub fn vars(&self) -> &[Var] {
        &self.vars
    }
}

/// A compiled-on-demand conjunctive query.
///
/// # Example
///
/// ```ignore
/// let person = Var::named("p");
/// let show = Var::named("show");
/// let query = Query::new(
///     Pattern::new([&show]),
///     vec![
///         Rule::new(&person, "name", "Fred"),
///         Rule::new(&person, "show", &show),
///     ],
/// );
/// let result = query.execute(&db)?;
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    pattern: Pattern,
    rules: Vec<Rule>,
}

impl Query {
    /// Creates a query from an output pattern and its rules.
    pub fn new(pattern: Pattern, rules: Vec<Rule>) -> Self {
        Query { pattern, rules }
    }

    /// Compiles the query, runs it against `db`, and returns all rows.
    ///
    /// Compilation errors surface before any index is scanned; a failing
    /// query never returns partial rows.
    pub fn execute(&self, db: &Database) -> Result<QueryResult> {
        let rules = self.resolve_subject_idents(db)?;
        let plan = compile(&self.pattern, &rules)?;
        debug!(
            target: "factdb::query",
            rules = rules.len(),
            vars = self.pattern.vars().len(),
            "Compiled query plan"
        );

        let mut root = plan.lower(db)?;
        let rows = collect(&mut root)?;
        root.close()?;
        trace!(target: "factdb::query", rows = rows.len(), "Query executed");
        Ok(QueryResult { rows })
    }

    /// Replaces string subjects with the entity ids their idents name.
    ///
    /// Subjects are always entities, so a bound string subject can only be
    /// an ident; unknown idents fail here, before compilation.
    fn resolve_subject_idents(&self, db: &Database) -> Result<Vec<Rule>> {
        self.rules
            .iter()
            .map(|rule| match rule.subject() {
                Term::Value(Value::String(name)) => {
                    let id = db.resolve_ident(name)?;
                    Ok(rule.with_subject(Term::Value(Value::UInt(id.as_u64()))))
                }
                _ => Ok(rule.clone()),
            })
            .collect()
    }
}

/// Rows produced by [`Query::execute`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryResult {
    /// Result rows, one element per pattern variable, in pattern order.
    pub rows: Vec<Row>,
}

// ========================================
// Tests
// ========================================
