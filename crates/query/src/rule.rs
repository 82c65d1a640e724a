//! Triple-pattern rules: the building blocks of a query.

use std::fmt;

use factdb_core::{EntityId, Value};

use crate::var::Var;

/// One slot of a rule: either a concrete value or a logic variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// A bound, concrete value.
    Value(Value),
    /// An unbound variable to be matched.
    Var(Var),
}

impl Term {
    /// The variable in this slot, if it holds one.
    pub fn as_var(&self) -> Option<&Var> {
        match self {
            Term::Var(var) => Some(var),
            Term::Value(_) => None,
        }
    }

    /// The concrete value in this slot, if it holds one.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Term::Value(value) => Some(value),
            Term::Var(_) => None,
        }
    }
}

impl From<Var> for Term {
    fn from(var: Var) -> Self {
        Term::Var(var)
    }
}

impl From<&Var> for Term {
    fn from(var: &Var) -> Self {
        Term::Var(var.clone())
    }
}

impl From<Value> for Term {
    fn from(value: Value) -> Self {
        Term::Value(value)
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Term::Value(Value::String(s.to_string()))
    }
}

impl From<String> for Term {
    fn from(s: String) -> Self {
        Term::Value(Value::String(s))
    }
}

impl From<i64> for Term {
    fn from(n: i64) -> Self {
        Term::Value(Value::Int(n))
    }
}

impl From<u64> for Term {
    fn from(n: u64) -> Self {
        Term::Value(Value::UInt(n))
    }
}

impl From<bool> for Term {
    fn from(b: bool) -> Self {
        Term::Value(Value::Bool(b))
    }
}

impl From<EntityId> for Term {
    fn from(id: EntityId) -> Self {
        Term::Value(Value::Ref(id))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Value(value) => write!(f, "{value}"),
            Term::Var(var) => write!(f, "?{var}"),
        }
    }
}

/// A (subject, predicate, object) pattern matched against stored facts.
///
/// Any slot may be a [`Var`]; bound slots constrain the match. A bound
/// subject is an entity: pass a `u64`, an [`EntityId`], or an ident name
/// (resolved against the database at execution time).
///
/// # Example
///
/// ```ignore
/// let person = Var::named("p");
/// let rule = Rule::new(&person, "name", "Fred");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    subject: Term,
    predicate: Term,
    object: Term,
}

impl Rule {
    /// Creates a rule from its three slots.
    pub fn new(
        subject: impl Into<Term>,
        predicate: impl Into<Term>,
        object: impl Into<Term>,
    ) -> Self {
        Rule {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// The subject slot.
    pub fn subject(&self) -> &Term {
        &self.subject
    }

    /// The predicate slot.
    pub fn predicate(&self) -> &Term {
        &self.predicate
    }

    /// The object slot.
    pub fn object(&self) -> &Term {
        &self.object
    }

    pub(crate) fn with_subject(&self, subject: Term) -> Rule {
        Rule {
            subject,
            predicate: self.predicate.clone(),
            object: self.object.clone(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.subject, self.predicate, self.object)
    }
}

// ========================================
// Tests
// ========================================
