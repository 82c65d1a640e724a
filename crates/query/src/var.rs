//! Logic variables for triple-pattern rules.

use std::fmt;

/// A logic variable marking an unbound slot in a rule.
///
/// Identity is by allocation, not by name: two variables carry distinct
/// random discriminators even when they display the same name, and only
/// clones of one `Var` refer to the same query position. The display alias
/// doubles as the join key during compilation, so every variable in a query
/// must have a distinct alias; named variables that collide are rejected at
/// compile time.
#[derive(Debug, Clone)]
pub struct Var {
    id: u64,
    name: Option<String>,
}

impl Var {
    /// Creates an anonymous variable with a unique generated alias.
    pub fn fresh() -> Self {
        Var {
            id: rand::random(),
            name: None,
        }
    }

    /// Creates a variable displayed as `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Var {
            id: rand::random(),
            name: Some(name.into()),
        }
    }

    /// The textual alias used for projection and join matching.
    ///
    /// Named variables use their name; anonymous ones derive a canonical
    /// form from their discriminator.
    pub fn alias(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("_{:016x}", self.id),
        }
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }
}

impl From<&Var> for Var {
    fn from(var: &Var) -> Self {
        var.clone()
    }
}

impl PartialEq for Var {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Var {}

impl std::hash::Hash for Var {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.alias())
    }
}

// ========================================
// Tests
// ========================================
