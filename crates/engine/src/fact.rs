//! Facts and their index encodings
//!
//! A fact is one (subject, predicate, object) triple. This module also owns
//! the key layouts for the three covering indexes: each layout is a tuple
//! encoding, so index order is tuple order and a bound leading column turns
//! into a byte prefix.

use factdb_core::{EntityId, Tuple, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One (subject, predicate, object) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    /// Entity the fact is about.
    pub subject: EntityId,
    /// Attribute name.
    pub predicate: String,
    /// Attribute value.
    pub object: Value,
}

impl Fact {
    /// Build a fact.
    pub fn new(subject: EntityId, predicate: impl Into<String>, object: impl Into<Value>) -> Self {
        Fact {
            subject,
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Key `(subject, predicate)` for the SPO index.
    pub(crate) fn subject_predicate_key(&self) -> Vec<u8> {
        Tuple::new(vec![
            Value::UInt(self.subject.as_u64()),
            Value::String(self.predicate.clone()),
        ])
        .encode()
    }

    /// Key `(predicate, subject)` for the PSO index.
    pub(crate) fn predicate_subject_key(&self) -> Vec<u8> {
        Tuple::new(vec![
            Value::String(self.predicate.clone()),
            Value::UInt(self.subject.as_u64()),
        ])
        .encode()
    }

    /// Key `(predicate, object)` for the POS index.
    pub(crate) fn predicate_object_key(&self) -> Vec<u8> {
        Tuple::new(vec![
            Value::String(self.predicate.clone()),
            self.object.clone(),
        ])
        .encode()
    }

    /// Posting `(object,)` stored under SPO and PSO keys.
    pub(crate) fn object_posting(&self) -> Vec<u8> {
        Tuple::new(vec![self.object.clone()]).encode()
    }

    /// Posting `(subject,)` stored under POS keys.
    pub(crate) fn subject_posting(&self) -> Vec<u8> {
        Tuple::new(vec![Value::UInt(self.subject.as_u64())]).encode()
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}

/// How a caller names the subject when building a fact through the database.
#[derive(Debug, Clone)]
pub enum Subject {
    /// An entity id, given directly.
    Id(EntityId),
    /// The name of an ident to resolve.
    Ident(String),
}

impl From<EntityId> for Subject {
    fn from(id: EntityId) -> Self {
        Subject::Id(id)
    }
}

impl From<u64> for Subject {
    fn from(raw: u64) -> Self {
        Subject::Id(EntityId::new(raw))
    }
}

impl From<&str> for Subject {
    fn from(name: &str) -> Self {
        Subject::Ident(name.to_string())
    }
}

impl From<String> for Subject {
    fn from(name: String) -> Self {
        Subject::Ident(name)
    }
}
