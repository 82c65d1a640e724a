//! Scalar values stored in facts
//!
//! This module defines the closed set of scalar types the database stores:
//! strings, signed and unsigned 64-bit integers, booleans, and entity
//! references. Every fact object and every tuple element is one of these.
//!
//! `Value` derives `Ord` with the variants declared in codec tag order, so
//! comparing two values agrees with comparing their encoded bytes even when
//! the variants differ. The tuple codec in [`crate::tuple`] relies on this.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier the database assigns to an entity.
///
/// Ids are allocated sequentially starting at 1; the raw value 0 is reserved
/// and never handed out.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct EntityId(u64);

impl EntityId {
    /// Wrap a raw id.
    pub const fn new(raw: u64) -> Self {
        EntityId(raw)
    }

    /// The raw numeric id.
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for EntityId {
    fn from(raw: u64) -> Self {
        EntityId(raw)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A scalar value.
///
/// Variant order matches the codec tag order (`string < int64 < uint64 <
/// bool < ref`), so the derived `Ord` ranks values exactly as their
/// encodings rank as byte strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Value {
    /// UTF-8 string.
    String(String),
    /// Signed 64-bit integer.
    Int(i64),
    /// Unsigned 64-bit integer.
    UInt(u64),
    /// Boolean.
    Bool(bool),
    /// Reference to another entity.
    Ref(EntityId),
}

impl Value {
    /// The type of this value.
    pub fn element_type(&self) -> ElementType {
        match self {
            Value::String(_) => ElementType::String,
            Value::Int(_) => ElementType::Int,
            Value::UInt(_) => ElementType::UInt,
            Value::Bool(_) => ElementType::Bool,
            Value::Ref(_) => ElementType::Ref,
        }
    }

    /// Human-readable type name, e.g. for error messages.
    pub fn type_name(&self) -> &'static str {
        self.element_type().name()
    }

    /// Borrow the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The signed integer payload, if this is an int64.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(x) => Some(*x),
            _ => None,
        }
    }

    /// The unsigned integer payload, if this is a uint64.
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::UInt(x) => Some(*x),
            _ => None,
        }
    }

    /// The boolean payload, if this is a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The referenced entity id, if this is a ref.
    pub fn as_entity_id(&self) -> Option<EntityId> {
        match self {
            Value::Ref(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Int(x) => write!(f, "{}", x),
            Value::UInt(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Ref(id) => write!(f, "{}", id),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Int(x)
    }
}

impl From<u64> for Value {
    fn from(x: u64) -> Self {
        Value::UInt(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<EntityId> for Value {
    fn from(id: EntityId) -> Self {
        Value::Ref(id)
    }
}

/// The type of a tuple element.
///
/// `Unknown` is a schema-only wildcard: row schemas use it for columns whose
/// type is not pinned down (an index posting can hold any scalar). It never
/// appears in encoded data and the codec will not produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    /// UTF-8 string.
    String,
    /// Signed 64-bit integer.
    Int,
    /// Unsigned 64-bit integer.
    UInt,
    /// Boolean.
    Bool,
    /// Entity reference.
    Ref,
    /// Schema wildcard; matches any scalar type.
    Unknown,
}

impl ElementType {
    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            ElementType::String => "string",
            ElementType::Int => "int64",
            ElementType::UInt => "uint64",
            ElementType::Bool => "bool",
            ElementType::Ref => "ref",
            ElementType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
