//! Transaction update sets
//!
//! A transaction is an ordered list of entity updates. Each update maps
//! predicate names to values for one entity; the reserved `db:id` attribute
//! names the entity the update is about. Updates without it create
//! anonymous entities.

use crate::temp_id::TempId;
use factdb_core::{EntityId, Value};

/// Predicate under which an update declares the entity it is about.
pub const IDENTITY_PREDICATE: &str = "db:id";

/// Value stored at one predicate of an entity update.
#[derive(Debug, Clone)]
pub enum UpdateValue {
    /// One scalar; expands to one fact.
    Scalar(Value),
    /// Several scalars; expands to one fact per element, in order.
    Many(Vec<Value>),
    /// Reference to an entity created in the same transaction. Expands to a
    /// ref fact once the temp id is bound.
    TempRef(TempId),
}

impl From<Value> for UpdateValue {
    fn from(value: Value) -> Self {
        UpdateValue::Scalar(value)
    }
}

impl From<&str> for UpdateValue {
    fn from(s: &str) -> Self {
        UpdateValue::Scalar(Value::from(s))
    }
}

impl From<String> for UpdateValue {
    fn from(s: String) -> Self {
        UpdateValue::Scalar(Value::from(s))
    }
}

impl From<i64> for UpdateValue {
    fn from(x: i64) -> Self {
        UpdateValue::Scalar(Value::from(x))
    }
}

impl From<u64> for UpdateValue {
    fn from(x: u64) -> Self {
        UpdateValue::Scalar(Value::from(x))
    }
}

impl From<bool> for UpdateValue {
    fn from(b: bool) -> Self {
        UpdateValue::Scalar(Value::from(b))
    }
}

impl From<EntityId> for UpdateValue {
    fn from(id: EntityId) -> Self {
        UpdateValue::Scalar(Value::Ref(id))
    }
}

impl From<Vec<Value>> for UpdateValue {
    fn from(values: Vec<Value>) -> Self {
        UpdateValue::Many(values)
    }
}

impl From<TempId> for UpdateValue {
    fn from(temp: TempId) -> Self {
        UpdateValue::TempRef(temp)
    }
}

impl From<&TempId> for UpdateValue {
    fn from(temp: &TempId) -> Self {
        UpdateValue::TempRef(temp.clone())
    }
}

/// All attributes for one entity in a transaction.
///
/// Attributes keep insertion order; expansion emits facts in that order.
///
/// # Example
///
/// ```ignore
/// let update = EntityUpdate::new()
///     .identity(TempId::fresh())
///     .set("person:name", "Fred")
///     .set("person:age", 41i64);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntityUpdate {
    attrs: Vec<(String, UpdateValue)>,
}

impl EntityUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute.
    pub fn set(mut self, predicate: impl Into<String>, value: impl Into<UpdateValue>) -> Self {
        self.attrs.push((predicate.into(), value.into()));
        self
    }

    /// Declare the entity this update is about. Shorthand for setting the
    /// `db:id` attribute.
    pub fn identity(self, value: impl Into<UpdateValue>) -> Self {
        self.set(IDENTITY_PREDICATE, value)
    }

    /// The attributes, in insertion order.
    pub fn attrs(&self) -> &[(String, UpdateValue)] {
        &self.attrs
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// True if the update has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

/// The ordered update set of one transaction.
#[derive(Debug, Clone, Default)]
pub struct TxData {
    updates: Vec<EntityUpdate>,
}

impl TxData {
    /// Create an empty update set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entity update.
    pub fn update(mut self, update: EntityUpdate) -> Self {
        self.updates.push(update);
        self
    }

    /// The updates, in order.
    pub fn updates(&self) -> &[EntityUpdate] {
        &self.updates
    }

    /// Number of updates.
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// True if the set has no updates.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

impl From<Vec<EntityUpdate>> for TxData {
    fn from(updates: Vec<EntityUpdate>) -> Self {
        TxData { updates }
    }
}

/// What a committed transaction did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxResult {
    /// The entity each update resolved to, in update order.
    pub entities: Vec<EntityId>,
    /// Number of facts observed.
    pub facts_observed: usize,
}
