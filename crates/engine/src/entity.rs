//! Entity documents folded from facts

use factdb_core::{EntityId, Value};
use serde::Serialize;
use std::collections::BTreeMap;

/// Values observed for one attribute of an entity.
///
/// One observation folds to `One`; further observations promote it to
/// `Many`, oldest first. Serializes untagged, so a document renders its
/// single-valued attributes as scalars and its multi-valued ones as arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Attribute observed once.
    One(Value),
    /// Attribute observed several times.
    Many(Vec<Value>),
}

impl AttrValue {
    /// The first observed value.
    pub fn first(&self) -> Option<&Value> {
        match self {
            AttrValue::One(value) => Some(value),
            AttrValue::Many(values) => values.first(),
        }
    }

    /// Number of observed values.
    pub fn len(&self) -> usize {
        match self {
            AttrValue::One(_) => 1,
            AttrValue::Many(values) => values.len(),
        }
    }

    /// Always false: attributes only exist once observed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An entity id with all its attributes, folded from its facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    /// The entity's id.
    pub id: EntityId,
    attrs: BTreeMap<String, AttrValue>,
}

impl Entity {
    pub(crate) fn new(id: EntityId) -> Self {
        Entity {
            id,
            attrs: BTreeMap::new(),
        }
    }

    pub(crate) fn add(&mut self, predicate: String, value: Value) {
        use std::collections::btree_map::Entry;
        match self.attrs.entry(predicate) {
            Entry::Vacant(slot) => {
                slot.insert(AttrValue::One(value));
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                AttrValue::One(existing) => {
                    let first = existing.clone();
                    *slot.get_mut() = AttrValue::Many(vec![first, value]);
                }
                AttrValue::Many(values) => values.push(value),
            },
        }
    }

    /// The values observed for one attribute.
    pub fn get(&self, predicate: &str) -> Option<&AttrValue> {
        self.attrs.get(predicate)
    }

    /// All attributes, sorted by predicate name.
    pub fn attrs(&self) -> &BTreeMap<String, AttrValue> {
        &self.attrs
    }

    /// Number of distinct attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// True if no facts mention this entity.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}
