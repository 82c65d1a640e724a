//! The fact database
//!
//! ## Design
//!
//! Facts live in three covering indexes, one per access path:
//!
//! - SPO: key `(subject, predicate)`, posting `(object,)`
//! - PSO: key `(predicate, subject)`, posting `(object,)`
//! - POS: key `(predicate, object)`, posting `(subject,)`
//!
//! Every observed fact is inserted into all three, so any combination of
//! bound leading columns can be answered with one prefix scan. Facts are
//! append-only and never deduplicated.
//!
//! ## Thread Safety
//!
//! All state sits behind one `RwLock`: ident table, id counter, and the
//! three indexes. Writers (observe, transact, create_ident) take the write
//! lock for their whole critical section, which is what makes a transaction
//! atomic; readers take the read lock and can scan concurrently.

use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::fact::{Fact, Subject};
use crate::temp_id::TempId;
use crate::update::{EntityUpdate, TxData, TxResult, UpdateValue, IDENTITY_PREDICATE};
use factdb_core::{EntityId, Limits, Tuple, Value};
use factdb_storage::{scan_decoded, IndexEntry, PostingsIndex, Scan};
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Which covering index to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// Key `(subject, predicate)`, posting `(object,)`.
    Spo,
    /// Key `(predicate, subject)`, posting `(object,)`.
    Pso,
    /// Key `(predicate, object)`, posting `(subject,)`.
    Pos,
}

impl IndexKind {
    /// Short lowercase name, e.g. for logs.
    pub fn name(self) -> &'static str {
        match self {
            IndexKind::Spo => "spo",
            IndexKind::Pso => "pso",
            IndexKind::Pos => "pos",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Default)]
struct DatabaseState {
    idents: FxHashMap<String, EntityId>,
    next_id: u64,
    spo: PostingsIndex,
    pso: PostingsIndex,
    pos: PostingsIndex,
}

impl DatabaseState {
    fn allocate_id(&mut self) -> EntityId {
        self.next_id += 1;
        EntityId::new(self.next_id)
    }

    fn observe_fact(&mut self, fact: &Fact) {
        self.spo
            .insert(fact.subject_predicate_key(), fact.object_posting());
        self.pso
            .insert(fact.predicate_subject_key(), fact.object_posting());
        self.pos
            .insert(fact.predicate_object_key(), fact.subject_posting());
    }
}

/// In-memory triple store with SPO, PSO, and POS covering indexes.
///
/// # Example
///
/// ```ignore
/// let db = Database::new();
/// let andrew = db.create_ident("person:andrew")?;
/// db.observe(andrew, "person:name", "Andrew")?;
/// let facts = db.get_facts(andrew)?;
/// ```
pub struct Database {
    state: Arc<RwLock<DatabaseState>>,
    limits: Limits,
}

impl Database {
    /// Create an empty database with default limits.
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Create an empty database with custom limits.
    pub fn with_limits(limits: Limits) -> Self {
        Database {
            state: Arc::new(RwLock::new(DatabaseState::default())),
            limits,
        }
    }

    // ========== Idents ==========

    /// Resolve a name to an entity id, allocating one the first time.
    ///
    /// Idempotent: calling again with the same name returns the same id.
    pub fn create_ident(&self, name: &str) -> Result<EntityId> {
        self.limits.validate_name(name)?;
        let mut state = self.state.write();
        if let Some(&id) = state.idents.get(name) {
            return Ok(id);
        }
        let id = state.allocate_id();
        state.idents.insert(name.to_string(), id);
        debug!(target: "factdb::engine", name, id = %id, "Created ident");
        Ok(id)
    }

    /// Look up an ident created earlier.
    pub fn resolve_ident(&self, name: &str) -> Result<EntityId> {
        self.state
            .read()
            .idents
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownIdent {
                name: name.to_string(),
            })
    }

    // ========== Facts ==========

    /// Build a fact, resolving the subject if it is an ident name.
    pub fn fact(
        &self,
        subject: impl Into<Subject>,
        predicate: impl Into<String>,
        object: impl Into<Value>,
    ) -> Result<Fact> {
        let subject = match subject.into() {
            Subject::Id(id) => id,
            Subject::Ident(name) => self.resolve_ident(&name)?,
        };
        Ok(Fact::new(subject, predicate, object))
    }

    /// Record one fact: validate it and insert into all three indexes.
    ///
    /// The subject may be an entity id or an ident name. All three index
    /// writes happen under one lock acquisition.
    pub fn observe(
        &self,
        subject: impl Into<Subject>,
        predicate: impl Into<String>,
        object: impl Into<Value>,
    ) -> Result<()> {
        let fact = self.fact(subject, predicate, object)?;
        self.validate_fact(&fact)?;
        let mut state = self.state.write();
        state.observe_fact(&fact);
        trace!(target: "factdb::engine", fact = %fact, "Observed fact");
        Ok(())
    }

    fn validate_fact(&self, fact: &Fact) -> Result<()> {
        self.limits.validate_name(&fact.predicate)?;
        self.limits.validate_value(&fact.object)?;
        Ok(())
    }

    // ========== Transactions ==========

    /// Atomically apply an update set.
    ///
    /// Either every fact the set expands to is observed, or none is. The
    /// whole call runs under the write lock: temp ids are collected and
    /// checked, fresh entity ids are bound, attributes expand into facts,
    /// and only then does anything reach an index.
    pub fn transact(&self, tx: TxData) -> Result<TxResult> {
        let mut state = self.state.write();

        // Every temp id in the set, and the subset given an identity here.
        let mut temp_ids: Vec<TempId> = Vec::new();
        let mut seen: FxHashSet<u64> = FxHashSet::default();
        let mut with_identity: FxHashSet<u64> = FxHashSet::default();
        for update in tx.updates() {
            for (predicate, value) in update.attrs() {
                if let UpdateValue::TempRef(temp) = value {
                    if seen.insert(temp.nonce()) {
                        temp_ids.push(temp.clone());
                    }
                    if predicate == IDENTITY_PREDICATE {
                        with_identity.insert(temp.nonce());
                    }
                }
            }
        }

        // An unbound temp id must be given an identity by this same update
        // set; otherwise the transaction aborts before touching an index.
        for temp in &temp_ids {
            if temp.entity_id().is_none() && !with_identity.contains(&temp.nonce()) {
                return Err(Error::UnassignedTempId);
            }
        }

        for temp in &temp_ids {
            if temp.entity_id().is_none() {
                temp.bind(state.allocate_id());
            }
        }

        // Expand every update into facts. Nothing is observed until the
        // whole set expands cleanly.
        let mut entities = Vec::with_capacity(tx.updates().len());
        let mut facts: Vec<Fact> = Vec::new();
        for update in tx.updates() {
            let subject = resolve_identity(&mut state, update)?;
            entities.push(subject);
            for (predicate, value) in update.attrs() {
                if predicate == IDENTITY_PREDICATE {
                    // The identity attribute becomes a self-referencing fact.
                    facts.push(Fact::new(subject, IDENTITY_PREDICATE, Value::Ref(subject)));
                    continue;
                }
                self.limits.validate_name(predicate)?;
                match value {
                    UpdateValue::Scalar(value) => {
                        self.limits.validate_value(value)?;
                        facts.push(Fact::new(subject, predicate.as_str(), value.clone()));
                    }
                    UpdateValue::Many(values) => {
                        for value in values {
                            self.limits.validate_value(value)?;
                            facts.push(Fact::new(subject, predicate.as_str(), value.clone()));
                        }
                    }
                    UpdateValue::TempRef(temp) => {
                        let target = temp.entity_id().ok_or(Error::UnassignedTempId)?;
                        facts.push(Fact::new(subject, predicate.as_str(), Value::Ref(target)));
                    }
                }
            }
        }

        for fact in &facts {
            state.observe_fact(fact);
        }
        debug!(
            target: "factdb::engine",
            updates = tx.updates().len(),
            entities = entities.len(),
            facts = facts.len(),
            "Transaction committed"
        );
        Ok(TxResult {
            entities,
            facts_observed: facts.len(),
        })
    }

    // ========== Reads ==========

    /// All facts about a subject, in predicate order.
    pub fn get_facts(&self, subject: EntityId) -> Result<Vec<Fact>> {
        let state = self.state.read();
        let prefix = Tuple::new(vec![Value::UInt(subject.as_u64())]).encode();
        let entries = scan_decoded(&state.spo, &prefix)?;

        let mut facts = Vec::new();
        for entry in entries {
            let key = Tuple::decode(&entry.key)?;
            let predicate = key.get_string(1)?;
            for posting in &entry.postings {
                facts.push(Fact::new(subject, predicate, posting.get(0)?.clone()));
            }
        }
        Ok(facts)
    }

    /// All facts about a subject, folded into a document.
    ///
    /// Unknown subjects fold to an empty document.
    pub fn get_entity(&self, subject: EntityId) -> Result<Entity> {
        let mut entity = Entity::new(subject);
        for fact in self.get_facts(subject)? {
            entity.add(fact.predicate, fact.object);
        }
        Ok(entity)
    }

    /// A cheap read handle on one covering index.
    pub fn index(&self, kind: IndexKind) -> IndexHandle {
        IndexHandle {
            state: Arc::clone(&self.state),
            kind,
        }
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Database")
            .field("idents", &state.idents.len())
            .field("next_id", &state.next_id)
            .field("spo_keys", &state.spo.len())
            .finish()
    }
}

fn resolve_identity(state: &mut DatabaseState, update: &EntityUpdate) -> Result<EntityId> {
    let mut identity: Option<EntityId> = None;
    for (predicate, value) in update.attrs() {
        if predicate != IDENTITY_PREDICATE {
            continue;
        }
        if identity.is_some() {
            return Err(Error::InvalidIdentityField {
                reason: "an update may declare at most one identity".to_string(),
            });
        }
        let id = match value {
            UpdateValue::Scalar(Value::UInt(raw)) => EntityId::new(*raw),
            UpdateValue::Scalar(Value::Ref(id)) => *id,
            UpdateValue::TempRef(temp) => temp.entity_id().ok_or(Error::UnassignedTempId)?,
            UpdateValue::Scalar(other) => {
                return Err(Error::InvalidIdentityField {
                    reason: format!("expected an entity id or temp id, got {}", other.type_name()),
                })
            }
            UpdateValue::Many(_) => {
                return Err(Error::InvalidIdentityField {
                    reason: "expected an entity id or temp id, got a list".to_string(),
                })
            }
        };
        if id.as_u64() == 0 {
            return Err(Error::InvalidIdentityField {
                reason: "entity id 0 is reserved".to_string(),
            });
        }
        identity = Some(id);
    }
    Ok(match identity {
        Some(id) => id,
        None => state.allocate_id(),
    })
}

/// Cloneable read handle over one covering index.
///
/// Handles hold the database state alive and take the read lock per scan,
/// so an operator tree can keep scanning while writers proceed between
/// calls.
#[derive(Debug, Clone)]
pub struct IndexHandle {
    state: Arc<RwLock<DatabaseState>>,
    kind: IndexKind,
}

impl IndexHandle {
    /// Which index this handle reads.
    pub fn kind(&self) -> IndexKind {
        self.kind
    }
}

impl Scan for IndexHandle {
    fn scan_prefix(&self, prefix: &[u8]) -> Vec<IndexEntry> {
        let state = self.state.read();
        match self.kind {
            IndexKind::Spo => state.spo.scan_prefix(prefix),
            IndexKind::Pso => state.pso.scan_prefix(prefix),
            IndexKind::Pos => state.pos.scan_prefix(prefix),
        }
    }
}
