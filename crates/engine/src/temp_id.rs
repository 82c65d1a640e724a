//! Temporary ids for entities created inside a transaction

use factdb_core::EntityId;
use once_cell::sync::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Placeholder for an entity id that does not exist yet.
///
/// Create one with [`TempId::fresh`], use it anywhere in one transaction's
/// update set, and give it an identity under the `db:id` attribute. During
/// commit the database allocates a real [`EntityId`] and binds it to the
/// placeholder; from then on the temp id permanently resolves to that
/// entity, including when it appears in later transactions.
///
/// Clones are handles to the same placeholder, not new placeholders.
#[derive(Debug, Clone)]
pub struct TempId {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    nonce: u64,
    bound: OnceCell<EntityId>,
}

impl TempId {
    /// Create a fresh, unbound temp id.
    pub fn fresh() -> Self {
        TempId {
            inner: Arc::new(Inner {
                nonce: rand::random(),
                bound: OnceCell::new(),
            }),
        }
    }

    /// The entity id a committed transaction bound this temp id to.
    pub fn entity_id(&self) -> Option<EntityId> {
        self.inner.bound.get().copied()
    }

    /// Identity discriminator. Two handles name the same placeholder iff
    /// their nonces are equal.
    pub(crate) fn nonce(&self) -> u64 {
        self.inner.nonce
    }

    /// Bind the allocated id. A later bind keeps the first value.
    pub(crate) fn bind(&self, id: EntityId) {
        let _ = self.inner.bound.set(id);
    }
}

impl PartialEq for TempId {
    fn eq(&self, other: &Self) -> bool {
        self.inner.nonce == other.inner.nonce
    }
}

impl Eq for TempId {}

impl Hash for TempId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.nonce.hash(state);
    }
}

impl fmt::Display for TempId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entity_id() {
            Some(id) => write!(f, "{}", id),
            None => write!(f, "~{:016x}", self.inner.nonce),
        }
    }
}
