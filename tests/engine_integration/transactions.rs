//! Transaction Tests
//!
//! Update sets expand into facts atomically: temp ids bind to fresh entity
//! ids, cross-references resolve within the set, and a bad update aborts
//! the whole transaction before anything reaches an index.

use super::*;
use factdb::{AttrValue, DatabaseError, Value, IDENTITY_PREDICATE};

// =============================================================================
// TEMP ID BINDING
// =============================================================================

#[test]
fn test_transact_binds_temp_ids_to_fresh_entities() {
    let db = Database::new();
    let andrew = TempId::fresh();
    let diana = TempId::fresh();

    let result = db.transact(couple_tx(&andrew, &diana)).expect("transact");

    assert_eq!(result.entities, vec![EntityId::new(1), EntityId::new(2)]);
    assert_eq!(andrew.entity_id(), Some(EntityId::new(1)));
    assert_eq!(diana.entity_id(), Some(EntityId::new(2)));
}

#[test]
fn test_cross_references_resolve_within_one_transaction() {
    let db = Database::new();
    let andrew = TempId::fresh();
    let diana = TempId::fresh();
    db.transact(couple_tx(&andrew, &diana)).expect("transact");

    let facts = db.get_facts(EntityId::new(1)).expect("get_facts");
    let spouse = facts
        .iter()
        .find(|f| f.predicate == "person:spouse")
        .expect("spouse fact");
    assert_eq!(spouse.object, Value::Ref(EntityId::new(2)));
}

#[test]
fn test_facts_observed_counts_expanded_facts() {
    let db = Database::new();
    let result = db
        .transact(couple_tx(&TempId::fresh(), &TempId::fresh()))
        .expect("transact");

    // Per person: identity, name, two likes, spouse.
    assert_eq!(result.facts_observed, 10);
}

#[test]
fn test_identity_attribute_becomes_self_reference() {
    let db = Database::new();
    let temp = TempId::fresh();
    db.transact(couple_tx(&temp, &TempId::fresh()))
        .expect("transact");

    let id = temp.entity_id().expect("bound");
    let facts = db.get_facts(id).expect("get_facts");
    let identity = facts
        .iter()
        .find(|f| f.predicate == IDENTITY_PREDICATE)
        .expect("identity fact");
    assert_eq!(identity.object, Value::Ref(id));
}

#[test]
fn test_bound_temp_id_reusable_in_later_transaction() {
    let db = Database::new();
    let owner = TempId::fresh();
    db.transact(
        TxData::new().update(EntityUpdate::new().identity(&owner).set("name", "owner")),
    )
    .expect("transact");

    // Already bound, so a later set may reference it without an identity.
    let pet = TempId::fresh();
    db.transact(
        TxData::new().update(
            EntityUpdate::new()
                .identity(&pet)
                .set("name", "rex")
                .set("owned-by", &owner),
        ),
    )
    .expect("transact");

    let facts = db.get_facts(pet.entity_id().expect("bound")).expect("get_facts");
    let owned_by = facts
        .iter()
        .find(|f| f.predicate == "owned-by")
        .expect("owned-by fact");
    assert_eq!(owned_by.object, Value::Ref(EntityId::new(1)));
}

// =============================================================================
// IDENTITY FORMS
// =============================================================================

#[test]
fn test_identity_by_existing_id() {
    let db = Database::new();
    let result = db
        .transact(TxData::new().update(EntityUpdate::new().identity(7u64).set("name", "widget")))
        .expect("transact");

    assert_eq!(result.entities, vec![EntityId::new(7)]);
    let entity = db.get_entity(EntityId::new(7)).expect("get_entity");
    assert_eq!(
        entity.get("name"),
        Some(&AttrValue::One(Value::from("widget")))
    );
}

#[test]
fn test_update_without_identity_creates_anonymous_entity() {
    let db = Database::new();
    let result = db
        .transact(TxData::new().update(EntityUpdate::new().set("name", "anonymous")))
        .expect("transact");

    assert_eq!(result.entities, vec![EntityId::new(1)]);
    // Anonymous entities carry no identity fact.
    let facts = db.get_facts(EntityId::new(1)).expect("get_facts");
    assert!(facts.iter().all(|f| f.predicate != IDENTITY_PREDICATE));
}

#[test]
fn test_identity_rejects_plain_string() {
    let db = Database::new();

    let err = db
        .transact(TxData::new().update(EntityUpdate::new().identity("fred").set("name", "Fred")))
        .unwrap_err();
    assert!(matches!(err, DatabaseError::InvalidIdentityField { .. }));
}

#[test]
fn test_identity_zero_is_reserved() {
    let db = Database::new();

    let err = db
        .transact(TxData::new().update(EntityUpdate::new().identity(0u64).set("name", "x")))
        .unwrap_err();
    assert!(matches!(err, DatabaseError::InvalidIdentityField { .. }));
}

#[test]
fn test_double_identity_rejected() {
    let db = Database::new();

    let err = db
        .transact(TxData::new().update(EntityUpdate::new().identity(3u64).identity(4u64)))
        .unwrap_err();
    assert!(matches!(err, DatabaseError::InvalidIdentityField { .. }));
}

// =============================================================================
// ATOMICITY
// =============================================================================

#[test]
fn test_unassigned_temp_ref_aborts_whole_transaction() {
    let db = Database::new();
    let ghost = TempId::fresh();

    let err = db
        .transact(
            TxData::new().update(
                EntityUpdate::new()
                    .identity(5u64)
                    .set("name", "orphan")
                    .set("owner", &ghost),
            ),
        )
        .unwrap_err();
    assert!(matches!(err, DatabaseError::UnassignedTempId));

    // Nothing reached an index.
    assert!(db.get_facts(EntityId::new(5)).expect("get_facts").is_empty());
}

#[test]
fn test_failed_transaction_allocates_no_ids() {
    let db = Database::new();
    let ghost = TempId::fresh();
    db.transact(
        TxData::new().update(EntityUpdate::new().set("owner", &ghost)),
    )
    .unwrap_err();

    // The next successful update still gets the first id.
    let result = db
        .transact(TxData::new().update(EntityUpdate::new().set("name", "first")))
        .expect("transact");
    assert_eq!(result.entities, vec![EntityId::new(1)]);
}

#[test]
fn test_many_values_expand_in_order() {
    let db = Database::new();
    let temp = TempId::fresh();
    db.transact(couple_tx(&temp, &TempId::fresh()))
        .expect("transact");

    let facts = db
        .get_facts(temp.entity_id().expect("bound"))
        .expect("get_facts");
    let likes: Vec<&Value> = facts
        .iter()
        .filter(|f| f.predicate == "person:likes")
        .map(|f| &f.object)
        .collect();
    assert_eq!(likes, vec![&Value::from("tacos"), &Value::from("nachos")]);
}

#[test]
fn test_empty_transaction_commits_nothing() {
    let db = Database::new();
    let result = db.transact(TxData::new()).expect("transact");

    assert!(result.entities.is_empty());
    assert_eq!(result.facts_observed, 0);
}
