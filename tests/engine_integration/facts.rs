//! Fact Observation Tests
//!
//! Covers `observe` and `get_facts`: predicate ordering, multi-valued
//! attributes, the supported scalar types, and size limits.

use super::*;
use factdb::{DatabaseError, Fact, Limits, Value};

// =============================================================================
// OBSERVE / READ-BACK TESTS
// =============================================================================

#[test]
fn test_observe_then_get_facts() {
    let db = Database::new();
    db.observe(1u64, "name", "apple").expect("observe");

    let facts = db.get_facts(EntityId::new(1)).expect("get_facts");
    assert_eq!(facts, vec![Fact::new(EntityId::new(1), "name", "apple")]);
}

#[test]
fn test_get_facts_orders_by_predicate() {
    let db = Database::new();
    db.observe(1u64, "name", "apple").expect("observe");
    db.observe(1u64, "color", "red").expect("observe");

    let facts = db.get_facts(EntityId::new(1)).expect("get_facts");
    let predicates: Vec<&str> = facts.iter().map(|f| f.predicate.as_str()).collect();
    assert_eq!(predicates, vec!["color", "name"]);
}

#[test]
fn test_multi_valued_attribute_keeps_observation_order() {
    let db = couple_db();

    let facts = db.get_facts(EntityId::new(100)).expect("get_facts");
    let likes: Vec<&Value> = facts
        .iter()
        .filter(|f| f.predicate == "person:likes")
        .map(|f| &f.object)
        .collect();
    assert_eq!(likes, vec![&Value::from("tacos"), &Value::from("nachos")]);
}

#[test]
fn test_facts_isolated_per_subject() {
    let db = couple_db();

    let facts = db.get_facts(EntityId::new(200)).expect("get_facts");
    assert!(facts.iter().all(|f| f.subject == EntityId::new(200)));
    // Diana has a name, two likes, and a spouse.
    assert_eq!(facts.len(), 4);
}

#[test]
fn test_every_scalar_type_round_trips() {
    let db = Database::new();
    db.observe(1u64, "string", "text").expect("observe");
    db.observe(1u64, "int", -5i64).expect("observe");
    db.observe(1u64, "uint", 7u64).expect("observe");
    db.observe(1u64, "bool", true).expect("observe");
    db.observe(1u64, "ref", EntityId::new(2)).expect("observe");

    let facts = db.get_facts(EntityId::new(1)).expect("get_facts");
    let objects: Vec<Value> = facts.into_iter().map(|f| f.object).collect();
    // Predicate order: bool, int, ref, string, uint.
    assert_eq!(
        objects,
        vec![
            Value::Bool(true),
            Value::Int(-5),
            Value::Ref(EntityId::new(2)),
            Value::from("text"),
            Value::UInt(7),
        ]
    );
}

#[test]
fn test_get_facts_unknown_subject_is_empty() {
    let db = Database::new();
    let facts = db.get_facts(EntityId::new(42)).expect("get_facts");
    assert!(facts.is_empty());
}

#[test]
fn test_duplicate_observation_is_kept() {
    // Facts are append-only: observing the same triple twice stores it twice.
    let db = Database::new();
    db.observe(1u64, "name", "apple").expect("observe");
    db.observe(1u64, "name", "apple").expect("observe");

    let facts = db.get_facts(EntityId::new(1)).expect("get_facts");
    assert_eq!(facts.len(), 2);
}

// =============================================================================
// LIMIT TESTS
// =============================================================================

#[test]
fn test_observe_rejects_oversized_predicate() {
    let db = Database::with_limits(Limits::with_small_limits());
    let long_name = "p".repeat(64);

    let err = db.observe(1u64, long_name, "x").unwrap_err();
    assert!(matches!(err, DatabaseError::Limit(_)));
}

#[test]
fn test_observe_rejects_oversized_string_value() {
    let db = Database::with_limits(Limits::with_small_limits());
    let long_value = "v".repeat(4096);

    let err = db.observe(1u64, "name", long_value).unwrap_err();
    assert!(matches!(err, DatabaseError::Limit(_)));
}

#[test]
fn test_rejected_observation_stores_nothing() {
    let db = Database::with_limits(Limits::with_small_limits());
    db.observe(1u64, "p".repeat(64), "x").unwrap_err();

    assert!(db.get_facts(EntityId::new(1)).expect("get_facts").is_empty());
}
