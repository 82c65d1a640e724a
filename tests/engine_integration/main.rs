//! Engine Integration Tests
//!
//! End-to-end coverage of the fact database through the `factdb` facade:
//! observing facts, resolving idents, committing transactions, and folding
//! facts into entity documents.
//!
//! ## Modules
//!
//! - `facts`: the single-fact write path and the subject read path
//! - `idents`: named entities and the ident table
//! - `transactions`: atomic update sets with temp ids
//! - `documents`: entity folding and serialization
//! - `concurrency`: readers and writers sharing one database
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all engine integration tests
//! cargo test --test engine_integration
//!
//! # Run one module
//! cargo test --test engine_integration transactions::
//!
//! # Run with output
//! cargo test --test engine_integration -- --nocapture
//! ```

use factdb::{Database, EntityId, EntityUpdate, TempId, TxData};

/// A database populated the way an application would bootstrap one: schema
/// idents first, then attribute metadata, then facts about two people who
/// reference each other.
///
/// Entity 100 is Andrew (likes tacos and nachos, spouse 200); entity 200
/// is Diana (likes popcorn and nachos, spouse 100).
pub fn couple_db() -> Database {
    let db = Database::new();

    for name in [
        "db:schema/type",
        "db:type/string",
        "db:type/ref",
        "db:schema/cardinality",
        "db:cardinality/one",
        "db:cardinality/many",
        "person:name",
        "person:likes",
        "person:spouse",
    ] {
        db.create_ident(name).expect("create ident");
    }

    let string_type = db.resolve_ident("db:type/string").expect("ident");
    let ref_type = db.resolve_ident("db:type/ref").expect("ident");
    let one = db.resolve_ident("db:cardinality/one").expect("ident");
    let many = db.resolve_ident("db:cardinality/many").expect("ident");

    db.observe("person:name", "db:schema/type", string_type)
        .expect("observe");
    db.observe("person:name", "db:schema/cardinality", one)
        .expect("observe");
    db.observe("person:likes", "db:schema/type", string_type)
        .expect("observe");
    db.observe("person:likes", "db:schema/cardinality", many)
        .expect("observe");
    db.observe("person:spouse", "db:schema/type", ref_type)
        .expect("observe");
    db.observe("person:spouse", "db:schema/cardinality", one)
        .expect("observe");

    db.observe(100u64, "person:name", "Andrew").expect("observe");
    db.observe(100u64, "person:likes", "tacos").expect("observe");
    db.observe(100u64, "person:likes", "nachos").expect("observe");
    db.observe(100u64, "person:spouse", EntityId::new(200))
        .expect("observe");

    db.observe(200u64, "person:name", "Diana").expect("observe");
    db.observe(200u64, "person:likes", "popcorn").expect("observe");
    db.observe(200u64, "person:likes", "nachos").expect("observe");
    db.observe(200u64, "person:spouse", EntityId::new(100))
        .expect("observe");

    db
}

/// Transaction creating Andrew and Diana as fresh entities that reference
/// each other through temp ids.
pub fn couple_tx(andrew: &TempId, diana: &TempId) -> TxData {
    use factdb::Value;

    TxData::new()
        .update(
            EntityUpdate::new()
                .identity(andrew)
                .set("person:name", "Andrew")
                .set(
                    "person:likes",
                    vec![Value::from("tacos"), Value::from("nachos")],
                )
                .set("person:spouse", diana),
        )
        .update(
            EntityUpdate::new()
                .identity(diana)
                .set("person:name", "Diana")
                .set(
                    "person:likes",
                    vec![Value::from("nachos"), Value::from("popcorn")],
                )
                .set("person:spouse", andrew),
        )
}

pub mod facts;
pub mod transactions;
