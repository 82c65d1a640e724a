//! Index Selection Tests
//!
//! One rule, every combination of bound and free slots. Each shape must
//! read the covering index whose key order turns the bound slots into a
//! prefix, and project the free slots in rule order.

use super::*;
use factdb::{EntityId, Var};

#[test]
fn test_bound_subject_and_predicate_reads_object() {
    let db = character_db();
    let name = Var::named("name");

    let rows = run(&db, Pattern::new([&name]), vec![Rule::new(1u64, "name", &name)]);
    assert_eq!(rows, vec![row(vec!["Fred".into()])]);
}

#[test]
fn test_bound_subject_lists_attributes_in_predicate_order() {
    let db = character_db();
    let attr = Var::named("attr");
    let value = Var::named("value");

    let rows = run(
        &db,
        Pattern::new([&attr, &value]),
        vec![Rule::new(3u64, &attr, &value)],
    );
    assert_eq!(
        rows,
        vec![
            row(vec!["gender".into(), "male".into()]),
            row(vec!["name".into(), "Fred".into()]),
            row(vec!["show".into(), "I Love Lucy".into()]),
        ]
    );
}

#[test]
fn test_bound_predicate_and_object_lists_subjects() {
    let db = character_db();
    let who = Var::named("who");

    let rows = run(&db, Pattern::new([&who]), vec![Rule::new(&who, "name", "Fred")]);
    assert_eq!(rows, vec![row(vec![1u64.into()]), row(vec![3u64.into()])]);
}

#[test]
fn test_bound_predicate_scans_subject_object_pairs() {
    let db = character_db();
    let who = Var::named("who");
    let name = Var::named("name");

    let rows = run(
        &db,
        Pattern::new([&who, &name]),
        vec![Rule::new(&who, "name", &name)],
    );
    assert_eq!(
        rows,
        vec![
            row(vec![1u64.into(), "Fred".into()]),
            row(vec![2u64.into(), "Wilma".into()]),
            row(vec![3u64.into(), "Fred".into()]),
            row(vec![4u64.into(), "Ethel".into()]),
        ]
    );
}

#[test]
fn test_bound_subject_and_object_filters_predicates() {
    let db = character_db();
    let attr = Var::named("attr");

    // Which attributes of entity 1 hold "Fred"? Only the name.
    let rows = run(&db, Pattern::new([&attr]), vec![Rule::new(1u64, &attr, "Fred")]);
    assert_eq!(rows, vec![row(vec!["name".into()])]);
}

#[test]
fn test_pattern_projects_variables_in_requested_order() {
    let db = character_db();
    let attr = Var::named("attr");
    let value = Var::named("value");

    let rows = run(
        &db,
        Pattern::new([&value, &attr]),
        vec![Rule::new(4u64, &attr, &value)],
    );
    assert_eq!(
        rows,
        vec![
            row(vec!["female".into(), "gender".into()]),
            row(vec!["Ethel".into(), "name".into()]),
            row(vec!["I Love Lucy".into(), "show".into()]),
        ]
    );
}

#[test]
fn test_pattern_discards_unrequested_variables() {
    let db = character_db();
    let value = Var::named("value");

    let rows = run(
        &db,
        Pattern::new([&value]),
        vec![Rule::new(3u64, Var::fresh(), &value)],
    );
    assert_eq!(
        rows,
        vec![
            row(vec!["male".into()]),
            row(vec!["Fred".into()]),
            row(vec!["I Love Lucy".into()]),
        ]
    );
}

#[test]
fn test_entity_id_subject_is_accepted() {
    let db = character_db();
    let name = Var::named("name");

    let rows = run(
        &db,
        Pattern::new([&name]),
        vec![Rule::new(EntityId::new(2), "name", &name)],
    );
    assert_eq!(rows, vec![row(vec!["Wilma".into()])]);
}

#[test]
fn test_ident_subject_resolves_before_planning() {
    let db = Database::new();
    db.create_ident("person:andrew").expect("create ident");
    db.observe("person:andrew", "person:likes", "tacos")
        .expect("observe");
    db.observe("person:andrew", "person:likes", "nachos")
        .expect("observe");

    let what = Var::named("what");
    let rows = run(
        &db,
        Pattern::new([&what]),
        vec![Rule::new("person:andrew", "person:likes", &what)],
    );
    assert_eq!(
        rows,
        vec![row(vec!["tacos".into()]), row(vec!["nachos".into()])]
    );
}

#[test]
fn test_no_matching_facts_yields_empty_result() {
    let db = character_db();
    let who = Var::named("who");

    let rows = run(&db, Pattern::new([&who]), vec![Rule::new(&who, "name", "Barney")]);
    assert!(rows.is_empty());
}

#[test]
fn test_fully_bound_rule_is_dropped_without_existence_check() {
    let db = character_db();
    let who = Var::named("who");

    // The first rule asserts a triple that is false, but a rule with no
    // variables produces no rows and is simply dropped from the plan.
    let rows = run(
        &db,
        Pattern::new([&who]),
        vec![
            Rule::new(1u64, "name", "Barney"),
            Rule::new(&who, "gender", "female"),
        ],
    );
    assert_eq!(rows, vec![row(vec![2u64.into()]), row(vec![4u64.into()])]);
}
