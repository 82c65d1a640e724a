//! Query Error Tests
//!
//! Structural problems fail compilation before any index is read: shapes
//! the planner cannot serve, alias collisions, disconnected join graphs,
//! and patterns asking for variables no rule produces.

use super::*;
use factdb::{QueryError, Var};

fn execute_err(db: &Database, pattern: Pattern, rules: Vec<Rule>) -> QueryError {
    Query::new(pattern, rules).execute(db).unwrap_err()
}

#[test]
fn test_rules_without_shared_variable_are_rejected() {
    let db = character_db();
    let a = Var::named("a");
    let b = Var::named("b");

    let err = execute_err(
        &db,
        Pattern::new([&a, &b]),
        vec![
            Rule::new(&a, "name", "Fred"),
            Rule::new(&b, "name", "Wilma"),
        ],
    );
    assert!(matches!(err, QueryError::CartesianJoinNotPermitted));
}

#[test]
fn test_two_variables_with_one_alias_are_rejected() {
    let db = character_db();
    // Distinct variables that happen to share a name would silently join.
    let first = Var::named("who");
    let second = Var::named("who");

    let err = execute_err(
        &db,
        Pattern::new([&first]),
        vec![
            Rule::new(&first, "name", "Fred"),
            Rule::new(&second, "show", "I Love Lucy"),
        ],
    );
    match err {
        QueryError::DuplicateAlias { alias } => assert_eq!(alias, "who"),
        other => panic!("expected DuplicateAlias, got {other:?}"),
    }
}

#[test]
fn test_free_subject_and_predicate_is_unsupported() {
    let db = character_db();
    let s = Var::named("s");
    let p = Var::named("p");

    let err = execute_err(
        &db,
        Pattern::new([&s, &p]),
        vec![Rule::new(&s, &p, "Fred")],
    );
    assert!(matches!(err, QueryError::UnsupportedRuleShape { .. }));
}

#[test]
fn test_fully_free_rule_is_unsupported() {
    let db = character_db();
    let s = Var::named("s");
    let p = Var::named("p");
    let o = Var::named("o");

    let err = execute_err(&db, Pattern::new([&s, &p, &o]), vec![Rule::new(&s, &p, &o)]);
    assert!(matches!(err, QueryError::UnsupportedRuleShape { .. }));
}

#[test]
fn test_variable_reused_within_one_rule_is_unsupported() {
    let db = character_db();
    let v = Var::named("v");

    let err = execute_err(&db, Pattern::new([&v]), vec![Rule::new(&v, "name", &v)]);
    assert!(matches!(err, QueryError::UnsupportedRuleShape { .. }));
}

#[test]
fn test_non_entity_subject_is_unsupported() {
    let db = character_db();
    let name = Var::named("name");

    let err = execute_err(
        &db,
        Pattern::new([&name]),
        vec![Rule::new(true, "name", &name)],
    );
    assert!(matches!(err, QueryError::UnsupportedRuleShape { .. }));
}

#[test]
fn test_non_string_predicate_is_unsupported() {
    let db = character_db();
    let name = Var::named("name");

    let err = execute_err(
        &db,
        Pattern::new([&name]),
        vec![Rule::new(1u64, 7u64, &name)],
    );
    assert!(matches!(err, QueryError::UnsupportedRuleShape { .. }));
}

#[test]
fn test_fully_bound_rules_compile_to_nothing() {
    let db = character_db();

    let err = execute_err(
        &db,
        Pattern::empty(),
        vec![Rule::new(1u64, "name", "Fred")],
    );
    assert!(matches!(err, QueryError::EmptyPlan));
}

#[test]
fn test_pattern_variable_missing_from_rules() {
    let db = character_db();
    let who = Var::named("who");
    let stray = Var::named("stray");

    let err = execute_err(
        &db,
        Pattern::new([&stray]),
        vec![Rule::new(&who, "name", "Fred")],
    );
    match err {
        QueryError::UnknownVariable { alias } => assert_eq!(alias, "stray"),
        other => panic!("expected UnknownVariable, got {other:?}"),
    }
}

#[test]
fn test_unknown_ident_subject_fails_before_compilation() {
    let db = character_db();
    let name = Var::named("name");

    let err = execute_err(
        &db,
        Pattern::new([&name]),
        vec![Rule::new("ghost", "name", &name)],
    );
    assert!(matches!(
        err,
        QueryError::Engine(factdb::DatabaseError::UnknownIdent { .. })
    ));
}

#[test]
fn test_error_from_failed_query_reports_context() {
    let db = character_db();
    let a = Var::named("a");
    let b = Var::named("b");

    let err = execute_err(
        &db,
        Pattern::new([&a, &b]),
        vec![Rule::new(&a, "name", "Fred"), Rule::new(&b, "show", "X")],
    );
    assert!(err.to_string().contains("Cartesian join"));
}
