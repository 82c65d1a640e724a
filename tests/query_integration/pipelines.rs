//! Pipeline Tests
//!
//! Query results are plain rows; callers wanting documents or further
//! filtering feed them back through the dataflow operators. These tests
//! exercise that composition end to end.

use super::*;
use factdb::{
    ElementDescriptor, ElementType, Filter, Generate, IntoDocument, Limit, RowSchema, Var,
};

/// Schema for rows produced by a pattern, one untyped column per variable.
fn pattern_schema(aliases: &[&str]) -> RowSchema {
    aliases
        .iter()
        .map(|alias| ElementDescriptor::new(*alias, ElementType::Unknown))
        .collect()
}

#[test]
fn test_query_rows_fold_into_documents() {
    let db = character_db();
    let who = Var::named("id");
    let name = Var::named("name");
    let show = Var::named("show");

    let rows = run(
        &db,
        Pattern::new([&who, &name, &show]),
        vec![
            Rule::new(&who, "gender", "female"),
            Rule::new(&who, "name", &name),
            Rule::new(&who, "show", &show),
        ],
    );

    let source = Generate::new(pattern_schema(&["id", "name", "show"]), rows);
    let documents = IntoDocument::new(Box::new(source))
        .collect()
        .expect("collect documents");

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0]["name"], Value::from("Wilma"));
    assert_eq!(documents[0]["show"], Value::from("The Flinstones"));
    assert_eq!(documents[1]["name"], Value::from("Ethel"));
    assert_eq!(documents[1]["id"], Value::UInt(4));
}

#[test]
fn test_query_rows_post_filtered_and_limited() {
    let db = character_db();
    let who = Var::named("id");
    let name = Var::named("name");

    let rows = run(
        &db,
        Pattern::new([&who, &name]),
        vec![Rule::new(&who, "name", &name)],
    );
    assert_eq!(rows.len(), 4);

    // Keep characters with an even entity id, then cap at one row.
    let source = Generate::new(pattern_schema(&["id", "name"]), rows);
    let evens = Filter::new(
        Box::new(source),
        Box::new(|row, schema| {
            let index = schema.index_of("id").expect("id column");
            Ok(matches!(row.get(index)?, Value::UInt(id) if id % 2 == 0))
        }),
    );
    let mut capped = Limit::new(Box::new(evens), 1);

    let rows = factdb::collect(&mut capped).expect("collect");
    assert_eq!(rows, vec![row(vec![2u64.into(), "Wilma".into()])]);
}

#[test]
fn test_documents_serialize_for_transport() {
    let db = character_db();
    let name = Var::named("name");

    let rows = run(
        &db,
        Pattern::new([&name]),
        vec![Rule::new(2u64, "name", &name)],
    );

    let source = Generate::new(pattern_schema(&["name"]), rows);
    let documents = IntoDocument::new(Box::new(source))
        .collect()
        .expect("collect documents");

    let json = serde_json::to_string(&documents).expect("serialize");
    assert!(json.contains("Wilma"));
}
