//! Finders against a scripted connection.

mod support;

use std::sync::Arc;

use backpack_model::{Repo, Value};
use backpack_schema::fields::{DocumentOpts, TextOpts};
use backpack_schema::{FieldDef, ModelDef};
use serde_json::json;
use support::{row, MemoryConnection};

fn user_def() -> Arc<ModelDef> {
    Arc::new(
        ModelDef::new("user")
            .field("id", FieldDef::Id)
            .field(
                "email",
                FieldDef::Text(TextOpts::chars(255).unique().required()),
            ),
    )
}

#[tokio::test]
async fn find_builds_an_implicit_and_query_and_maps_rows() {
    let conn = MemoryConnection::new();
    conn.respond_with(vec![row(&[
        ("id", Value::Int(2)),
        ("email", Value::Text("a@b.com".into())),
    ])]);
    let repo = Repo::new(user_def());

    let records = repo
        .find(&conn, &[("email", Value::Text("a@b.com".into()))])
        .await
        .unwrap();

    let (sql, values) = &conn.statements()[0];
    assert_eq!(sql, "SELECT * FROM user WHERE 1=1 AND email = ?");
    assert_eq!(values, &vec![Value::Text("a@b.com".into())]);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("email"), Some(Value::Text("a@b.com".into())));
    assert_eq!(records[0].id(), Some(2));
}

#[tokio::test]
async fn find_combines_multiple_criteria_with_and() {
    let conn = MemoryConnection::new();
    let repo = Repo::new(user_def());

    repo.find(
        &conn,
        &[
            ("email", Value::Text("a@b.com".into())),
            ("id", Value::Int(2)),
        ],
    )
    .await
    .unwrap();

    let (sql, values) = &conn.statements()[0];
    assert_eq!(sql, "SELECT * FROM user WHERE 1=1 AND email = ? AND id = ?");
    assert_eq!(values.len(), 2);
}

#[tokio::test]
async fn find_one_returns_the_last_matching_row() {
    let conn = MemoryConnection::new();
    conn.respond_with(vec![
        row(&[("id", Value::Int(1))]),
        row(&[("id", Value::Int(2))]),
    ]);
    let repo = Repo::new(user_def());

    let record = repo.find_one(&conn, &[]).await.unwrap().unwrap();
    assert_eq!(record.id(), Some(2));
}

#[tokio::test]
async fn find_one_is_none_when_nothing_matches() {
    let conn = MemoryConnection::new();
    let repo = Repo::new(user_def());

    assert!(repo.find_one(&conn, &[]).await.unwrap().is_none());
}

#[tokio::test]
async fn find_by_id_delegates_to_find_one() {
    let conn = MemoryConnection::new();
    conn.respond_with(vec![row(&[("id", Value::Int(7))])]);
    let repo = Repo::new(user_def());

    let record = repo.find_by_id(&conn, 7).await.unwrap().unwrap();

    let (sql, values) = &conn.statements()[0];
    assert_eq!(sql, "SELECT * FROM user WHERE 1=1 AND id = ?");
    assert_eq!(values, &vec![Value::Int(7)]);
    assert_eq!(record.id(), Some(7));
}

#[tokio::test]
async fn find_all_takes_no_criteria() {
    let conn = MemoryConnection::new();
    conn.respond_with(vec![
        row(&[("id", Value::Int(1))]),
        row(&[("id", Value::Int(2))]),
        row(&[("id", Value::Int(3))]),
    ]);
    let repo = Repo::new(user_def());

    let records = repo.find_all(&conn).await.unwrap();

    assert_eq!(conn.statements()[0].0, "SELECT * FROM user WHERE 1=1");
    assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn found_rows_are_demutated() {
    let conn = MemoryConnection::new();
    conn.respond_with(vec![row(&[
        ("id", Value::Int(1)),
        ("body", Value::Blob(br#"{"recipient":"a@b.com"}"#.to_vec())),
    ])]);
    let def = Arc::new(
        ModelDef::new("badge")
            .field("id", FieldDef::Id)
            .field("body", FieldDef::Document(DocumentOpts::new())),
    );
    let repo = Repo::new(def);

    let records = repo.find_all(&conn).await.unwrap();
    assert_eq!(
        records[0].get("body"),
        Some(Value::Json(json!({"recipient": "a@b.com"})))
    );
}

#[tokio::test]
async fn find_or_create_returns_the_existing_record() {
    let conn = MemoryConnection::new();
    conn.respond_with(vec![row(&[
        ("id", Value::Int(4)),
        ("email", Value::Text("a@b.com".into())),
    ])]);
    let repo = Repo::new(user_def());

    let record = repo
        .find_or_create(&conn, "email", "a@b.com")
        .await
        .unwrap();

    assert_eq!(record.id(), Some(4));
    assert_eq!(conn.statements().len(), 1);
}

#[tokio::test]
async fn find_or_create_saves_a_fresh_record_when_absent() {
    let conn = MemoryConnection::new();
    let repo = Repo::new(user_def());

    let record = repo
        .find_or_create(&conn, "email", "a@b.com")
        .await
        .unwrap();

    let statements = conn.statements();
    assert_eq!(statements.len(), 2);
    assert!(statements[1].0.starts_with("INSERT INTO `user`"));
    assert_eq!(record.id(), Some(1));
    assert_eq!(record.get("email"), Some(Value::Text("a@b.com".into())));
}
