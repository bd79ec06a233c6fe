//! Save and destroy against a scripted connection.

mod support;

use std::sync::Arc;

use backpack_model::{Record, Value};
use backpack_schema::fields::{DocumentOpts, TextOpts};
use backpack_schema::{FieldDef, ModelDef};
use serde_json::json;
use support::MemoryConnection;

fn user_def() -> Arc<ModelDef> {
    Arc::new(
        ModelDef::new("user")
            .field("id", FieldDef::Id)
            .field(
                "email",
                FieldDef::Text(TextOpts::chars(255).unique().required()),
            )
            .field("passwd", FieldDef::Text(TextOpts::chars(255))),
    )
}

#[tokio::test]
async fn first_save_inserts_and_writes_back_the_generated_id() {
    let conn = MemoryConnection::new();
    let mut record = Record::new(user_def());
    record.set("email", "brian@example.org");

    record.save(&conn).await.unwrap();

    let statements = conn.statements();
    assert_eq!(statements.len(), 1);
    let (sql, values) = &statements[0];
    assert_eq!(sql, "INSERT INTO `user` (email) VALUES (?)");
    assert_eq!(values, &vec![Value::Text("brian@example.org".into())]);
    assert_eq!(record.id(), Some(1));
}

#[tokio::test]
async fn second_save_updates_keyed_by_the_id() {
    let conn = MemoryConnection::new();
    let mut record = Record::new(user_def());
    record.set("email", "brian@example.org");

    record.save(&conn).await.unwrap();
    record.set("email", "bjb@example.org");
    record.save(&conn).await.unwrap();

    let statements = conn.statements();
    assert_eq!(statements.len(), 2);
    let (sql, values) = &statements[1];
    assert_eq!(sql, "UPDATE `user` SET id = ?, email = ? WHERE id = ?");
    assert_eq!(values.last(), Some(&Value::Int(1)));
}

#[tokio::test]
async fn undefined_attributes_are_skipped_null_ones_are_not() {
    let conn = MemoryConnection::new();
    let mut record = Record::new(user_def());
    record.set("email", "brian@example.org");
    record.set("passwd", Value::Null);

    record.save(&conn).await.unwrap();

    let (sql, values) = &conn.statements()[0];
    assert_eq!(sql, "INSERT INTO `user` (email, passwd) VALUES (?, ?)");
    assert_eq!(values[1], Value::Null);
}

#[tokio::test]
async fn failed_validation_aborts_the_save_with_no_write() {
    let conn = MemoryConnection::new();
    let mut record = Record::new(user_def());

    let err = record.save(&conn).await.unwrap_err();
    let errors = err.validation().expect("validation failure");
    assert_eq!(errors.get("email").map(|e| e.name()), Some("required"));
    assert!(conn.statements().is_empty());
    assert_eq!(record.id(), None);
}

#[tokio::test]
async fn documents_are_serialized_on_the_way_to_storage() {
    let conn = MemoryConnection::new();
    let def = Arc::new(
        ModelDef::new("badge")
            .field("id", FieldDef::Id)
            .field("body", FieldDef::Document(DocumentOpts::new().required())),
    );
    let mut record = Record::new(def);
    record.set("body", Value::Json(json!({"recipient": "a@b.com"})));

    record.save(&conn).await.unwrap();

    let (sql, values) = &conn.statements()[0];
    assert_eq!(sql, "INSERT INTO `badge` (body) VALUES (?)");
    assert_eq!(
        values[0],
        Value::Text(String::from(r#"{"recipient":"a@b.com"}"#))
    );
    // The record itself still holds the structured value.
    assert_eq!(
        record.get("body"),
        Some(Value::Json(json!({"recipient": "a@b.com"})))
    );
}

#[tokio::test]
async fn destroy_deletes_one_row_and_clears_the_id() {
    let conn = MemoryConnection::new();
    let mut record = Record::new(user_def());
    record.set("email", "brian@example.org");
    record.save(&conn).await.unwrap();
    assert_eq!(record.id(), Some(1));

    record.destroy(&conn).await.unwrap();

    let statements = conn.statements();
    let (sql, values) = &statements[1];
    assert_eq!(sql, "DELETE FROM `user` WHERE `id` = ? LIMIT 1");
    assert_eq!(values, &vec![Value::Int(1)]);
    assert_eq!(record.id(), None);
}

#[tokio::test]
async fn destroy_without_an_id_is_a_no_op() {
    let conn = MemoryConnection::new();
    let mut record = Record::new(user_def());

    record.destroy(&conn).await.unwrap();

    assert!(conn.statements().is_empty());
}

#[tokio::test]
async fn destroyed_record_saves_as_a_fresh_insert() {
    let conn = MemoryConnection::new();
    let mut record = Record::new(user_def());
    record.set("email", "brian@example.org");
    record.save(&conn).await.unwrap();
    record.destroy(&conn).await.unwrap();

    record.save(&conn).await.unwrap();

    let statements = conn.statements();
    assert!(statements[2].0.starts_with("INSERT INTO `user`"));
    assert_eq!(record.id(), Some(2));
}
