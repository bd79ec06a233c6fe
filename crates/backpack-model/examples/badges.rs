//! Declares the backpack's models and prints their CREATE TABLE
//! statements in dependency order, then walks a badge through
//! validation.
//!
//! Run with: `cargo run --example badges`

use std::sync::Arc;

use backpack_model::{FieldDef, ModelDef, Record, Value};
use backpack_schema::create_order;
use backpack_schema::fields::{
    DocumentOpts, EnumOpts, FieldOpts, ForeignOpts, NumberOpts, TextKind, TextOpts, TextSize,
    TimeOpts,
};
use backpack_schema::Validator;
use serde_json::json;

fn user_model() -> Arc<ModelDef> {
    Arc::new(
        ModelDef::new("user")
            .field("id", FieldDef::Id)
            .field(
                "email",
                FieldDef::Text(TextOpts::chars(255).unique().required()),
            )
            .field("last_login", FieldDef::Number(NumberOpts::new()))
            .field("active", FieldDef::Boolean(FieldOpts::new().default_value(1)))
            .field("passwd", FieldDef::Text(TextOpts::chars(255)))
            .field(
                "salt",
                FieldDef::Text(TextOpts::new().size(TextSize::Tiny).kind(TextKind::Blob)),
            )
            .validator("email", Validator::Email),
    )
}

fn badge_model(user: &Arc<ModelDef>) -> Arc<ModelDef> {
    Arc::new(
        ModelDef::new("badge")
            .field("id", FieldDef::Id)
            .field("user_id", FieldDef::Foreign(ForeignOpts::new(user, "id")))
            .field(
                "type",
                FieldDef::Enum(EnumOpts::new(&["hosted", "signed"]).required()),
            )
            .field("endpoint", FieldDef::Text(TextOpts::new().size(TextSize::Tiny)))
            .field("public_key", FieldDef::Text(TextOpts::new()))
            .field("jwt", FieldDef::Text(TextOpts::new()))
            .field("image_path", FieldDef::Text(TextOpts::chars(255).required()))
            .field("rejected", FieldDef::Boolean(FieldOpts::new().default_value(0)))
            .field("body", FieldDef::Document(DocumentOpts::new().required()))
            .field(
                "body_hash",
                FieldDef::Text(TextOpts::chars(255).unique().required()),
            )
            .field(
                "validated_on",
                FieldDef::Time(TimeOpts::new().default_value("CURRENT_TIMESTAMP")),
            )
            .validator("endpoint", Validator::required_when("type", "hosted"))
            .validator("jwt", Validator::required_when("type", "signed"))
            .validator("public_key", Validator::required_when("type", "signed")),
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let user = user_model();
    let badge = badge_model(&user);

    for def in create_order(&badge)? {
        println!("{}", def.create_table_sql()?);
    }

    // A hosted badge with no endpoint fails the conditional requirement.
    let mut record = Record::new(Arc::clone(&badge));
    record.set("type", "hosted");
    record.set("image_path", "/images/kessel-run.png");
    record.set("body_hash", "sha256$0b3b2c");
    record.set("body", Value::Json(json!({"recipient": "han@example.org"})));

    if let Err(err) = record.validate() {
        println!("rejected: {err}");
    }

    record.set("endpoint", "https://issuer.example.org/badge/1");
    record.validate()?;
    println!("badge validates once the endpoint is present");
    Ok(())
}
