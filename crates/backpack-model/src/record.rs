//! Record instances: attribute storage, validation, mutation, and the
//! save/destroy state machine.

use std::sync::Arc;

use backpack_schema::ModelDef;
use backpack_sql::{Connection, Delete, Insert, Row, ToValue, Update, Value};
use tracing::debug;

use crate::error::{ModelError, ValidationErrors};

/// One row of a model: a mutable attribute map bound to a [`ModelDef`].
///
/// A record is *new* while it has no `id` attribute, *persisted* once a
/// save has written one back, and *destroyed* after a delete clears it
/// again. Persistence is always explicit: nothing writes to the store
/// until `save` or `destroy` is called with a connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    def: Arc<ModelDef>,
    attributes: Row,
}

impl Record {
    /// An empty record of the model.
    #[must_use]
    pub fn new(def: Arc<ModelDef>) -> Self {
        Self {
            def,
            attributes: Row::new(),
        }
    }

    /// A record constructed from initial attributes.
    #[must_use]
    pub fn with_attributes(def: Arc<ModelDef>, attributes: Row) -> Self {
        Self { def, attributes }
    }

    /// A record mapped from a result row, with each field's retrieval
    /// mutator applied.
    pub fn from_row(def: &Arc<ModelDef>, row: Row) -> Result<Self, ModelError> {
        let record = Self::new(Arc::clone(def));
        let attributes = record.demutate(row)?;
        Ok(Self {
            def: Arc::clone(def),
            attributes,
        })
    }

    /// The model definition this record belongs to.
    #[must_use]
    pub fn def(&self) -> &Arc<ModelDef> {
        &self.def
    }

    /// The raw attribute map.
    #[must_use]
    pub fn attributes(&self) -> &Row {
        &self.attributes
    }

    /// The record's id, once persisted.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.attributes.get("id").and_then(Value::as_int)
    }

    /// Reads an attribute. A declared getter receives the raw stored
    /// value and returns the derived one; storage is never mutated.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let raw = self.attributes.get(key);
        match self.def.getter_for(key) {
            Some(getter) => getter(raw),
            None => raw.cloned(),
        }
    }

    /// Writes an attribute. A declared setter receives the assigned value
    /// and writes into the attribute store itself; it may transform the
    /// value or write under a different key.
    pub fn set(&mut self, key: &str, value: impl ToValue) -> &mut Self {
        let value = value.to_value();
        match self.def.setter_for(key) {
            Some(setter) => setter(&mut self.attributes, value),
            None => {
                self.attributes.insert(String::from(key), value);
            }
        }
        self
    }

    /// Runs every field's validator chain against the current attributes,
    /// in schema-declaration order. The first failing validator per field
    /// is recorded; later validators for that field do not run.
    pub fn validate(&self) -> Result<(), ModelError> {
        let fieldspec = self.def.compile()?;
        let mut errors = ValidationErrors::default();
        for (name, spec) in fieldspec.iter() {
            let value = self.attributes.get(name);
            for validator in &spec.validators {
                if let Some(invalid) = validator.validate(value, &self.attributes) {
                    errors.insert(name, invalid);
                    break;
                }
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ModelError::Validation(errors))
        }
    }

    /// Produces the storage-ready attribute map: each field's storage
    /// mutator applied, everything else passed through unchanged.
    pub fn mutate(&self) -> Result<Row, ModelError> {
        let fieldspec = self.def.compile()?;
        let mut stored = self.attributes.clone();
        for (name, spec) in fieldspec.iter() {
            if let Some(codec) = &spec.mutators {
                if let Some(value) = stored.get(name) {
                    let encoded = codec.encode(value)?;
                    stored.insert(String::from(name), encoded);
                }
            }
        }
        Ok(stored)
    }

    /// Inverse of [`Record::mutate`]: maps a storage row back into
    /// application-ready attributes.
    pub fn demutate(&self, mut attributes: Row) -> Result<Row, ModelError> {
        let fieldspec = self.def.compile()?;
        for (name, spec) in fieldspec.iter() {
            if let Some(codec) = &spec.mutators {
                if let Some(value) = attributes.get(name) {
                    let decoded = codec.decode(value)?;
                    attributes.insert(String::from(name), decoded);
                }
            }
        }
        Ok(attributes)
    }

    /// Saves the record: validate, mutate, then upsert.
    ///
    /// A validation failure aborts with [`ModelError::Validation`] and
    /// performs no write. Otherwise a record with no `id` issues an
    /// INSERT of its defined attributes and the generated key is written
    /// back; a record with an `id` issues an UPDATE keyed by it.
    pub async fn save<C: Connection>(&mut self, conn: &C) -> Result<(), ModelError> {
        self.validate()?;
        let fieldspec = self.def.compile()?;
        let stored = self.mutate()?;
        let table = self.def.table.as_str();

        match self.id() {
            None => {
                let mut insert = Insert::into_table(table);
                for (name, _) in fieldspec.iter() {
                    if let Some(value) = stored.get(name) {
                        insert = insert.value(name, value.clone());
                    }
                }
                let result = insert.go(conn).await?;
                debug!(table, id = result.last_insert_id, "inserted record");
                self.attributes
                    .insert(String::from("id"), Value::Int(result.last_insert_id as i64));
            }
            Some(id) => {
                let mut update = Update::table(table);
                for (name, _) in fieldspec.iter() {
                    if let Some(value) = stored.get(name) {
                        update = update.set(name, value.clone());
                    }
                }
                update.key("id", id).go(conn).await?;
                debug!(table, id, "updated record");
            }
        }
        Ok(())
    }

    /// Deletes the record's row, bounded to exactly one, and clears the
    /// local `id` attribute. A record with no `id` succeeds as a no-op.
    pub async fn destroy<C: Connection>(&mut self, conn: &C) -> Result<(), ModelError> {
        let Some(id) = self.id() else {
            return Ok(());
        };
        Delete::from(self.def.table.as_str())
            .key("id", id)
            .go(conn)
            .await?;
        debug!(table = %self.def.table, id, "destroyed record");
        self.attributes.remove("id");
        Ok(())
    }
}
