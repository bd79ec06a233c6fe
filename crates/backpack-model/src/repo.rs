//! Class-level model operations: finders and table creation.

use std::sync::Arc;

use backpack_schema::{create_order, ModelDef};
use backpack_sql::{Connection, Select, ToValue, Value};
use tracing::info;

use crate::error::ModelError;
use crate::record::Record;

/// The class-level operations of a model: a lightweight handle over a
/// [`ModelDef`], with the connection injected into every call.
#[derive(Debug, Clone)]
pub struct Repo {
    def: Arc<ModelDef>,
}

impl Repo {
    /// A repo over the given model.
    #[must_use]
    pub fn new(def: Arc<ModelDef>) -> Self {
        Self { def }
    }

    /// The model definition this repo operates on.
    #[must_use]
    pub fn def(&self) -> &Arc<ModelDef> {
        &self.def
    }

    /// Finds every row matching the criteria and maps each into a
    /// [`Record`].
    ///
    /// Criteria combine with implicit AND: one `field = ?` comparison
    /// per entry appended to `WHERE 1=1`. There is no OR at this layer;
    /// callers needing one build their own [`Select`].
    pub async fn find<C: Connection>(
        &self,
        conn: &C,
        criteria: &[(&str, Value)],
    ) -> Result<Vec<Record>, ModelError> {
        let mut query = Select::new("*")
            .from(self.def.table.as_str())
            .where_clause("1=1", ());
        for (field, value) in criteria {
            query = query.and(&format!("{field} = ?"), value.clone());
        }
        let rows = query.go(conn).await?;
        rows.into_iter()
            .map(|row| Record::from_row(&self.def, row))
            .collect()
    }

    /// Finds one matching record.
    ///
    /// Returns the *last* element of [`Repo::find`]'s result list, not
    /// the first. Under an unordered SELECT the distinction rarely
    /// matters, but callers that need "first" should limit the query
    /// themselves.
    pub async fn find_one<C: Connection>(
        &self,
        conn: &C,
        criteria: &[(&str, Value)],
    ) -> Result<Option<Record>, ModelError> {
        let mut records = self.find(conn, criteria).await?;
        Ok(records.pop())
    }

    /// Finds the record with the given id.
    pub async fn find_by_id<C: Connection>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<Record>, ModelError> {
        self.find_one(conn, &[("id", Value::Int(id))]).await
    }

    /// Finds every record of the model.
    pub async fn find_all<C: Connection>(&self, conn: &C) -> Result<Vec<Record>, ModelError> {
        self.find(conn, &[]).await
    }

    /// Finds one record by a field value, creating and saving a fresh one
    /// when nothing matches.
    pub async fn find_or_create<C: Connection>(
        &self,
        conn: &C,
        field: &str,
        value: impl ToValue,
    ) -> Result<Record, ModelError> {
        let value = value.to_value();
        if let Some(found) = self.find_one(conn, &[(field, value.clone())]).await? {
            return Ok(found);
        }
        let mut record = Record::new(Arc::clone(&self.def));
        record.set(field, value);
        record.save(conn).await?;
        Ok(record)
    }

    /// Creates the model's table, after recursively ensuring every table
    /// it depends on exists. Dependency loops error out instead of
    /// recursing; racing creations stay idempotent through
    /// `IF NOT EXISTS`.
    pub async fn make_table<C: Connection>(&self, conn: &C) -> Result<(), ModelError> {
        for def in create_order(&self.def)? {
            let sql = def.create_table_sql()?;
            info!(table = %def.table, "creating table");
            conn.execute(&sql, &[]).await?;
        }
        Ok(())
    }
}
