//! Foreign-key field generator.

use std::sync::Arc;

use crate::error::SchemaError;
use crate::fieldspec::{FieldSpec, ModelDef};

/// Options for a `Foreign` field.
///
/// The field borrows the referenced column's base storage type, emits a
/// foreign-key constraint against the referenced table, and records the
/// referenced model as a dependency edge so table creation can order
/// itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignOpts {
    /// The referenced model.
    pub model: Arc<ModelDef>,
    /// The referenced field, usually `id`.
    pub field: String,
}

impl ForeignOpts {
    /// A reference to `model.field`.
    #[must_use]
    pub fn new(model: &Arc<ModelDef>, field: &str) -> Self {
        Self {
            model: Arc::clone(model),
            field: String::from(field),
        }
    }

    pub(crate) fn generate(&self, field: &str) -> Result<FieldSpec, SchemaError> {
        let fieldspec = self.model.compile()?;
        let target = fieldspec
            .get(&self.field)
            .ok_or_else(|| SchemaError::UnknownField {
                field: self.field.clone(),
                table: self.model.table.clone(),
            })?;
        let base_type = target.sql.split_whitespace().next().unwrap_or_default();
        let ftable = &self.model.table;
        Ok(FieldSpec {
            sql: String::from(base_type),
            key_sql: Some(format!(
                "FOREIGN KEY `{ftable}_fkey` (`{field}`) REFERENCES `{ftable}` (`{ffield}`)",
                ffield = self.field,
            )),
            depends_on: Some(Arc::clone(&self.model)),
            ..FieldSpec::default()
        })
    }
}
