//! `CREATE TABLE` generation and foreign-key dependency ordering.

use std::sync::Arc;

use crate::error::SchemaError;
use crate::fieldspec::ModelDef;

impl ModelDef {
    /// Renders the model's `CREATE TABLE IF NOT EXISTS` statement.
    ///
    /// Field clauses precede key-constraint clauses, both in
    /// schema-declaration order; table and field names are backticked.
    pub fn create_table_sql(&self) -> Result<String, SchemaError> {
        if self.table.is_empty() {
            return Err(SchemaError::MissingTable);
        }
        let fieldspec = self.compile()?;

        let mut field_sql = Vec::new();
        let mut key_sql = Vec::new();
        for (name, spec) in fieldspec.iter() {
            field_sql.push(format!("`{name}` {}", spec.sql));
            if let Some(key) = &spec.key_sql {
                key_sql.push(key.clone());
            }
        }
        field_sql.extend(key_sql);

        Ok(format!(
            "CREATE TABLE IF NOT EXISTS `{}` ({}) ENGINE = {}",
            self.table,
            field_sql.join(", "),
            self.engine,
        ))
    }
}

/// Resolves the table-creation order for a model: depth-first over
/// `depends_on` edges, dependencies first, deduplicated by table name.
///
/// A dependency loop yields [`SchemaError::DependencyCycle`] naming the
/// path that closed it, rather than recursing unboundedly.
pub fn create_order(def: &Arc<ModelDef>) -> Result<Vec<Arc<ModelDef>>, SchemaError> {
    let mut order = Vec::new();
    let mut stack = Vec::new();
    visit(def, &mut order, &mut stack)?;
    Ok(order)
}

fn visit(
    def: &Arc<ModelDef>,
    order: &mut Vec<Arc<ModelDef>>,
    stack: &mut Vec<String>,
) -> Result<(), SchemaError> {
    if stack.iter().any(|table| *table == def.table) {
        let mut path = stack.clone();
        path.push(def.table.clone());
        return Err(SchemaError::DependencyCycle {
            path: path.join(" -> "),
        });
    }
    if order.iter().any(|done| done.table == def.table) {
        return Ok(());
    }

    stack.push(def.table.clone());
    let fieldspec = def.compile()?;
    for (_, spec) in fieldspec.iter() {
        if let Some(dep) = &spec.depends_on {
            visit(dep, order, stack)?;
        }
    }
    stack.pop();

    order.push(Arc::clone(def));
    Ok(())
}
