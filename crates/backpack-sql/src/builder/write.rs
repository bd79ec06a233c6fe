//! INSERT, UPDATE, and DELETE statement builders.
//!
//! These cover the write statements the persistence layer issues: insert
//! of the defined attributes, update keyed by id, and a single-row
//! bounded delete.

use tracing::debug;

use crate::connection::{Connection, ExecResult};
use crate::error::SqlError;
use crate::value::{ToValue, Value};

/// An INSERT statement builder.
///
/// ```
/// use backpack_sql::Insert;
///
/// let (sql, values) = Insert::into_table("user")
///     .value("email", "a@b.com")
///     .value("active", true)
///     .build();
///
/// assert_eq!(sql, "INSERT INTO `user` (email, active) VALUES (?, ?)");
/// assert_eq!(values.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Insert {
    table: String,
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Insert {
    /// Opens a builder targeting a table.
    #[must_use]
    pub fn into_table(table: &str) -> Self {
        Self {
            table: String::from(table),
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Adds a column value.
    #[must_use]
    pub fn value(mut self, column: &str, value: impl ToValue) -> Self {
        self.columns.push(String::from(column));
        self.values.push(value.to_value());
        self
    }

    /// Renders the statement and bound values.
    #[must_use]
    pub fn build(&self) -> (String, Vec<Value>) {
        let placeholders: Vec<&str> = self.columns.iter().map(|_| "?").collect();
        let sql = format!(
            "INSERT INTO `{}` ({}) VALUES ({})",
            self.table,
            self.columns.join(", "),
            placeholders.join(", "),
        );
        (sql, self.values.clone())
    }

    /// Executes the statement.
    pub async fn go<C: Connection>(&self, conn: &C) -> Result<ExecResult, SqlError> {
        let (sql, values) = self.build();
        debug!(sql = %sql, "executing insert");
        conn.execute(&sql, &values).await
    }
}

/// An UPDATE statement builder, keyed by a single column.
///
/// ```
/// use backpack_sql::Update;
///
/// let (sql, values) = Update::table("user")
///     .set("email", "a@b.com")
///     .key("id", 7)
///     .build();
///
/// assert_eq!(sql, "UPDATE `user` SET email = ? WHERE id = ?");
/// assert_eq!(values.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Update {
    table: String,
    sets: Vec<(String, Value)>,
    key: Option<(String, Value)>,
}

impl Update {
    /// Opens a builder targeting a table.
    #[must_use]
    pub fn table(table: &str) -> Self {
        Self {
            table: String::from(table),
            sets: Vec::new(),
            key: None,
        }
    }

    /// Adds a SET assignment.
    #[must_use]
    pub fn set(mut self, column: &str, value: impl ToValue) -> Self {
        self.sets.push((String::from(column), value.to_value()));
        self
    }

    /// Keys the update to the row where `column = value`.
    #[must_use]
    pub fn key(mut self, column: &str, value: impl ToValue) -> Self {
        self.key = Some((String::from(column), value.to_value()));
        self
    }

    /// Renders the statement; set values precede the key value.
    #[must_use]
    pub fn build(&self) -> (String, Vec<Value>) {
        let assignments: Vec<String> = self
            .sets
            .iter()
            .map(|(column, _)| format!("{column} = ?"))
            .collect();
        let mut sql = format!("UPDATE `{}` SET {}", self.table, assignments.join(", "));
        let mut values: Vec<Value> = self.sets.iter().map(|(_, v)| v.clone()).collect();
        if let Some((column, value)) = &self.key {
            sql.push_str(&format!(" WHERE {column} = ?"));
            values.push(value.clone());
        }
        (sql, values)
    }

    /// Executes the statement.
    pub async fn go<C: Connection>(&self, conn: &C) -> Result<ExecResult, SqlError> {
        let (sql, values) = self.build();
        debug!(sql = %sql, "executing update");
        conn.execute(&sql, &values).await
    }
}

/// A single-row DELETE statement builder.
///
/// The statement is bounded to exactly one row.
///
/// ```
/// use backpack_sql::Delete;
///
/// let (sql, values) = Delete::from("badge").key("id", 3).build();
/// assert_eq!(sql, "DELETE FROM `badge` WHERE `id` = ? LIMIT 1");
/// assert_eq!(values.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Delete {
    table: String,
    key: Option<(String, Value)>,
}

impl Delete {
    /// Opens a builder targeting a table.
    #[must_use]
    pub fn from(table: &str) -> Self {
        Self {
            table: String::from(table),
            key: None,
        }
    }

    /// Keys the delete to the row where `column = value`.
    #[must_use]
    pub fn key(mut self, column: &str, value: impl ToValue) -> Self {
        self.key = Some((String::from(column), value.to_value()));
        self
    }

    /// Renders the statement.
    #[must_use]
    pub fn build(&self) -> (String, Vec<Value>) {
        match &self.key {
            Some((column, value)) => (
                format!(
                    "DELETE FROM `{}` WHERE `{}` = ? LIMIT 1",
                    self.table, column
                ),
                vec![value.clone()],
            ),
            None => (format!("DELETE FROM `{}` LIMIT 1", self.table), Vec::new()),
        }
    }

    /// Executes the statement.
    pub async fn go<C: Connection>(&self, conn: &C) -> Result<ExecResult, SqlError> {
        let (sql, values) = self.build();
        debug!(sql = %sql, "executing delete");
        conn.execute(&sql, &values).await
    }
}
