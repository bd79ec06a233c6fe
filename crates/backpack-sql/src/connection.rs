//! Persistence connection abstraction.
//!
//! Statements execute against anything implementing [`Connection`]. The
//! handle is injected wherever persistence happens; there is no shared
//! process-wide client. The MySQL implementation lives in the
//! `backpack-mysql` crate; tests script their own in-memory handles.

use crate::error::SqlError;
use crate::value::{Row, Value};

/// Result of a write statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// Key generated by an INSERT; 0 when the statement produced none.
    pub last_insert_id: u64,
    /// Number of rows the statement touched.
    pub rows_affected: u64,
}

/// An async handle SQL statements execute against.
///
/// `params` aligns positionally with `?` placeholders in `sql`. Driver
/// failures surface as [`SqlError`]; nothing is retried at this layer.
#[allow(async_fn_in_trait)]
pub trait Connection: Send + Sync {
    /// Executes a write statement.
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<ExecResult, SqlError>;

    /// Executes a query and returns the decoded rows.
    async fn fetch(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SqlError>;
}
