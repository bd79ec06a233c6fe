//! Shared test support: a scripted in-memory connection.

// Each integration test binary compiles this module separately and uses
// a different slice of it.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use backpack_sql::{Connection, ExecResult, Row, SqlError, Value};

/// A [`Connection`] that logs every statement and replays canned result
/// sets, with a monotonic insert-id counter. Each fetch pops the next
/// scripted response; an unscripted fetch returns no rows.
#[derive(Debug, Default)]
pub struct MemoryConnection {
    log: Mutex<Vec<(String, Vec<Value>)>>,
    responses: Mutex<VecDeque<Vec<Row>>>,
    next_insert_id: Mutex<u64>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self {
            next_insert_id: Mutex::new(1),
            ..Self::default()
        }
    }

    /// Queues rows for the next fetch.
    pub fn respond_with(&self, rows: Vec<Row>) {
        self.responses.lock().unwrap().push_back(rows);
    }

    /// Every statement executed so far, with its bound values.
    pub fn statements(&self) -> Vec<(String, Vec<Value>)> {
        self.log.lock().unwrap().clone()
    }
}

/// Builds a result row from (column, value) pairs.
pub fn row(pairs: &[(&str, Value)]) -> Row {
    pairs
        .iter()
        .map(|(column, value)| (String::from(*column), value.clone()))
        .collect()
}

impl Connection for MemoryConnection {
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<ExecResult, SqlError> {
        self.log
            .lock()
            .unwrap()
            .push((String::from(sql), params.to_vec()));
        let last_insert_id = if sql.starts_with("INSERT") {
            let mut next = self.next_insert_id.lock().unwrap();
            let id = *next;
            *next += 1;
            id
        } else {
            0
        };
        Ok(ExecResult {
            last_insert_id,
            rows_affected: 1,
        })
    }

    async fn fetch(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SqlError> {
        self.log
            .lock()
            .unwrap()
            .push((String::from(sql), params.to_vec()));
        Ok(self.responses.lock().unwrap().pop_front().unwrap_or_default())
    }
}
