//! `Connection` implementation over `sqlx::MySqlPool`.

use backpack_sql::{Connection, ExecResult, Row, SqlError, Value};
use chrono::{DateTime, Utc};
use sqlx::mysql::{MySqlArguments, MySqlColumn, MySqlPool, MySqlRow};
use sqlx::{Column, MySql, Row as _, TypeInfo};
use tracing::debug;

impl Connection for MySqlPool {
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<ExecResult, SqlError> {
        debug!(sql = %sql, params = params.len(), "executing");
        let query = bind_params(sqlx::query(sql), params);
        let result = query.execute(self).await.map_err(SqlError::driver)?;
        Ok(ExecResult {
            last_insert_id: result.last_insert_id(),
            rows_affected: result.rows_affected(),
        })
    }

    async fn fetch(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SqlError> {
        debug!(sql = %sql, params = params.len(), "fetching");
        let query = bind_params(sqlx::query(sql), params);
        let rows = query.fetch_all(self).await.map_err(SqlError::driver)?;
        rows.iter().map(decode_row).collect()
    }
}

fn bind_params<'q>(
    mut query: sqlx::query::Query<'q, MySql, MySqlArguments>,
    params: &'q [Value],
) -> sqlx::query::Query<'q, MySql, MySqlArguments> {
    for value in params {
        query = match value {
            Value::Null => query.bind(Option::<i64>::None),
            Value::Bool(b) => query.bind(*b),
            Value::Int(n) => query.bind(*n),
            Value::Float(f) => query.bind(*f),
            Value::Text(s) => query.bind(s.as_str()),
            Value::Blob(b) => query.bind(b.as_slice()),
            Value::Time(t) => query.bind(*t),
            // Serialized documents travel as text.
            Value::Json(j) => query.bind(j.to_string()),
        };
    }
    query
}

fn decode_row(row: &MySqlRow) -> Result<Row, SqlError> {
    let mut attributes = Row::new();
    for column in row.columns() {
        attributes.insert(String::from(column.name()), decode_value(row, column)?);
    }
    Ok(attributes)
}

/// Decodes one column by its driver-reported type name; anything
/// unrecognized comes back as text.
fn decode_value(row: &MySqlRow, column: &MySqlColumn) -> Result<Value, SqlError> {
    let index = column.ordinal();
    let type_name = column.type_info().name();
    let decode_err = |_| SqlError::Decode {
        column: String::from(column.name()),
        type_name: String::from(type_name),
    };

    let value = match type_name {
        "BOOLEAN" => row
            .try_get::<Option<bool>, _>(index)
            .map_err(decode_err)?
            .map(Value::Bool),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => row
            .try_get::<Option<i64>, _>(index)
            .map_err(decode_err)?
            .map(Value::Int),
        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => row
            .try_get::<Option<u64>, _>(index)
            .map_err(decode_err)?
            .map(|n| Value::Int(n as i64)),
        "FLOAT" => row
            .try_get::<Option<f32>, _>(index)
            .map_err(decode_err)?
            .map(|f| Value::Float(f64::from(f))),
        "DOUBLE" => row
            .try_get::<Option<f64>, _>(index)
            .map_err(decode_err)?
            .map(Value::Float),
        "TIMESTAMP" | "DATETIME" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)
            .map_err(decode_err)?
            .map(Value::Time),
        "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BINARY" | "VARBINARY" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .map_err(decode_err)?
            .map(Value::Blob),
        _ => row
            .try_get::<Option<String>, _>(index)
            .map_err(decode_err)?
            .map(Value::Text),
    };
    Ok(value.unwrap_or(Value::Null))
}
