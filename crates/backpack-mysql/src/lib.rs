//! # backpack-mysql
//!
//! MySQL binding for the backpack data mapper.
//!
//! Implements [`backpack_sql::Connection`] over [`sqlx::MySqlPool`]:
//! parameter binding for every [`backpack_sql::Value`] variant, row
//! decoding keyed on the driver-reported column type, and
//! `last_insert_id` surfaced through
//! [`backpack_sql::ExecResult`] so saves can write generated keys back.
//!
//! [`DbConfig`] carries the connection settings (deserializable from any
//! serde format) and builds the DSN; [`use_test_database`] /
//! [`drop_test_database`] manage the `<database>_test` sibling the test
//! harness runs against.
//!
//! ```no_run
//! use backpack_mysql::DbConfig;
//!
//! # async fn example() -> Result<(), backpack_sql::SqlError> {
//! let config = DbConfig::new("badgeuser", "s3cret", "backpack");
//! let pool = config.connect().await?;
//! # let _ = pool;
//! # Ok(())
//! # }
//! ```

mod config;
mod pool;

pub use config::{drop_test_database, use_test_database, DbConfig};
