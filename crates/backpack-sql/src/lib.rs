//! # backpack-sql
//!
//! SQL primitives for the backpack data mapper:
//!
//! - [`Value`]: the runtime value type shared by attribute storage and
//!   bound parameters
//! - [`Params`] and the [`params!`] macro: ordered bound-value lists
//! - [`Select`]: a fluent, owned accumulator for building and executing
//!   parameterized SELECT statements
//! - [`Insert`], [`Update`], [`Delete`]: the write statements the
//!   persistence layer issues
//! - [`Connection`]: the async handle statements execute against
//!
//! ## Example
//!
//! ```
//! use backpack_sql::{params, Select};
//!
//! let (sql, values) = Select::new([("a", "x"), ("b", "y")])
//!     .from("t")
//!     .where_clause("id = ?", 5)
//!     .build();
//!
//! assert_eq!(sql, "SELECT a AS x,b AS y FROM t WHERE id = ?");
//! assert_eq!(values, params![5].0);
//! ```
//!
//! Builders are owned values: every chain call takes `self` and returns
//! the updated builder, so two `Select::new` calls can never share an
//! accumulator.

pub mod builder;
mod connection;
mod error;
pub mod value;

pub use builder::{Delete, FieldList, Insert, JoinKind, LimitOpts, Select, Update};
pub use connection::{Connection, ExecResult};
pub use error::SqlError;
pub use value::{Params, Row, ToValue, Value};
