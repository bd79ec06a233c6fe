//! # backpack-model
//!
//! The active-record layer of the backpack data mapper.
//!
//! A model is a [`ModelDef`] configuration record (from
//! `backpack-schema`); a [`Record`] is one row of it: a mutable attribute
//! map with `get`/`set` (dispatching through declared getters/setters),
//! validation, storage mutation, and async `save`/`destroy`. [`Repo`]
//! carries the class-level operations: `find`, `find_one`, `find_by_id`,
//! `find_all`, `find_or_create`, and dependency-ordered `make_table`.
//!
//! The connection handle is injected into every persistence call; records
//! and repos hold no connection of their own.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use backpack_model::{Record, Repo};
//! use backpack_schema::fields::TextOpts;
//! use backpack_schema::{FieldDef, ModelDef};
//!
//! # async fn example(conn: impl backpack_sql::Connection) -> Result<(), backpack_model::ModelError> {
//! let user = Arc::new(
//!     ModelDef::new("user")
//!         .field("id", FieldDef::Id)
//!         .field("email", FieldDef::Text(TextOpts::chars(255).unique().required())),
//! );
//!
//! Repo::new(Arc::clone(&user)).make_table(&conn).await?;
//!
//! let mut record = Record::new(Arc::clone(&user));
//! record.set("email", "brian@example.org");
//! record.save(&conn).await?;
//! assert!(record.id().is_some());
//! # Ok(())
//! # }
//! ```

mod error;
mod record;
mod repo;

pub use error::{ModelError, ValidationErrors};
pub use record::Record;
pub use repo::Repo;

// The types model code touches constantly, re-exported for convenience.
pub use backpack_schema::{FieldDef, ModelDef};
pub use backpack_sql::{Connection, Row, Value};
