//! # backpack-schema
//!
//! The schema layer of the backpack data mapper:
//!
//! - [`Validator`]: composable field checks producing structured
//!   [`Invalid`] failure descriptors
//! - [`fields`]: declarative field generators (`Id`, `Number`, `Text`,
//!   `Enum`, `Foreign`, `Document`, `Boolean`, `Time`) that expand into
//!   [`FieldSpec`]s
//! - [`ModelDef`]: a plain model-definition record with table, engine,
//!   ordered schema, extra validators, and named getters/setters
//! - [`ModelDef::compile`]: the fieldspec compiler
//! - [`ModelDef::create_table_sql`] / [`create_order`]: `CREATE TABLE`
//!   generation with foreign-key dependency ordering
//!
//! ## Example
//!
//! ```
//! use backpack_schema::fields::TextOpts;
//! use backpack_schema::{FieldDef, ModelDef};
//!
//! let user = ModelDef::new("user")
//!     .field("id", FieldDef::Id)
//!     .field(
//!         "email",
//!         FieldDef::Text(TextOpts::chars(255).unique().required()),
//!     );
//!
//! let fieldspec = user.compile().unwrap();
//! assert_eq!(
//!     fieldspec.get("email").unwrap().sql,
//!     "VARCHAR(255) UNIQUE NOT NULL"
//! );
//! ```

mod codec;
mod ddl;
mod error;
pub mod fields;
mod fieldspec;
pub mod validators;

pub use codec::{Codec, CodecError};
pub use ddl::create_order;
pub use error::SchemaError;
pub use fieldspec::{FieldDef, FieldSpec, Fieldspec, Getter, ModelDef, Setter};
pub use validators::{DocError, Invalid, Validator};
