//! Schema configuration errors.
//!
//! These are fatal at schema-compile or DDL-generation time; nothing here
//! is retried. Validation failures are not errors in this sense: they
//! are ordinary [`crate::Invalid`] values returned to the caller.

use thiserror::Error;

/// Errors raised while compiling a schema or generating DDL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The model declares no schema fields.
    #[error("model `{table}` has no schema")]
    MissingSchema {
        /// Offending model's table name.
        table: String,
    },

    /// DDL was requested for a model with no table name.
    #[error("table must be specified before generating a `create table` statement")]
    MissingTable,

    /// A field's configuration cannot produce a valid storage type.
    #[error("invalid configuration for field `{field}`: {reason}")]
    InvalidField {
        /// Offending field name.
        field: String,
        /// What went wrong.
        reason: String,
    },

    /// Validators or a foreign key reference a field the schema does not declare.
    #[error("unknown field `{field}` on model `{table}`")]
    UnknownField {
        /// Referenced field name.
        field: String,
        /// Model the field was expected on.
        table: String,
    },

    /// The same field name is declared twice.
    #[error("duplicate field `{field}` on model `{table}`")]
    DuplicateField {
        /// Duplicated field name.
        field: String,
        /// Offending model's table name.
        table: String,
    },

    /// Foreign-key dependencies form a loop.
    #[error("foreign key dependency cycle: {path}")]
    DependencyCycle {
        /// The table path that closed the loop, e.g. `a -> b -> a`.
        path: String,
    },
}
