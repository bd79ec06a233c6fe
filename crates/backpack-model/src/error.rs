//! Error types for the persistence layer.

use std::fmt;

use backpack_schema::{CodecError, Invalid, SchemaError};
use backpack_sql::SqlError;
use thiserror::Error;

/// The per-field failure map a rejected save carries: field name to the
/// first failing validator's descriptor, in schema-declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationErrors {
    entries: Vec<(String, Invalid)>,
}

impl ValidationErrors {
    /// Records a field's failure.
    pub fn insert(&mut self, field: &str, error: Invalid) {
        self.entries.push((String::from(field), error));
    }

    /// Looks a field's failure up by name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Invalid> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == field)
            .map(|(_, error)| error)
    }

    /// Iterates failures in schema-declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Invalid)> {
        self.entries
            .iter()
            .map(|(field, error)| (field.as_str(), error))
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when every field passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in &self.entries {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{field}: {}", error.name())?;
            first = false;
        }
        Ok(())
    }
}

/// Errors surfaced by record and repo operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// One or more fields failed validation; nothing was written.
    #[error("validation failed ({0})")]
    Validation(ValidationErrors),

    /// The model's schema could not be compiled.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A storage mutator could not transform a value.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The underlying store reported a failure.
    #[error(transparent)]
    Sql(#[from] SqlError),
}

impl ModelError {
    /// The validation failure map, when this is a validation error.
    #[must_use]
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
