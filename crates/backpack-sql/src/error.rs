//! Error types for statement execution.

use thiserror::Error;

/// Errors surfaced while executing SQL.
#[derive(Debug, Error)]
pub enum SqlError {
    /// Error from the underlying driver, propagated verbatim.
    #[error("driver error: {0}")]
    Driver(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A row value could not be decoded into a [`crate::Value`].
    #[error("cannot decode column `{column}` of type {type_name}")]
    Decode {
        /// Column name as reported by the driver.
        column: String,
        /// Driver-reported type name.
        type_name: String,
    },
}

impl SqlError {
    /// Wraps a driver error.
    pub fn driver(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Driver(Box::new(err))
    }
}
