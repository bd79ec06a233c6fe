//! Time field generator.

use backpack_sql::ToValue;

use crate::error::SchemaError;
use crate::fields::{finish, FieldOpts};
use crate::fieldspec::FieldSpec;

/// Storage kind for a `Time` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeKind {
    /// `TIMESTAMP` storage, the default.
    #[default]
    Timestamp,
    /// `DATETIME` storage.
    Datetime,
    /// `DATE` storage.
    Date,
}

impl TimeKind {
    const fn token(self) -> &'static str {
        match self {
            Self::Timestamp => "TIMESTAMP",
            Self::Datetime => "DATETIME",
            Self::Date => "DATE",
        }
    }
}

/// Options for a `Time` field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeOpts {
    /// Storage kind.
    pub kind: TimeKind,
    /// Common field options.
    pub opts: FieldOpts,
}

impl TimeOpts {
    /// Fresh options: `TIMESTAMP` storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the storage kind.
    #[must_use]
    pub const fn kind(mut self, kind: TimeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Marks the field NOT NULL.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.opts.required = true;
        self
    }

    /// Sets the column default; SQL expressions like `CURRENT_TIMESTAMP`
    /// pass through bare.
    #[must_use]
    pub fn default_value(mut self, value: impl ToValue) -> Self {
        self.opts.default = Some(value.to_value());
        self
    }

    pub(crate) fn generate(&self, field: &str) -> Result<FieldSpec, SchemaError> {
        let spec = FieldSpec {
            sql: String::from(self.kind.token()),
            ..FieldSpec::default()
        };
        finish(spec, &self.opts, field)
    }
}
