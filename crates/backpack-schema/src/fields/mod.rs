//! Declarative schema field generators.
//!
//! Each generator turns an options record into a [`FieldSpec`]: a storage
//! type, the validators that guard it, and any key constraint or storage
//! mutator the field needs. Options records are complete configurations
//! with builder-style setters; defaults are applied internally.
//!
//! All generators share a finishing step ([`finish`]) applied in a fixed
//! order: uniqueness, then not-null (which also *prepends* the `Required`
//! validator), then the default-value clause with type-appropriate
//! quoting.

pub(crate) mod boolean;
mod document;
mod enumeration;
pub(crate) mod numeric;
mod relations;
mod temporal;
mod text;

pub use document::DocumentOpts;
pub use enumeration::EnumOpts;
pub use numeric::{NumberKind, NumberOpts, NumberSize};
pub use relations::ForeignOpts;
pub use temporal::{TimeKind, TimeOpts};
pub use text::{TextKind, TextOpts, TextSize};

use backpack_sql::{ToValue, Value};

use crate::error::SchemaError;
use crate::fieldspec::FieldSpec;
use crate::validators::Validator;

/// Uniqueness constraint on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unique {
    /// No uniqueness.
    #[default]
    No,
    /// Inline `UNIQUE` on the storage type. Not available on unsized
    /// text/blob types; those need [`Unique::Keyed`].
    Inline,
    /// A separate `UNIQUE KEY` constraint over the first N bytes, for
    /// unsized types.
    Keyed(u32),
}

/// Options shared by every field generator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldOpts {
    /// Uniqueness constraint.
    pub unique: Unique,
    /// Whether the field is NOT NULL (`required` and `null: false` in the
    /// schema DSL are the same thing).
    pub required: bool,
    /// Default value for the column.
    pub default: Option<Value>,
}

impl FieldOpts {
    /// Fresh options with every setting off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests an inline UNIQUE constraint.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = Unique::Inline;
        self
    }

    /// Requests a `UNIQUE KEY` constraint over the first `len` bytes.
    #[must_use]
    pub const fn unique_key(mut self, len: u32) -> Self {
        self.unique = Unique::Keyed(len);
        self
    }

    /// Marks the field NOT NULL and prepends the `Required` validator.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the column default.
    #[must_use]
    pub fn default_value(mut self, value: impl ToValue) -> Self {
        self.default = Some(value.to_value());
        self
    }
}

/// Storage classes that quote their default values in DDL.
fn stringy(sql: &str) -> bool {
    let lowered = sql.to_lowercase();
    ["blob", "text", "char", "enum"]
        .iter()
        .any(|class| lowered.contains(class))
}

/// True for unsized text/blob storage, which cannot take an inline UNIQUE.
fn unsized_storage(sql: &str) -> bool {
    let lowered = sql.to_lowercase();
    lowered.starts_with("text") || lowered.starts_with("blob")
}

fn render_default(value: &Value, quote: bool) -> String {
    let rendered = match value {
        Value::Null => String::from("NULL"),
        Value::Bool(b) => String::from(if *b { "1" } else { "0" }),
        Value::Int(n) => n.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Time(t) => t.to_rfc3339(),
        Value::Blob(_) | Value::Json(_) => String::new(),
    };
    if quote && matches!(value, Value::Text(_)) {
        format!("\"{rendered}\"")
    } else {
        rendered
    }
}

/// The shared finishing step: uniqueness, not-null + `Required`, default.
pub(crate) fn finish(
    mut spec: FieldSpec,
    opts: &FieldOpts,
    field: &str,
) -> Result<FieldSpec, SchemaError> {
    match opts.unique {
        Unique::No => {}
        Unique::Inline => {
            if unsized_storage(&spec.sql) {
                return Err(SchemaError::InvalidField {
                    field: String::from(field),
                    reason: String::from(
                        "a unique key on an unsized type (text or blob) must carry \
                         a key length, e.g. Unique::Keyed(128)",
                    ),
                });
            }
            spec.sql.push_str(" UNIQUE");
        }
        Unique::Keyed(len) => {
            spec.key_sql = Some(format!("UNIQUE KEY ({field}({len}))"));
        }
    }

    if opts.required {
        spec.sql.push_str(" NOT NULL");
        spec.validators.insert(0, Validator::Required);
    }

    if let Some(default) = &opts.default {
        let quote = stringy(&spec.sql);
        spec.sql.push_str(" DEFAULT ");
        spec.sql.push_str(&render_default(default, quote));
    }

    Ok(spec)
}
