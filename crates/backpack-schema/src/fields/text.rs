//! Text field generator.

use backpack_sql::ToValue;

use crate::error::SchemaError;
use crate::fields::{finish, FieldOpts, Unique};
use crate::fieldspec::FieldSpec;
use crate::validators::Validator;

/// Size of a text field: an exact character count, or a named storage
/// width for the unsized text/blob variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    /// Exact size; renders a sized character type like `VARCHAR(n)` and
    /// binds a max-length validator.
    Chars(u32),
    /// `TINY` variant.
    Tiny,
    /// `SMALL` variant.
    Small,
    /// `MEDIUM` variant.
    Medium,
    /// `LONG` variant.
    Long,
}

impl TextSize {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Chars(_) => "",
            Self::Tiny => "TINY",
            Self::Small => "SMALL",
            Self::Medium => "MEDIUM",
            Self::Long => "LONG",
        }
    }
}

/// Storage kind for a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextKind {
    /// Unsized text storage, the default.
    #[default]
    Text,
    /// Variable-length character storage; requires a size.
    Varchar,
    /// Fixed-length character storage; requires a size.
    Char,
    /// Binary storage (for named sizes, e.g. `TINYBLOB`).
    Blob,
}

impl TextKind {
    const fn token(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Varchar => "VARCHAR",
            Self::Char => "CHAR",
            Self::Blob => "BLOB",
        }
    }

    /// Character kinds are meaningless without a size.
    const fn needs_size(self) -> bool {
        matches!(self, Self::Varchar | Self::Char)
    }
}

/// Options for a `Text` field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextOpts {
    /// Field size.
    pub size: Option<TextSize>,
    /// Storage kind; defaults to `VARCHAR` for exact sizes and `TEXT`
    /// otherwise.
    pub kind: Option<TextKind>,
    /// Common field options.
    pub opts: FieldOpts,
}

impl TextOpts {
    /// Fresh options: unsized `TEXT`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact-size text, rendered as a sized character type.
    #[must_use]
    pub fn chars(size: u32) -> Self {
        Self::new().size(TextSize::Chars(size))
    }

    /// Sets the size.
    #[must_use]
    pub const fn size(mut self, size: TextSize) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the storage kind.
    #[must_use]
    pub const fn kind(mut self, kind: TextKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Requests an inline UNIQUE constraint.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.opts.unique = Unique::Inline;
        self
    }

    /// Requests a `UNIQUE KEY` over the first `len` bytes, for unsized
    /// storage.
    #[must_use]
    pub const fn unique_key(mut self, len: u32) -> Self {
        self.opts.unique = Unique::Keyed(len);
        self
    }

    /// Marks the field NOT NULL.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.opts.required = true;
        self
    }

    /// Sets the column default.
    #[must_use]
    pub fn default_value(mut self, value: impl ToValue) -> Self {
        self.opts.default = Some(value.to_value());
        self
    }

    pub(crate) fn generate(&self, field: &str) -> Result<FieldSpec, SchemaError> {
        let mut validators = vec![Validator::TypeString];
        let sql = match self.size {
            Some(TextSize::Chars(size)) => {
                let kind = self.kind.unwrap_or(TextKind::Varchar);
                validators.push(Validator::max_length(size as usize));
                format!("{}({size})", kind.token())
            }
            Some(named) => {
                let kind = self.kind.unwrap_or(TextKind::Text);
                format!("{}{}", named.prefix(), kind.token())
            }
            None => {
                let kind = self.kind.unwrap_or(TextKind::Text);
                if kind.needs_size() {
                    return Err(SchemaError::InvalidField {
                        field: String::from(field),
                        reason: format!("type mismatch: {} must be set with a size", kind.token()),
                    });
                }
                String::from(kind.token())
            }
        };
        let spec = FieldSpec {
            sql,
            validators,
            ..FieldSpec::default()
        };
        finish(spec, &self.opts, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::Validator;

    #[test]
    fn standard_fare() {
        let spec = TextOpts::new().generate("t").unwrap();
        assert_eq!(spec.sql, "TEXT");
        assert_eq!(spec.validators, vec![Validator::TypeString]);
    }

    #[test]
    fn exact_size_renders_varchar_with_length_validator() {
        let spec = TextOpts::chars(28).generate("t").unwrap();
        assert_eq!(spec.sql, "VARCHAR(28)");
        assert_eq!(spec.validators.len(), 2);
        assert_eq!(spec.validators[1], Validator::max_length(28));
    }

    #[test]
    fn char_kind_with_size() {
        let spec = TextOpts::chars(28).kind(TextKind::Char).generate("t").unwrap();
        assert_eq!(spec.sql, "CHAR(28)");
    }

    #[test]
    fn char_kind_without_size_is_a_configuration_error() {
        let err = TextOpts::new().kind(TextKind::Char).generate("t").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidField { .. }));
        let err = TextOpts::new().kind(TextKind::Varchar).generate("t").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidField { .. }));
    }

    #[test]
    fn named_sizes_render_text_variants() {
        assert_eq!(
            TextOpts::new().size(TextSize::Long).generate("t").unwrap().sql,
            "LONGTEXT"
        );
        assert_eq!(
            TextOpts::new().size(TextSize::Tiny).generate("t").unwrap().sql,
            "TINYTEXT"
        );
        assert_eq!(
            TextOpts::new()
                .size(TextSize::Tiny)
                .kind(TextKind::Blob)
                .generate("t")
                .unwrap()
                .sql,
            "TINYBLOB"
        );
    }

    #[test]
    fn unique_inline_on_sized_keyed_on_unsized() {
        let spec = TextOpts::chars(21).unique().generate("t").unwrap();
        assert_eq!(spec.sql, "VARCHAR(21) UNIQUE");

        let err = TextOpts::new().unique().generate("t").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidField { .. }));

        let spec = TextOpts::new().unique_key(128).generate("t").unwrap();
        assert_eq!(spec.key_sql.as_deref(), Some("UNIQUE KEY (t(128))"));
    }

    #[test]
    fn required_appends_not_null() {
        let spec = TextOpts::new().required().generate("t").unwrap();
        assert_eq!(spec.sql, "TEXT NOT NULL");
        assert_eq!(spec.validators[0], Validator::Required);
    }
}
