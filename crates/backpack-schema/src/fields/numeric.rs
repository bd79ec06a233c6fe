//! Numeric field generators: `Id` and `Number`.

use crate::error::SchemaError;
use crate::fields::{finish, FieldOpts};
use crate::fieldspec::FieldSpec;
use crate::validators::Validator;

/// Storage width keyword for numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberSize {
    /// 1-byte storage (`TINYINT`).
    Tiny,
    /// 2-byte storage (`SMALLINT`).
    Small,
    /// 3-byte storage (`MEDIUMINT`).
    Medium,
    /// 4-byte storage, the default.
    #[default]
    Standard,
    /// 8-byte storage (`BIGINT`).
    Big,
}

impl NumberSize {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Tiny => "TINY",
            Self::Small => "SMALL",
            Self::Medium => "MEDIUM",
            Self::Standard => "",
            Self::Big => "BIG",
        }
    }
}

/// Numeric storage kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberKind {
    /// Integer storage, the default.
    #[default]
    Int,
    /// Single-precision float storage.
    Float,
    /// Double-precision float storage.
    Double,
}

impl NumberKind {
    const fn token(self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
        }
    }
}

/// Options for a `Number` field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumberOpts {
    /// Storage width.
    pub size: NumberSize,
    /// Storage kind.
    pub kind: NumberKind,
    /// Forces ` UNSIGNED` storage (`signed(false)` does the same).
    pub unsigned: bool,
    /// Explicit signedness; `Some(true)` renders ` SIGNED`.
    pub signed: Option<bool>,
    /// Common field options.
    pub opts: FieldOpts,
}

impl NumberOpts {
    /// Fresh options: 4-byte signed integer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves one ambiguous size-or-type keyword: a known size token
    /// (`tiny`/`small`/`medium`/`big`) sets the size, else a known type
    /// token (`int`/`float`/`double`) sets the kind. Unknown tokens are
    /// ignored.
    #[must_use]
    pub fn token(mut self, token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "tiny" => self.size = NumberSize::Tiny,
            "small" => self.size = NumberSize::Small,
            "medium" => self.size = NumberSize::Medium,
            "big" => self.size = NumberSize::Big,
            "int" => self.kind = NumberKind::Int,
            "float" => self.kind = NumberKind::Float,
            "double" => self.kind = NumberKind::Double,
            _ => {}
        }
        self
    }

    /// Sets the storage width.
    #[must_use]
    pub const fn size(mut self, size: NumberSize) -> Self {
        self.size = size;
        self
    }

    /// Sets the storage kind.
    #[must_use]
    pub const fn kind(mut self, kind: NumberKind) -> Self {
        self.kind = kind;
        self
    }

    /// Forces unsigned storage.
    #[must_use]
    pub const fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    /// Sets explicit signedness; `signed(false)` renders ` UNSIGNED`.
    #[must_use]
    pub const fn signed(mut self, signed: bool) -> Self {
        self.signed = Some(signed);
        self
    }

    /// Requests an inline UNIQUE constraint.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.opts.unique = crate::fields::Unique::Inline;
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
    pub fn default_value(mut self, value: impl backpack_sql::ToValue) -> Self {
        self.opts.default = Some(value.to_value());
        self
    }

    pub(crate) fn generate(&self, field: &str) -> Result<FieldSpec, SchemaError> {
        let mut sql = format!("{}{}", self.size.prefix(), self.kind.token());
        if self.unsigned || self.signed == Some(false) {
            sql.push_str(" UNSIGNED");
        }
        if self.signed == Some(true) {
            sql.push_str(" SIGNED");
        }
        let spec = FieldSpec {
            sql,
            validators: vec![Validator::TypeNumber],
            ..FieldSpec::default()
        };
        finish(spec, &self.opts, field)
    }
}

/// The primary-key field: auto-incrementing 8-byte integer.
pub(crate) fn id_spec() -> FieldSpec {
    FieldSpec {
        sql: String::from("BIGINT AUTO_INCREMENT PRIMARY KEY"),
        validators: vec![Validator::TypeNumber],
        ..FieldSpec::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_an_auto_increment_primary_key() {
        let spec = id_spec();
        assert_eq!(spec.sql, "BIGINT AUTO_INCREMENT PRIMARY KEY");
        assert_eq!(spec.validators, vec![Validator::TypeNumber]);
    }

    #[test]
    fn standard_fare() {
        let spec = NumberOpts::new().generate("n").unwrap();
        assert_eq!(spec.sql, "INT");
        assert_eq!(spec.validators, vec![Validator::TypeNumber]);
    }

    #[test]
    fn size_tokens_resolve_to_sizes() {
        assert_eq!(NumberOpts::new().token("big").generate("n").unwrap().sql, "BIGINT");
        assert_eq!(
            NumberOpts::new().token("small").generate("n").unwrap().sql,
            "SMALLINT"
        );
    }

    #[test]
    fn type_tokens_resolve_to_kinds() {
        assert_eq!(
            NumberOpts::new().token("float").generate("n").unwrap().sql,
            "FLOAT"
        );
        assert_eq!(
            NumberOpts::new().token("dOuBlE").generate("n").unwrap().sql,
            "DOUBLE"
        );
    }

    #[test]
    fn signedness_flags_normalize() {
        assert_eq!(
            NumberOpts::new()
                .size(NumberSize::Small)
                .unsigned()
                .generate("n")
                .unwrap()
                .sql,
            "SMALLINT UNSIGNED"
        );
        assert_eq!(
            NumberOpts::new()
                .size(NumberSize::Small)
                .signed(false)
                .generate("n")
                .unwrap()
                .sql,
            "SMALLINT UNSIGNED"
        );
        assert_eq!(
            NumberOpts::new()
                .size(NumberSize::Small)
                .signed(true)
                .generate("n")
                .unwrap()
                .sql,
            "SMALLINT SIGNED"
        );
    }

    #[test]
    fn unique_appends_inline() {
        assert_eq!(
            NumberOpts::new()
                .size(NumberSize::Small)
                .signed(false)
                .unique()
                .generate("n")
                .unwrap()
                .sql,
            "SMALLINT UNSIGNED UNIQUE"
        );
    }

    #[test]
    fn required_appends_not_null_and_prepends_required() {
        let spec = NumberOpts::new()
            .size(NumberSize::Small)
            .required()
            .generate("n")
            .unwrap();
        assert_eq!(spec.sql, "SMALLINT NOT NULL");
        assert_eq!(
            spec.validators,
            vec![Validator::Required, Validator::TypeNumber]
        );
    }

    #[test]
    fn numeric_defaults_stay_bare() {
        assert_eq!(
            NumberOpts::new().default_value(10).generate("n").unwrap().sql,
            "INT DEFAULT 10"
        );
    }
}
