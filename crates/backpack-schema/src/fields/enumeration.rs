//! Enumerated field generator.

use backpack_sql::ToValue;

use crate::error::SchemaError;
use crate::fields::{finish, FieldOpts};
use crate::fieldspec::FieldSpec;
use crate::validators::Validator;

/// Options for an `Enum` field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnumOpts {
    /// The member values, in declaration order.
    pub values: Vec<String>,
    /// Common field options.
    pub opts: FieldOpts,
}

impl EnumOpts {
    /// Options over the given member values.
    #[must_use]
    pub fn new(values: &[&str]) -> Self {
        Self {
            values: values.iter().map(|v| String::from(*v)).collect(),
            opts: FieldOpts::default(),
        }
    }

    /// Marks the field NOT NULL.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.opts.required = true;
        self
    }

    /// Sets the column default; rendered quoted, like all enum defaults.
    #[must_use]
    pub fn default_value(mut self, value: impl ToValue) -> Self {
        self.opts.default = Some(value.to_value());
        self
    }

    pub(crate) fn generate(&self, field: &str) -> Result<FieldSpec, SchemaError> {
        let members: Vec<String> = self.values.iter().map(|v| format!("\"{v}\"")).collect();
        let spec = FieldSpec {
            sql: format!("ENUM ({})", members.join(", ")),
            validators: vec![Validator::TypeEnum(self.values.clone())],
            ..FieldSpec::default()
        };
        finish(spec, &self.opts, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_fare() {
        let spec = EnumOpts::new(&["green", "eggs", "ham"]).generate("e").unwrap();
        assert_eq!(spec.sql, "ENUM (\"green\", \"eggs\", \"ham\")");
        assert_eq!(
            spec.validators,
            vec![Validator::TypeEnum(vec![
                "green".into(),
                "eggs".into(),
                "ham".into(),
            ])]
        );
    }

    #[test]
    fn required_prepends_required() {
        let spec = EnumOpts::new(&["yo", "la", "tengo"]).required().generate("e").unwrap();
        assert_eq!(spec.validators[0], Validator::Required);
    }

    #[test]
    fn defaults_are_quoted() {
        let spec = EnumOpts::new(&["yo", "la", "tengo"])
            .default_value("tengo")
            .generate("e")
            .unwrap();
        assert_eq!(spec.sql, "ENUM (\"yo\", \"la\", \"tengo\") DEFAULT \"tengo\"");
    }
}
