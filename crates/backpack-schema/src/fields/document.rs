//! Document field generator: serialized structured storage.

use crate::codec::Codec;
use crate::error::SchemaError;
use crate::fields::{finish, FieldOpts};
use crate::fieldspec::FieldSpec;
use crate::validators::Validator;

/// Options for a `Document` field.
///
/// Documents store a structured value in a blob column, serialized on the
/// way in and deserialized on the way out by the field's codec.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentOpts {
    /// The storage/retrieval transform pair; JSON by default.
    pub codec: Codec,
    /// Common field options.
    pub opts: FieldOpts,
}

impl Default for DocumentOpts {
    fn default() -> Self {
        Self {
            codec: Codec::Json,
            opts: FieldOpts::default(),
        }
    }
}

impl DocumentOpts {
    /// Fresh options: JSON codec.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a custom codec.
    #[must_use]
    pub fn codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    /// Marks the field NOT NULL.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.opts.required = true;
        self
    }

    pub(crate) fn generate(&self, field: &str) -> Result<FieldSpec, SchemaError> {
        let spec = FieldSpec {
            sql: String::from("BLOB"),
            validators: vec![Validator::Serializable(self.codec.clone())],
            mutators: Some(self.codec.clone()),
            ..FieldSpec::default()
        };
        finish(spec, &self.opts, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_storage_with_json_codec() {
        let spec = DocumentOpts::new().generate("body").unwrap();
        assert_eq!(spec.sql, "BLOB");
        assert_eq!(spec.validators, vec![Validator::Serializable(Codec::Json)]);
        assert_eq!(spec.mutators, Some(Codec::Json));
    }

    #[test]
    fn required_document() {
        let spec = DocumentOpts::new().required().generate("body").unwrap();
        assert_eq!(spec.sql, "BLOB NOT NULL");
        assert_eq!(spec.validators[0], Validator::Required);
    }
}
