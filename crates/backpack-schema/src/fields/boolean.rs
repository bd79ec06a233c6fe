//! Boolean field generator.

use crate::error::SchemaError;
use crate::fields::{finish, FieldOpts};
use crate::fieldspec::FieldSpec;

pub(crate) fn generate(opts: &FieldOpts, field: &str) -> Result<FieldSpec, SchemaError> {
    let spec = FieldSpec {
        sql: String::from("BOOLEAN"),
        ..FieldSpec::default()
    };
    finish(spec, opts, field)
}
