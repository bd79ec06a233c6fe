//! Field specifications, schema descriptors, and the model definition.
//!
//! A model is declared as a plain configuration record ([`ModelDef`]):
//! table name, storage engine, an ordered schema of tagged field
//! descriptors ([`FieldDef`]), extra validators, and named
//! getters/setters. [`ModelDef::compile`] turns the declaration into the
//! canonical per-field [`Fieldspec`] the DDL generator and the
//! persistence layer consume.

use std::sync::Arc;

use backpack_sql::{Row, Value};

use crate::codec::Codec;
use crate::error::SchemaError;
use crate::fields::{
    boolean, numeric, DocumentOpts, EnumOpts, FieldOpts, ForeignOpts, NumberOpts, TextOpts,
    TimeOpts,
};
use crate::validators::Validator;

/// The compiled description of one schema field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldSpec {
    /// Storage type SQL, e.g. `VARCHAR(255) UNIQUE NOT NULL`.
    pub sql: String,
    /// Validator chain, in declaration order; `Required` sits first on
    /// non-nullable fields.
    pub validators: Vec<Validator>,
    /// Key-constraint clause emitted after the field clauses.
    pub key_sql: Option<String>,
    /// Model whose table must exist before this field's table.
    pub depends_on: Option<Arc<ModelDef>>,
    /// Storage/retrieval transform applied around persistence.
    pub mutators: Option<Codec>,
}

impl FieldSpec {
    /// A spec holding raw storage SQL and nothing else.
    #[must_use]
    pub fn raw(sql: &str) -> Self {
        Self {
            sql: String::from(sql),
            ..Self::default()
        }
    }
}

/// A declared schema field: the tagged descriptor variants replace
/// runtime string/object/function sniffing, since the variant is decided
/// at declaration time.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDef {
    /// Raw storage SQL, inserted as-is.
    Raw(String),
    /// A fully spelled-out spec, passed through.
    Spec(FieldSpec),
    /// Auto-incrementing primary key.
    Id,
    /// Numeric field.
    Number(NumberOpts),
    /// Text field.
    Text(TextOpts),
    /// Enumerated field.
    Enum(EnumOpts),
    /// Foreign-key field.
    Foreign(ForeignOpts),
    /// Serialized document field.
    Document(DocumentOpts),
    /// Boolean field.
    Boolean(FieldOpts),
    /// Time field.
    Time(TimeOpts),
}

impl FieldDef {
    /// Expands the descriptor into a spec, given the field-name context.
    pub(crate) fn generate(&self, field: &str) -> Result<FieldSpec, SchemaError> {
        match self {
            Self::Raw(sql) => Ok(FieldSpec::raw(sql)),
            Self::Spec(spec) => Ok(spec.clone()),
            Self::Id => Ok(numeric::id_spec()),
            Self::Number(opts) => opts.generate(field),
            Self::Text(opts) => opts.generate(field),
            Self::Enum(opts) => opts.generate(field),
            Self::Foreign(opts) => opts.generate(field),
            Self::Document(opts) => opts.generate(field),
            Self::Boolean(opts) => boolean::generate(opts, field),
            Self::Time(opts) => opts.generate(field),
        }
    }
}

/// The compiled fieldspec map: unique field names, declaration order
/// preserved so DDL generation is reproducible.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fieldspec {
    entries: Vec<(String, FieldSpec)>,
}

impl Fieldspec {
    /// Looks a field up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, spec)| spec)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut FieldSpec> {
        self.entries
            .iter_mut()
            .find(|(entry, _)| entry == name)
            .map(|(_, spec)| spec)
    }

    /// Iterates fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.entries.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no fields are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A named getter: receives the raw stored value, returns the derived
/// value without touching storage.
pub type Getter = fn(Option<&Value>) -> Option<Value>;

/// A named setter: receives the attribute store and the assigned value,
/// and is responsible for writing; it may transform or rename on write.
pub type Setter = fn(&mut Row, Value);

/// A model definition: a plain configuration record the persistence
/// engine is parameterized over. There is no inheritance; models that
/// share fields share generator calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDef {
    /// Backing table name.
    pub table: String,
    /// Storage engine named in the generated DDL.
    pub engine: String,
    /// Ordered schema declaration.
    pub schema: Vec<(String, FieldDef)>,
    /// Extra validators, appended to each field's generated chain.
    pub validators: Vec<(String, Vec<Validator>)>,
    /// Named getters, consulted by `get`.
    pub getters: Vec<(String, Getter)>,
    /// Named setters, consulted by `set`.
    pub setters: Vec<(String, Setter)>,
}

impl ModelDef {
    /// A definition with the default engine and an empty schema.
    #[must_use]
    pub fn new(table: &str) -> Self {
        Self {
            table: String::from(table),
            engine: String::from("InnoDB"),
            schema: Vec::new(),
            validators: Vec::new(),
            getters: Vec::new(),
            setters: Vec::new(),
        }
    }

    /// Overrides the storage engine.
    #[must_use]
    pub fn engine(mut self, engine: &str) -> Self {
        self.engine = String::from(engine);
        self
    }

    /// Declares a schema field; order of declaration is order in DDL.
    #[must_use]
    pub fn field(mut self, name: &str, def: FieldDef) -> Self {
        self.schema.push((String::from(name), def));
        self
    }

    /// Declares one extra validator for a field, appended to the end of
    /// the field's chain.
    #[must_use]
    pub fn validator(mut self, field: &str, validator: Validator) -> Self {
        self.validators.push((String::from(field), vec![validator]));
        self
    }

    /// Declares several extra validators for a field.
    #[must_use]
    pub fn validators(mut self, field: &str, validators: Vec<Validator>) -> Self {
        self.validators.push((String::from(field), validators));
        self
    }

    /// Declares a named getter.
    #[must_use]
    pub fn getter(mut self, key: &str, getter: Getter) -> Self {
        self.getters.push((String::from(key), getter));
        self
    }

    /// Declares a named setter.
    #[must_use]
    pub fn setter(mut self, key: &str, setter: Setter) -> Self {
        self.setters.push((String::from(key), setter));
        self
    }

    /// Looks up a named getter.
    #[must_use]
    pub fn getter_for(&self, key: &str) -> Option<Getter> {
        self.getters
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, getter)| *getter)
    }

    /// Looks up a named setter.
    #[must_use]
    pub fn setter_for(&self, key: &str) -> Option<Setter> {
        self.setters
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, setter)| *setter)
    }

    /// Compiles the declaration into the canonical fieldspec map.
    ///
    /// Compilation is pure: recompiling an unchanged definition yields an
    /// equal map. Nothing is cached; callers invoke this before DDL or
    /// validation use.
    pub fn compile(&self) -> Result<Fieldspec, SchemaError> {
        if self.schema.is_empty() {
            return Err(SchemaError::MissingSchema {
                table: self.table.clone(),
            });
        }

        let mut fieldspec = Fieldspec::default();
        for (name, def) in &self.schema {
            if fieldspec.get(name).is_some() {
                return Err(SchemaError::DuplicateField {
                    field: name.clone(),
                    table: self.table.clone(),
                });
            }
            let spec = def.generate(name)?;
            fieldspec.entries.push((name.clone(), spec));
        }

        // Declared validators go at the end of the chain, after anything
        // the generators attached.
        for (field, validators) in &self.validators {
            let spec = fieldspec
                .get_mut(field)
                .ok_or_else(|| SchemaError::UnknownField {
                    field: field.clone(),
                    table: self.table.clone(),
                })?;
            spec.validators.extend(validators.iter().cloned());
        }

        Ok(fieldspec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::TextOpts;

    #[test]
    fn empty_schema_is_a_configuration_error() {
        let err = ModelDef::new("user").compile().unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingSchema {
                table: "user".into()
            }
        );
    }

    #[test]
    fn raw_strings_pass_through_as_storage_sql() {
        let def = ModelDef::new("user").field("id", FieldDef::Raw("BIGINT AUTO_INCREMENT PRIMARY KEY".into()));
        let fieldspec = def.compile().unwrap();
        assert_eq!(
            fieldspec.get("id").unwrap().sql,
            "BIGINT AUTO_INCREMENT PRIMARY KEY"
        );
    }

    #[test]
    fn explicit_specs_pass_through() {
        let def = ModelDef::new("user").field(
            "id",
            FieldDef::Spec(FieldSpec {
                sql: "BIGINT AUTO_INCREMENT PRIMARY KEY".into(),
                key_sql: Some("unique key (id)".into()),
                ..FieldSpec::default()
            }),
        );
        let fieldspec = def.compile().unwrap();
        assert_eq!(
            fieldspec.get("id").unwrap().key_sql.as_deref(),
            Some("unique key (id)")
        );
    }

    #[test]
    fn generators_receive_the_field_name() {
        let def = ModelDef::new("t").field("t", FieldDef::Text(TextOpts::new().unique_key(128)));
        let fieldspec = def.compile().unwrap();
        assert_eq!(
            fieldspec.get("t").unwrap().key_sql.as_deref(),
            Some("UNIQUE KEY (t(128))")
        );
    }

    #[test]
    fn declared_validators_append_to_the_end() {
        let def = ModelDef::new("user")
            .field("email", FieldDef::Text(TextOpts::chars(255).required()))
            .validator("email", Validator::Email);
        let fieldspec = def.compile().unwrap();
        let chain = &fieldspec.get("email").unwrap().validators;
        assert_eq!(chain.len(), 4);
        assert_eq!(chain[0], Validator::Required);
        assert_eq!(chain[3], Validator::Email);
    }

    #[test]
    fn validators_for_unknown_fields_error() {
        let def = ModelDef::new("user")
            .field("id", FieldDef::Id)
            .validator("emial", Validator::Email);
        assert!(matches!(
            def.compile().unwrap_err(),
            SchemaError::UnknownField { .. }
        ));
    }

    #[test]
    fn duplicate_fields_error() {
        let def = ModelDef::new("user")
            .field("id", FieldDef::Id)
            .field("id", FieldDef::Id);
        assert!(matches!(
            def.compile().unwrap_err(),
            SchemaError::DuplicateField { .. }
        ));
    }

    #[test]
    fn compilation_is_idempotent() {
        let def = ModelDef::new("user")
            .field("id", FieldDef::Id)
            .field("email", FieldDef::Text(TextOpts::chars(255).unique().required()))
            .validator("email", Validator::Email);
        assert_eq!(def.compile().unwrap(), def.compile().unwrap());
    }
}
