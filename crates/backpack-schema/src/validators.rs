//! Field validators.
//!
//! A validator checks one value (and, for conditional requirements, its
//! sibling attributes) and reports a structured [`Invalid`] descriptor or
//! nothing. Every validator treats a missing value (key absent or NULL)
//! as valid, except the `Required` family: required-ness composes
//! orthogonally through explicit `Required` entries instead of being
//! baked into every type check.
//!
//! Validators are plain data and compare structurally, so a chain can be
//! inspected and deduplicated; custom checks compare by fn-pointer
//! identity.

use std::sync::OnceLock;

use backpack_sql::{Row, ToValue, Value};
use regex::Regex;

use crate::codec::Codec;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

const EMAIL_PATTERN: &str = r"[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?";

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).unwrap())
}

/// A custom check: `(value, sibling attributes) -> failure or nothing`.
pub type CheckFn = fn(Option<&Value>, &Row) -> Option<Invalid>;

/// A compiled regular-expression check, compared by pattern source.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles a pattern.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            source: String::from(source),
            regex: Regex::new(source)?,
        })
    }

    /// The pattern source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// One failed sub-check inside a [`Invalid::Doc`] failure.
#[derive(Debug, Clone, PartialEq)]
pub struct DocError {
    /// Key of the failing sub-field.
    pub field: String,
    /// The sub-failure.
    pub error: Invalid,
}

/// Structured failure descriptor reported by a validator.
#[derive(Debug, Clone, PartialEq)]
pub enum Invalid {
    /// A required value is missing.
    Required,
    /// A conditionally required value is missing.
    RequiredWhen {
        /// Sibling attribute that triggered the requirement.
        field: String,
        /// Value the sibling attribute held.
        is: Value,
    },
    /// A value's length is out of bounds.
    Length {
        /// Offending value.
        value: Value,
        /// Lower bound, when one was configured.
        min: Option<usize>,
        /// Upper bound, when one was configured.
        max: Option<usize>,
    },
    /// A value could not be serialized for storage.
    Serializable {
        /// Offending value.
        value: Value,
    },
    /// Not a numeric value.
    TypeNumber {
        /// Offending value.
        value: Value,
    },
    /// Not a text value.
    TypeString {
        /// Offending value.
        value: Value,
    },
    /// Not a structured object value.
    TypeObject {
        /// Offending value.
        value: Value,
    },
    /// Not a member of the enumerated values.
    TypeEnum {
        /// Offending value.
        value: Value,
    },
    /// A text value did not match the pattern.
    Regexp {
        /// Offending value.
        value: Value,
        /// Pattern source.
        pattern: String,
    },
    /// Not a well-formed e-mail address.
    Email {
        /// Offending value.
        value: Value,
    },
    /// One or more sub-fields of an object value failed.
    Doc {
        /// All collected sub-failures, annotated with their field names.
        errors: Vec<DocError>,
    },
    /// Failure reported by a custom check.
    Custom {
        /// Failure name.
        name: String,
        /// Human-readable message.
        message: String,
        /// Offending value, when one was present.
        value: Option<Value>,
    },
}

impl Invalid {
    /// The failure's wire name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::RequiredWhen { .. } => "required-when",
            Self::Length { .. } => "length",
            Self::Serializable { .. } => "serializable",
            Self::TypeNumber { .. } => "type.number",
            Self::TypeString { .. } => "type.string",
            Self::TypeObject { .. } => "type.object",
            Self::TypeEnum { .. } => "type.enum",
            Self::Regexp { .. } => "regexp",
            Self::Email { .. } => "email",
            Self::Doc { .. } => "doc",
            Self::Custom { name, .. } => name,
        }
    }
}

/// A field check.
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    /// Fails when the value is missing.
    Required,
    /// Fails when the value is missing and a sibling attribute holds the
    /// trigger value (compared by strict equality, single value only).
    RequiredWhen {
        /// Sibling attribute to inspect.
        field: String,
        /// Trigger value.
        is: Value,
    },
    /// Fails when a value's length falls outside the bounds. Bounds of
    /// zero count as unset.
    Length {
        /// Lower bound.
        min: Option<usize>,
        /// Upper bound.
        max: Option<usize>,
    },
    /// Fails when the codec cannot encode a present value.
    Serializable(Codec),
    /// Admits integers, floats, and numeric text.
    TypeNumber,
    /// Admits text values.
    TypeString,
    /// Admits structured object values.
    TypeObject,
    /// Admits members of the enumerated values.
    TypeEnum(Vec<String>),
    /// Fails when a present text value does not match the pattern.
    Regexp(Pattern),
    /// Fails when a present text value is not an e-mail address.
    Email,
    /// Runs each sub-validator against the corresponding key of an
    /// object value, collecting every sub-failure. An absent object
    /// validates as an empty one.
    Doc(Vec<(String, Validator)>),
    /// A caller-supplied check, compared by fn-pointer identity.
    Custom {
        /// Check name.
        name: &'static str,
        /// The check itself.
        check: CheckFn,
    },
}

impl Validator {
    /// Length check with an upper bound only.
    #[must_use]
    pub const fn max_length(max: usize) -> Self {
        Self::Length {
            min: None,
            max: Some(max),
        }
    }

    /// Length check with both bounds.
    #[must_use]
    pub const fn length_range(min: usize, max: usize) -> Self {
        Self::Length {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Conditional requirement on a sibling attribute.
    #[must_use]
    pub fn required_when(field: &str, is: impl ToValue) -> Self {
        Self::RequiredWhen {
            field: String::from(field),
            is: is.to_value(),
        }
    }

    /// Runs the check.
    ///
    /// `value` is the field's own value (`None` when the key is absent),
    /// `attrs` the full attribute map for sibling lookups.
    #[must_use]
    pub fn validate(&self, value: Option<&Value>, attrs: &Row) -> Option<Invalid> {
        match self {
            Self::Required => missing(value).then_some(Invalid::Required),
            Self::RequiredWhen { field, is } => {
                let triggered = attrs
                    .get(field)
                    .is_some_and(|held| !held.is_null() && held == is);
                (triggered && missing(value)).then(|| Invalid::RequiredWhen {
                    field: field.clone(),
                    is: is.clone(),
                })
            }
            Self::Length { min, max } => check_length(value, *min, *max),
            Self::Serializable(codec) => {
                let present = present(value)?;
                codec.encode(present).err().map(|_| Invalid::Serializable {
                    value: present.clone(),
                })
            }
            Self::TypeNumber => {
                let present = present(value)?;
                let numeric = match present {
                    Value::Int(_) | Value::Float(_) => true,
                    Value::Text(s) => s.parse::<f64>().is_ok(),
                    _ => false,
                };
                (!numeric).then(|| Invalid::TypeNumber {
                    value: present.clone(),
                })
            }
            Self::TypeString => {
                let present = present(value)?;
                (!matches!(present, Value::Text(_))).then(|| Invalid::TypeString {
                    value: present.clone(),
                })
            }
            Self::TypeObject => {
                let present = present(value)?;
                let object = matches!(present, Value::Json(serde_json::Value::Object(_)));
                (!object).then(|| Invalid::TypeObject {
                    value: present.clone(),
                })
            }
            Self::TypeEnum(valid) => {
                let present = present(value)?;
                let member = present
                    .as_text()
                    .is_some_and(|text| valid.iter().any(|v| v == text));
                (!member).then(|| Invalid::TypeEnum {
                    value: present.clone(),
                })
            }
            Self::Regexp(pattern) => check_pattern(value, pattern).map(|value| Invalid::Regexp {
                value,
                pattern: String::from(pattern.source()),
            }),
            Self::Email => {
                let pattern = Pattern {
                    source: String::from(EMAIL_PATTERN),
                    regex: email_re().clone(),
                };
                check_pattern(value, &pattern).map(|value| Invalid::Email { value })
            }
            Self::Doc(validators) => check_doc(value, validators),
            Self::Custom { check, .. } => check(value, attrs),
        }
    }
}

/// Missing means the key is absent or the value is NULL.
fn missing(value: Option<&Value>) -> bool {
    value.map_or(true, Value::is_null)
}

/// The value, unless it is missing.
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn check_length(value: Option<&Value>, min: Option<usize>, max: Option<usize>) -> Option<Invalid> {
    let present = present(value)?;
    let len = match present {
        Value::Text(s) => s.len(),
        Value::Blob(b) => b.len(),
        Value::Json(serde_json::Value::Array(items)) => items.len(),
        Value::Json(serde_json::Value::String(s)) => s.len(),
        _ => return None,
    };
    let min = min.filter(|&m| m > 0);
    let max = max.filter(|&m| m > 0);
    let too_long = max.is_some_and(|m| len > m);
    let too_short = min.is_some_and(|m| len < m);
    (too_long || too_short).then(|| Invalid::Length {
        value: present.clone(),
        min,
        max,
    })
}

/// Returns the offending value when a present text value fails the pattern.
fn check_pattern(value: Option<&Value>, pattern: &Pattern) -> Option<Value> {
    let present = present(value)?;
    let matched = present
        .as_text()
        .is_some_and(|text| pattern.regex.is_match(text));
    (!matched).then(|| present.clone())
}

fn check_doc(value: Option<&Value>, validators: &[(String, Validator)]) -> Option<Invalid> {
    // An absent or non-object value checks like an empty object, so
    // required sub-fields still report.
    let empty = serde_json::Map::new();
    let doc = match present(value) {
        Some(Value::Json(serde_json::Value::Object(map))) => map,
        _ => &empty,
    };

    let siblings: Row = doc
        .iter()
        .map(|(key, v)| (key.clone(), json_to_value(v)))
        .collect();

    let mut errors = Vec::new();
    for (field, validator) in validators {
        let sub = doc.get(field).map(json_to_value);
        if let Some(error) = validator.validate(sub.as_ref(), &siblings) {
            errors.push(DocError {
                field: field.clone(),
                error,
            });
        }
    }
    (!errors.is_empty()).then_some(Invalid::Doc { errors })
}

fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => n
            .as_i64()
            .map_or_else(|| Value::Float(n.as_f64().unwrap_or(0.0)), Value::Int),
        serde_json::Value::String(s) => Value::Text(s.clone()),
        nested => Value::Json(nested.clone()),
    }
}
