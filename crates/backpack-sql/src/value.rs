//! Runtime SQL values and bound parameters.
//!
//! [`Value`] is the single value type used for model attributes, bound
//! parameters, and decoded result rows. Parameter lists are [`Params`],
//! built most conveniently with the [`params!`](crate::params) macro.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// A runtime SQL value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
    /// Timestamp value.
    Time(DateTime<Utc>),
    /// Structured document value, serialized on the way to storage.
    Json(serde_json::Value),
}

impl Value {
    /// Returns true for NULL.
    ///
    /// A field is *missing* when its key is absent from the attribute map
    /// or its value is NULL; validators key off this single definition.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text content, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer content, if this is an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }
}

/// A decoded result row.
pub type Row = HashMap<String, Value>;

/// Conversion into a [`Value`].
pub trait ToValue {
    /// Converts the value.
    fn to_value(self) -> Value;
}

impl ToValue for Value {
    fn to_value(self) -> Value {
        self
    }
}

impl ToValue for bool {
    fn to_value(self) -> Value {
        Value::Bool(self)
    }
}

impl ToValue for i64 {
    fn to_value(self) -> Value {
        Value::Int(self)
    }
}

impl ToValue for i32 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for i16 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for i8 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for u32 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for u16 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for u8 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for f64 {
    fn to_value(self) -> Value {
        Value::Float(self)
    }
}

impl ToValue for f32 {
    fn to_value(self) -> Value {
        Value::Float(f64::from(self))
    }
}

impl ToValue for String {
    fn to_value(self) -> Value {
        Value::Text(self)
    }
}

impl ToValue for &str {
    fn to_value(self) -> Value {
        Value::Text(String::from(self))
    }
}

impl ToValue for Vec<u8> {
    fn to_value(self) -> Value {
        Value::Blob(self)
    }
}

impl ToValue for &[u8] {
    fn to_value(self) -> Value {
        Value::Blob(self.to_vec())
    }
}

impl ToValue for DateTime<Utc> {
    fn to_value(self) -> Value {
        Value::Time(self)
    }
}

impl ToValue for serde_json::Value {
    fn to_value(self) -> Value {
        Value::Json(self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

/// An ordered list of bound parameter values.
///
/// Condition methods on the builders accept anything convertible into
/// `Params`: nothing (`()`), a single value, or a list built with
/// [`params!`](crate::params).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(pub Vec<Value>);

impl Params {
    /// An empty parameter list.
    #[must_use]
    pub const fn none() -> Self {
        Self(Vec::new())
    }

    /// Consumes the list.
    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.0
    }
}

impl From<()> for Params {
    fn from((): ()) -> Self {
        Self::none()
    }
}

impl From<Vec<Value>> for Params {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[Value; N]> for Params {
    fn from(values: [Value; N]) -> Self {
        Self(values.into())
    }
}

macro_rules! single_param {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Params {
                fn from(v: $t) -> Self {
                    Self(vec![v.to_value()])
                }
            }
        )*
    };
}

single_param!(
    Value,
    bool,
    i64,
    i32,
    i16,
    i8,
    u32,
    u16,
    u8,
    f64,
    f32,
    String,
    &str,
    Vec<u8>,
    DateTime<Utc>,
    serde_json::Value,
);

/// Builds a [`Params`] list from a comma-separated sequence of values.
///
/// ```
/// use backpack_sql::{params, Value};
///
/// let p = params![10, "hello"];
/// assert_eq!(p.0, vec![Value::Int(10), Value::Text("hello".into())]);
/// ```
#[macro_export]
macro_rules! params {
    () => { $crate::value::Params::none() };
    ($($v:expr),+ $(,)?) => {
        $crate::value::Params(vec![$($crate::value::ToValue::to_value($v)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_value_conversions() {
        assert_eq!(true.to_value(), Value::Bool(true));
        assert_eq!(42_i32.to_value(), Value::Int(42));
        assert_eq!(2.5_f64.to_value(), Value::Float(2.5));
        assert_eq!("hello".to_value(), Value::Text(String::from("hello")));
        assert_eq!(None::<i32>.to_value(), Value::Null);
        assert_eq!(Some(42_i64).to_value(), Value::Int(42));
        assert_eq!(vec![1_u8, 2].to_value(), Value::Blob(vec![1, 2]));
    }

    #[test]
    fn null_is_missing() {
        assert!(Value::Null.is_null());
        assert!(!Value::Int(0).is_null());
        assert!(!Value::Text(String::new()).is_null());
    }

    #[test]
    fn params_from_single_value() {
        let p: Params = 5.into();
        assert_eq!(p.0, vec![Value::Int(5)]);
    }

    #[test]
    fn params_from_unit_is_empty() {
        let p: Params = ().into();
        assert!(p.0.is_empty());
    }

    #[test]
    fn params_macro_preserves_order() {
        let p = params![10, 50];
        assert_eq!(p.0, vec![Value::Int(10), Value::Int(50)]);
    }
}
