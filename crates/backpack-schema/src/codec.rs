//! Storage codecs for document fields.
//!
//! A [`Codec`] is the paired serialize/deserialize transform applied
//! around persistence: `encode` runs on the way to storage, `decode` on
//! the way back. Document fields default to the JSON codec.

use backpack_sql::Value;
use thiserror::Error;

/// Failure while encoding or decoding a stored value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("codec error: {0}")]
pub struct CodecError(pub String);

/// A custom codec stage.
pub type CodecFn = fn(&Value) -> Result<Value, CodecError>;

/// A paired storage/retrieval transform.
#[derive(Debug, Clone, PartialEq)]
pub enum Codec {
    /// Serialize to a JSON text value and back.
    Json,
    /// Caller-supplied transform pair, compared by fn-pointer identity.
    Custom {
        /// Codec name, used in failure descriptors.
        name: &'static str,
        /// Transform applied on the way to storage.
        encode: CodecFn,
        /// Transform applied on the way back from storage.
        decode: CodecFn,
    },
}

impl Codec {
    /// Applies the storage-direction transform.
    ///
    /// NULL passes through untouched; missing values never reach a codec.
    pub fn encode(&self, value: &Value) -> Result<Value, CodecError> {
        match self {
            Self::Json => encode_json(value),
            Self::Custom { encode, .. } => encode(value),
        }
    }

    /// Applies the retrieval-direction transform.
    pub fn decode(&self, value: &Value) -> Result<Value, CodecError> {
        match self {
            Self::Json => decode_json(value),
            Self::Custom { decode, .. } => decode(value),
        }
    }
}

fn encode_json(value: &Value) -> Result<Value, CodecError> {
    let json = match value {
        Value::Null => return Ok(Value::Null),
        Value::Json(v) => v.clone(),
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(n) => serde_json::Value::from(*n),
        Value::Float(f) => serde_json::Value::from(*f),
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::Blob(_) | Value::Time(_) => {
            return Err(CodecError(String::from(
                "binary and timestamp values have no JSON form",
            )));
        }
    };
    serde_json::to_string(&json)
        .map(Value::Text)
        .map_err(|e| CodecError(e.to_string()))
}

fn decode_json(value: &Value) -> Result<Value, CodecError> {
    let text = match value {
        Value::Null => return Ok(Value::Null),
        Value::Text(s) => s.clone(),
        Value::Blob(bytes) => String::from_utf8(bytes.clone())
            .map_err(|e| CodecError(e.to_string()))?,
        other => {
            return Err(CodecError(format!("cannot decode {other:?} as JSON text")));
        }
    };
    serde_json::from_str(&text)
        .map(Value::Json)
        .map_err(|e| CodecError(e.to_string()))
}
