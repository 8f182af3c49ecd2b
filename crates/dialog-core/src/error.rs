//! Decode and encode error types for the JSON codec

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Result type for decoding operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for encoding operations
pub type EncodeResult<T> = Result<T, EncodeError>;

/// JSON type tag used in type-mismatch diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    Null,
    Bool,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    /// Classify a parsed JSON value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => JsonType::Integer,
            Value::Number(_) => JsonType::Number,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonType::Null => "null",
            JsonType::Bool => "bool",
            JsonType::Integer => "integer",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        };
        f.write_str(name)
    }
}

/// Errors raised while turning JSON into a typed model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Bytes are not valid JSON, or a document was expected and a scalar found
    #[error("malformed JSON payload: {0}")]
    MalformedPayload(String),

    /// A required field is absent
    #[error("missing field `{path}`")]
    FieldMissing { path: String },

    /// A field is present with the wrong JSON type
    #[error("field `{path}`: expected {expected}, found {actual}")]
    FieldTypeMismatch {
        path: String,
        expected: JsonType,
        actual: JsonType,
    },

    /// A string field holds a value outside its enumerated set
    #[error("field `{path}`: unexpected value `{value}`")]
    UnexpectedValue { path: String, value: String },
}

impl DecodeError {
    /// Dotted path of the offending field, if the error is field-scoped
    pub fn path(&self) -> Option<&str> {
        match self {
            DecodeError::MalformedPayload(_) => None,
            DecodeError::FieldMissing { path }
            | DecodeError::FieldTypeMismatch { path, .. }
            | DecodeError::UnexpectedValue { path, .. } => Some(path),
        }
    }

    pub(crate) fn is_absent_or_mismatch(&self) -> bool {
        matches!(
            self,
            DecodeError::FieldMissing { .. } | DecodeError::FieldTypeMismatch { .. }
        )
    }
}

/// Errors raised while turning a model into JSON
#[derive(Debug, Error)]
pub enum EncodeError {
    /// NaN and infinities have no JSON representation
    #[error("field `{key}` holds a non-finite number")]
    NonFiniteNumber { key: String },

    /// Serializing the encoded mapping to bytes failed
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
