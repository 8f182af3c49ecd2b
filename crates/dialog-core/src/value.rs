//! Typed, fallible access to parsed JSON
//!
//! `DynamicValue` wraps one parsed JSON value together with the dotted path
//! at which it was found. Models read their fields through it:
//!
//! - `get_*` accessors are for required fields and fail with
//!   [`DecodeError::FieldMissing`] or [`DecodeError::FieldTypeMismatch`].
//! - `try_*` accessors are for optional fields and turn exactly those two
//!   failures into `None`. Errors raised *inside* a present nested value still
//!   propagate.
//!
//! Nested values keep their full path (`logs[3].response.intents[0].intent`)
//! so decode errors point at the offending field.

use std::str::FromStr;

use serde_json::Value;

use crate::codec::{Decodable, JsonObject};
use crate::error::{DecodeError, DecodeResult, JsonType};

const ROOT: &str = "$";

/// Immutable parsed JSON value with typed accessors
#[derive(Debug, Clone)]
pub struct DynamicValue {
    value: Value,
    path: String,
}

impl PartialEq for DynamicValue {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl From<Value> for DynamicValue {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl DynamicValue {
    /// Wrap an already parsed value as a document root
    pub fn new(value: Value) -> Self {
        Self {
            value,
            path: String::new(),
        }
    }

    /// Parse raw bytes; any JSON value is accepted
    pub fn parse(bytes: &[u8]) -> DecodeResult<Self> {
        serde_json::from_slice(bytes)
            .map(Self::new)
            .map_err(|e| DecodeError::MalformedPayload(e.to_string()))
    }

    /// Parse raw bytes that must hold a top-level object or array
    pub fn parse_document(bytes: &[u8]) -> DecodeResult<Self> {
        let parsed = Self::parse(bytes)?;
        if matches!(parsed.value, Value::Object(_) | Value::Array(_)) {
            return Ok(parsed);
        }
        Err(DecodeError::MalformedPayload(format!(
            "expected a JSON object or array, found {}",
            parsed.json_type()
        )))
    }

    /// Dotted path of this value relative to the document root
    pub fn path(&self) -> &str {
        if self.path.is_empty() {
            ROOT
        } else {
            &self.path
        }
    }

    pub fn json_type(&self) -> JsonType {
        JsonType::of(&self.value)
    }

    pub fn as_value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Whether the value is an object holding `key` with a non-null value
    pub fn contains(&self, key: &str) -> bool {
        matches!(&self.value, Value::Object(map) if map.get(key).is_some_and(|v| !v.is_null()))
    }

    // =========================================================================
    // Required scalars
    // =========================================================================

    pub fn get_string(&self, key: &str) -> DecodeResult<String> {
        self.scalar(key, JsonType::String, |v| v.as_str().map(str::to_owned))
    }

    pub fn get_i64(&self, key: &str) -> DecodeResult<i64> {
        self.scalar(key, JsonType::Integer, Value::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> DecodeResult<f64> {
        self.scalar(key, JsonType::Number, Value::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> DecodeResult<bool> {
        self.scalar(key, JsonType::Bool, Value::as_bool)
    }

    // =========================================================================
    // Optional scalars
    // =========================================================================

    pub fn try_string(&self, key: &str) -> Option<String> {
        self.get_string(key).ok()
    }

    pub fn try_i64(&self, key: &str) -> Option<i64> {
        self.get_i64(key).ok()
    }

    pub fn try_f64(&self, key: &str) -> Option<f64> {
        self.get_f64(key).ok()
    }

    pub fn try_bool(&self, key: &str) -> Option<bool> {
        self.get_bool(key).ok()
    }

    /// Parse the string at `key` through `FromStr`, for enumerated fields
    pub fn try_parsed<T: FromStr>(&self, key: &str) -> DecodeResult<Option<T>> {
        match self.try_string(key) {
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| DecodeError::UnexpectedValue {
                    path: self.field_path(key),
                    value: raw,
                }),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Nested models
    // =========================================================================

    /// Decode the object at `key` as `T`
    pub fn decode<T: Decodable>(&self, key: &str) -> DecodeResult<T> {
        let child = self.child(key)?;
        T::decode(&child)
    }

    /// Decode the object at `key` as `T` when present
    ///
    /// Absent, null or non-object values yield `None`; failures inside a
    /// present object are returned as errors.
    pub fn try_decode<T: Decodable>(&self, key: &str) -> DecodeResult<Option<T>> {
        match self.child(key) {
            Ok(child) if matches!(child.value, Value::Object(_)) => T::decode(&child).map(Some),
            Ok(_) => Ok(None),
            Err(e) if e.is_absent_or_mismatch() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Decode every element of the array at `key` as `T`
    ///
    /// The first failing element fails the whole call.
    pub fn decoded_array<T: Decodable>(&self, key: &str) -> DecodeResult<Vec<T>> {
        self.array_field(key)?
            .elements()
            .map(|element| T::decode(&element))
            .collect()
    }

    /// Like [`decoded_array`](Self::decoded_array), with an absent or
    /// non-array field yielding `None`
    pub fn try_decoded_array<T: Decodable>(&self, key: &str) -> DecodeResult<Option<Vec<T>>> {
        if !self.has_array(key) {
            return Ok(None);
        }
        self.decoded_array(key).map(Some)
    }

    /// Decode every element of this value, which must be an array
    pub fn decode_elements<T: Decodable>(&self) -> DecodeResult<Vec<T>> {
        if !self.value.is_array() {
            return Err(self.mismatch(self.path().to_string(), JsonType::Array, &self.value));
        }
        self.elements().map(|element| T::decode(&element)).collect()
    }

    // =========================================================================
    // Scalar arrays
    // =========================================================================

    pub fn get_string_array(&self, key: &str) -> DecodeResult<Vec<String>> {
        self.scalar_array(key, JsonType::String, |v| v.as_str().map(str::to_owned))
    }

    pub fn try_string_array(&self, key: &str) -> DecodeResult<Option<Vec<String>>> {
        if !self.has_array(key) {
            return Ok(None);
        }
        self.get_string_array(key).map(Some)
    }

    pub fn get_i64_array(&self, key: &str) -> DecodeResult<Vec<i64>> {
        self.scalar_array(key, JsonType::Integer, Value::as_i64)
    }

    // =========================================================================
    // Opaque access
    // =========================================================================

    /// Any JSON value at `key`, unvalidated
    pub fn get_value(&self, key: &str) -> DecodeResult<Value> {
        self.field(key).cloned()
    }

    /// Any JSON value at `key`; an explicit `null` is kept as `Some(Null)`
    pub fn try_value(&self, key: &str) -> Option<Value> {
        self.field(key).ok().cloned()
    }

    /// The object at `key` as an untyped mapping
    pub fn get_object(&self, key: &str) -> DecodeResult<JsonObject> {
        self.scalar(key, JsonType::Object, |v| v.as_object().cloned())
    }

    pub fn try_object(&self, key: &str) -> Option<JsonObject> {
        self.get_object(key).ok()
    }

    /// This value as an untyped mapping, for pass-through types
    pub fn get_dictionary_object(&self) -> DecodeResult<JsonObject> {
        match &self.value {
            Value::Object(map) => Ok(map.clone()),
            other => Err(self.mismatch(self.path().to_string(), JsonType::Object, other)),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn field_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    fn mismatch(&self, path: String, expected: JsonType, actual: &Value) -> DecodeError {
        DecodeError::FieldTypeMismatch {
            path,
            expected,
            actual: JsonType::of(actual),
        }
    }

    fn field(&self, key: &str) -> DecodeResult<&Value> {
        let map = match &self.value {
            Value::Object(map) => map,
            other => {
                return Err(self.mismatch(self.path().to_string(), JsonType::Object, other));
            }
        };
        map.get(key).ok_or_else(|| DecodeError::FieldMissing {
            path: self.field_path(key),
        })
    }

    fn child(&self, key: &str) -> DecodeResult<DynamicValue> {
        let value = self.field(key)?.clone();
        Ok(DynamicValue {
            value,
            path: self.field_path(key),
        })
    }

    fn has_array(&self, key: &str) -> bool {
        matches!(self.field(key), Ok(Value::Array(_)))
    }

    fn array_field(&self, key: &str) -> DecodeResult<DynamicValue> {
        let child = self.child(key)?;
        if child.value.is_array() {
            Ok(child)
        } else {
            Err(self.mismatch(child.path, JsonType::Array, &child.value))
        }
    }

    fn elements(&self) -> impl Iterator<Item = DynamicValue> + '_ {
        let base = self.path();
        self.value
            .as_array()
            .into_iter()
            .flatten()
            .enumerate()
            .map(move |(i, item)| DynamicValue {
                value: item.clone(),
                path: format!("{base}[{i}]"),
            })
    }

    fn scalar<'a, T>(
        &'a self,
        key: &str,
        expected: JsonType,
        extract: impl Fn(&'a Value) -> Option<T>,
    ) -> DecodeResult<T> {
        let value = self.field(key)?;
        extract(value).ok_or_else(|| self.mismatch(self.field_path(key), expected, value))
    }

    fn scalar_array<T>(
        &self,
        key: &str,
        expected: JsonType,
        extract: impl Fn(&Value) -> Option<T>,
    ) -> DecodeResult<Vec<T>> {
        self.array_field(key)?
            .elements()
            .map(|element| {
                extract(&element.value)
                    .ok_or_else(|| self.mismatch(element.path.clone(), expected, &element.value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct Item {
        name: String,
        size: Option<i64>,
    }

    impl Decodable for Item {
        fn decode(json: &DynamicValue) -> DecodeResult<Self> {
            Ok(Self {
                name: json.get_string("name")?,
                size: json.try_i64("size"),
            })
        }
    }

    fn doc(value: Value) -> DynamicValue {
        DynamicValue::new(value)
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = DynamicValue::parse(b"{not json").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedPayload(_)));
    }

    #[test]
    fn test_parse_document_rejects_scalars() {
        assert!(DynamicValue::parse(b"42").is_ok());
        let err = DynamicValue::parse_document(b"42").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedPayload(_)));
        assert!(DynamicValue::parse_document(b"[1, 2]").is_ok());
    }

    #[test]
    fn test_required_accessors() {
        let json = doc(json!({"s": "x", "i": 7, "f": 1.5, "b": true}));
        assert_eq!(json.get_string("s").unwrap(), "x");
        assert_eq!(json.get_i64("i").unwrap(), 7);
        assert_eq!(json.get_f64("f").unwrap(), 1.5);
        assert_eq!(json.get_f64("i").unwrap(), 7.0);
        assert!(json.get_bool("b").unwrap());
    }

    #[test]
    fn test_missing_and_mismatch() {
        let json = doc(json!({"s": 3, "n": null}));
        assert_eq!(
            json.get_string("absent").unwrap_err(),
            DecodeError::FieldMissing {
                path: "absent".to_string()
            }
        );
        assert_eq!(
            json.get_string("s").unwrap_err(),
            DecodeError::FieldTypeMismatch {
                path: "s".to_string(),
                expected: JsonType::String,
                actual: JsonType::Integer,
            }
        );
        assert!(matches!(
            json.get_string("n").unwrap_err(),
            DecodeError::FieldTypeMismatch {
                actual: JsonType::Null,
                ..
            }
        ));
    }

    #[test]
    fn test_try_accessors_absorb_missing_and_mismatch() {
        let json = doc(json!({"s": 3, "n": null}));
        assert_eq!(json.try_string("absent"), None);
        assert_eq!(json.try_string("s"), None);
        assert_eq!(json.try_string("n"), None);
        assert_eq!(json.try_i64("s"), Some(3));
    }

    #[test]
    fn test_integer_rejects_fraction() {
        let json = doc(json!({"i": 2.5}));
        assert!(matches!(
            json.get_i64("i").unwrap_err(),
            DecodeError::FieldTypeMismatch {
                expected: JsonType::Integer,
                actual: JsonType::Number,
                ..
            }
        ));
    }

    #[test]
    fn test_nested_decode_carries_path() {
        let json = doc(json!({"item": {"size": 1}}));
        let err = json.decode::<Item>("item").unwrap_err();
        assert_eq!(err.path(), Some("item.name"));
    }

    #[test]
    fn test_try_decode_propagates_inner_failure() {
        let json = doc(json!({"item": {"size": 1}, "other": "scalar"}));
        assert!(json.try_decode::<Item>("absent").unwrap().is_none());
        assert!(json.try_decode::<Item>("other").unwrap().is_none());
        let err = json.try_decode::<Item>("item").unwrap_err();
        assert_eq!(err.path(), Some("item.name"));
    }

    #[test]
    fn test_decoded_array_is_atomic() {
        let json = doc(json!({
            "items": [
                {"name": "a"},
                {"name": "b"},
                {"size": 3},
                {"name": "d"},
                {"name": "e"}
            ]
        }));
        let err = json.decoded_array::<Item>("items").unwrap_err();
        assert_eq!(err.path(), Some("items[2].name"));
    }

    #[test]
    fn test_empty_array_differs_from_missing() {
        let json = doc(json!({"items": []}));
        assert_eq!(json.try_decoded_array::<Item>("items").unwrap(), Some(vec![]));
        assert_eq!(json.try_decoded_array::<Item>("absent").unwrap(), None);
        assert!(matches!(
            json.decoded_array::<Item>("absent").unwrap_err(),
            DecodeError::FieldMissing { .. }
        ));
    }

    #[test]
    fn test_string_array_element_mismatch() {
        let json = doc(json!({"text": ["a", 1]}));
        let err = json.get_string_array("text").unwrap_err();
        assert_eq!(err.path(), Some("text[1]"));
        assert!(json.try_string_array("text").is_err());
        assert_eq!(json.try_string_array("absent").unwrap(), None);
    }

    #[test]
    fn test_opaque_access() {
        let json = doc(json!({"meta": {"k": [1, 2]}, "nothing": null}));
        assert_eq!(json.get_value("meta").unwrap(), json!({"k": [1, 2]}));
        assert_eq!(json.try_value("nothing"), Some(Value::Null));
        assert_eq!(json.try_value("absent"), None);
        assert!(json.try_object("nothing").is_none());
        let dict = json.get_dictionary_object().unwrap();
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_decode_elements_of_top_level_array() {
        let json = DynamicValue::parse_document(br#"[{"name": "a"}, {"name": "b", "size": 2}]"#)
            .unwrap();
        let items: Vec<Item> = json.decode_elements().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].size, Some(2));
    }

    #[test]
    fn test_equality_ignores_path() {
        let json = doc(json!({"item": {"name": "a"}}));
        let nested = json.child("item").unwrap();
        assert_eq!(nested, doc(json!({"name": "a"})));
        assert_eq!(nested.path(), "item");
    }
}
