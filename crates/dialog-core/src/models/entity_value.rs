//! Values of an entity

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::codec::{Decodable, Encodable, JsonObject, ObjectEncoder};
use crate::error::{DecodeResult, EncodeResult};
use crate::models::CollectionItem;
use crate::value::DynamicValue;

/// How an entity value is matched in user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Synonyms,
    Patterns,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Synonyms => "synonyms",
            ValueType::Patterns => "patterns",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "synonyms" => Ok(ValueType::Synonyms),
            "patterns" => Ok(ValueType::Patterns),
            other => Err(format!("unknown value type: {other}")),
        }
    }
}

/// A value of an entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntityValue {
    /// Wire key `value`
    pub value_text: String,
    pub metadata: Option<Value>,
    /// Wire key `type`
    pub value_type: Option<ValueType>,
    pub synonyms: Option<Vec<String>>,
    pub patterns: Option<Vec<String>>,
    pub created: Option<String>,
    pub updated: Option<String>,
}

impl EntityValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value_text: value.into(),
            metadata: None,
            value_type: None,
            synonyms: None,
            patterns: None,
            created: None,
            updated: None,
        }
    }
}

impl Decodable for EntityValue {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            value_text: json.get_string("value")?,
            metadata: json.try_value("metadata"),
            value_type: json.try_parsed("type")?,
            synonyms: json.try_string_array("synonyms")?,
            patterns: json.try_string_array("patterns")?,
            created: json.try_string("created"),
            updated: json.try_string("updated"),
        })
    }
}

impl Encodable for EntityValue {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("value", self.value_text.clone())
            .insert_opt("metadata", self.metadata.clone())
            .insert_opt("type", self.value_type.map(|t| t.as_str()))
            .insert_opt("synonyms", self.synonyms.clone())
            .insert_opt("patterns", self.patterns.clone())
            .insert_opt("created", self.created.clone())
            .insert_opt("updated", self.updated.clone());
        Ok(enc.finish())
    }
}

impl CollectionItem for EntityValue {
    const COLLECTION_KEY: &'static str = "values";
}

/// Payload for creating an entity value
#[derive(Debug, Clone, PartialEq)]
pub struct CreateValue {
    pub value: String,
    pub metadata: Option<Value>,
    /// Wire key `type`
    pub value_type: Option<ValueType>,
    pub synonyms: Option<Vec<String>>,
    pub patterns: Option<Vec<String>>,
}

impl CreateValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            metadata: None,
            value_type: None,
            synonyms: None,
            patterns: None,
        }
    }

    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms = Some(synonyms.into_iter().map(Into::into).collect());
        self
    }
}

impl Decodable for CreateValue {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            value: json.get_string("value")?,
            metadata: json.try_value("metadata"),
            value_type: json.try_parsed("type")?,
            synonyms: json.try_string_array("synonyms")?,
            patterns: json.try_string_array("patterns")?,
        })
    }
}

impl Encodable for CreateValue {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("value", self.value.clone())
            .insert_opt("metadata", self.metadata.clone())
            .insert_opt("type", self.value_type.map(|t| t.as_str()))
            .insert_opt("synonyms", self.synonyms.clone())
            .insert_opt("patterns", self.patterns.clone());
        Ok(enc.finish())
    }
}

/// Payload for updating an entity value; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateValue {
    /// Wire key `value`
    pub new_value: Option<String>,
    /// Wire key `metadata`
    pub new_metadata: Option<Value>,
    /// Wire key `type`
    pub new_type: Option<ValueType>,
    /// Wire key `synonyms`
    pub new_synonyms: Option<Vec<String>>,
    /// Wire key `patterns`
    pub new_patterns: Option<Vec<String>>,
}

impl Encodable for UpdateValue {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert_opt("value", self.new_value.clone())
            .insert_opt("metadata", self.new_metadata.clone())
            .insert_opt("type", self.new_type.map(|t| t.as_str()))
            .insert_opt("synonyms", self.new_synonyms.clone())
            .insert_opt("patterns", self.new_patterns.clone());
        Ok(enc.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_slice, encode_to_vec, round_trip};
    use crate::error::DecodeError;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[test]
    fn test_value_round_trip() {
        let value = EntityValue {
            value_text: "pepperoni".to_string(),
            metadata: Some(json!({"source": {"import": [1, 2]}})),
            value_type: Some(ValueType::Synonyms),
            synonyms: Some(vec!["peperoni".to_string(), "pepper".to_string()]),
            patterns: None,
            created: Some("2017-01-01".to_string()),
            updated: None,
        };
        let bytes = encode_to_vec(&value).unwrap();
        assert_eq!(decode_slice::<EntityValue>(&bytes).unwrap(), value);
    }

    #[test]
    fn test_unknown_value_type_is_rejected() {
        let err = decode_slice::<EntityValue>(br#"{"value": "x", "type": "regex"}"#).unwrap_err();
        assert_eq!(err.path(), Some("type"));
        assert!(matches!(err, DecodeError::UnexpectedValue { .. }));
    }

    #[test]
    fn test_update_value_wire_keys() {
        let update = UpdateValue {
            new_value: Some("cheese".to_string()),
            new_type: Some(ValueType::Patterns),
            new_patterns: Some(vec![r"\d{3}".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            Value::Object(update.encode().unwrap()),
            json!({"value": "cheese", "type": "patterns", "patterns": ["\\d{3}"]})
        );
    }

    #[test]
    fn test_bare_value_round_trip() {
        let value = EntityValue::new("cheese");
        assert_eq!(round_trip(&value), value);
    }

    #[test]
    fn test_create_value_round_trip() {
        let bare = CreateValue::new("phone");
        assert_eq!(round_trip(&bare), bare);

        let full = CreateValue {
            metadata: Some(json!(["any", "json"])),
            value_type: Some(ValueType::Patterns),
            synonyms: Some(vec!["mobile".to_string()]),
            patterns: Some(vec![r"\d{3}-\d{4}".to_string()]),
            ..CreateValue::new("phone")
        };
        assert_eq!(round_trip(&full), full);
    }
}
