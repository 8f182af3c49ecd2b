//! User input examples attached to an intent

use crate::codec::{Decodable, Encodable, JsonObject, ObjectEncoder};
use crate::error::{DecodeResult, EncodeResult};
use crate::models::CollectionItem;
use crate::value::DynamicValue;

/// A user input example for an intent
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    /// Text of the example, wire key `text`
    pub example_text: String,
    pub created: Option<String>,
    pub updated: Option<String>,
}

impl Example {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            example_text: text.into(),
            created: None,
            updated: None,
        }
    }
}

impl Decodable for Example {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            example_text: json.get_string("text")?,
            created: json.try_string("created"),
            updated: json.try_string("updated"),
        })
    }
}

impl Encodable for Example {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("text", self.example_text.clone())
            .insert_opt("created", self.created.clone())
            .insert_opt("updated", self.updated.clone());
        Ok(enc.finish())
    }
}

impl CollectionItem for Example {
    const COLLECTION_KEY: &'static str = "examples";
}

/// Payload for creating an example
#[derive(Debug, Clone, PartialEq)]
pub struct CreateExample {
    pub text: String,
}

impl CreateExample {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Decodable for CreateExample {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            text: json.get_string("text")?,
        })
    }
}

impl Encodable for CreateExample {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("text", self.text.clone());
        Ok(enc.finish())
    }
}

/// Payload for updating an example; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateExample {
    /// Replacement text, wire key `text`
    pub new_text: Option<String>,
}

impl Encodable for UpdateExample {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert_opt("text", self.new_text.clone());
        Ok(enc.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_slice, round_trip};
    use serde_json::{json, Value};

    #[test]
    fn test_example_wire_key() {
        let example: Example = decode_slice(br#"{"text": "order a pizza"}"#).unwrap();
        assert_eq!(example.example_text, "order a pizza");
        assert_eq!(
            Value::Object(example.encode().unwrap()),
            json!({"text": "order a pizza"})
        );
    }

    #[test]
    fn test_empty_update_encodes_empty_object() {
        let update = UpdateExample::default();
        assert!(update.encode().unwrap().is_empty());
    }

    #[test]
    fn test_example_round_trip() {
        let bare = Example::new("hi");
        assert_eq!(round_trip(&bare), bare);

        let full = Example {
            created: Some("2017-01-01T00:00:00.000Z".to_string()),
            updated: Some("2017-01-02T00:00:00.000Z".to_string()),
            ..Example::new("hello there")
        };
        assert_eq!(round_trip(&full), full);

        let create = CreateExample::new("good morning");
        assert_eq!(round_trip(&create), create);
    }
}
