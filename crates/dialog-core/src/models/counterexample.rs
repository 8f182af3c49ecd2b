//! Counterexamples: inputs that must not match any intent

use crate::codec::{Decodable, Encodable, JsonObject, ObjectEncoder};
use crate::error::{DecodeResult, EncodeResult};
use crate::models::CollectionItem;
use crate::value::DynamicValue;

/// Input text marked as irrelevant to every intent
#[derive(Debug, Clone, PartialEq)]
pub struct Counterexample {
    /// Text of the counterexample, wire key `text`
    pub counterexample_text: String,
    pub created: Option<String>,
    pub updated: Option<String>,
}

impl Counterexample {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            counterexample_text: text.into(),
            created: None,
            updated: None,
        }
    }
}

impl Decodable for Counterexample {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            counterexample_text: json.get_string("text")?,
            created: json.try_string("created"),
            updated: json.try_string("updated"),
        })
    }
}

impl Encodable for Counterexample {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("text", self.counterexample_text.clone())
            .insert_opt("created", self.created.clone())
            .insert_opt("updated", self.updated.clone());
        Ok(enc.finish())
    }
}

impl CollectionItem for Counterexample {
    const COLLECTION_KEY: &'static str = "counterexamples";
}

/// Payload for creating a counterexample
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCounterexample {
    pub text: String,
}

impl CreateCounterexample {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Decodable for CreateCounterexample {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            text: json.get_string("text")?,
        })
    }
}

impl Encodable for CreateCounterexample {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("text", self.text.clone());
        Ok(enc.finish())
    }
}

/// Payload for updating a counterexample; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateCounterexample {
    /// Replacement text, wire key `text`
    pub new_text: Option<String>,
}

impl Encodable for UpdateCounterexample {
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
    fn test_counterexample_wire_key() {
        let counterexample: Counterexample = decode_slice(br#"{"text": "tell me a joke"}"#).unwrap();
        assert_eq!(counterexample.counterexample_text, "tell me a joke");
        assert_eq!(
            Value::Object(counterexample.encode().unwrap()),
            json!({"text": "tell me a joke"})
        );
    }

    #[test]
    fn test_empty_update_encodes_empty_object() {
        let update = UpdateCounterexample::default();
        assert!(update.encode().unwrap().is_empty());
    }

    #[test]
    fn test_counterexample_round_trip() {
        let bare = Counterexample::new("what's the weather");
        assert_eq!(round_trip(&bare), bare);

        let full = Counterexample {
            created: Some("2017-01-01T00:00:00.000Z".to_string()),
            updated: Some("2017-01-02T00:00:00.000Z".to_string()),
            ..Counterexample::new("tell me a joke")
        };
        assert_eq!(round_trip(&full), full);

        let create = CreateCounterexample::new("sing a song");
        assert_eq!(round_trip(&create), create);
    }
}
