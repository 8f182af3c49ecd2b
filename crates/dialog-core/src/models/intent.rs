//! Intent models

use crate::codec::{Decodable, Encodable, JsonObject, ObjectEncoder};
use crate::error::{DecodeResult, EncodeResult};
use crate::models::{CollectionItem, CreateExample, Example};
use crate::value::DynamicValue;

/// An intent defined in a workspace
#[derive(Debug, Clone, PartialEq)]
pub struct Intent {
    /// Intent name, wire key `intent`
    pub intent_name: String,
    pub description: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    /// Only present when the intent is requested with `export=true`
    pub examples: Option<Vec<Example>>,
}

impl Decodable for Intent {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            intent_name: json.get_string("intent")?,
            description: json.try_string("description"),
            created: json.try_string("created"),
            updated: json.try_string("updated"),
            examples: json.try_decoded_array("examples")?,
        })
    }
}

impl Encodable for Intent {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("intent", self.intent_name.clone())
            .insert_opt("description", self.description.clone())
            .insert_opt("created", self.created.clone())
            .insert_opt("updated", self.updated.clone())
            .insert_opt_models("examples", self.examples.as_deref())?;
        Ok(enc.finish())
    }
}

impl CollectionItem for Intent {
    const COLLECTION_KEY: &'static str = "intents";
}

/// Payload for creating an intent
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIntent {
    pub intent: String,
    pub description: Option<String>,
    pub examples: Option<Vec<CreateExample>>,
}

impl CreateIntent {
    pub fn new(intent: impl Into<String>) -> Self {
        Self {
            intent: intent.into(),
            description: None,
            examples: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples = Some(examples.into_iter().map(CreateExample::new).collect());
        self
    }
}

impl Decodable for CreateIntent {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            intent: json.get_string("intent")?,
            description: json.try_string("description"),
            examples: json.try_decoded_array("examples")?,
        })
    }
}

impl Encodable for CreateIntent {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("intent", self.intent.clone())
            .insert_opt("description", self.description.clone())
            .insert_opt_models("examples", self.examples.as_deref())?;
        Ok(enc.finish())
    }
}

/// Payload for updating an intent; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateIntent {
    /// Wire key `intent`
    pub new_intent: Option<String>,
    /// Wire key `description`
    pub new_description: Option<String>,
    /// Replaces all examples, wire key `examples`
    pub new_examples: Option<Vec<CreateExample>>,
}

impl Encodable for UpdateIntent {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert_opt("intent", self.new_intent.clone())
            .insert_opt("description", self.new_description.clone())
            .insert_opt_models("examples", self.new_examples.as_deref())?;
        Ok(enc.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_slice, encode_to_vec, round_trip};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[test]
    fn test_intent_scenario() {
        let body = br#"{"intent":"pizza_order","description":"","created":"2017-01-01","updated":"2017-01-01"}"#;
        let intent: Intent = decode_slice(body).unwrap();

        assert_eq!(
            intent,
            Intent {
                intent_name: "pizza_order".to_string(),
                description: Some(String::new()),
                created: Some("2017-01-01".to_string()),
                updated: Some("2017-01-01".to_string()),
                examples: None,
            }
        );

        let encoded = intent.encode().unwrap();
        assert_eq!(encoded.len(), 4);
        assert_eq!(
            Value::Object(encoded),
            json!({
                "intent": "pizza_order",
                "description": "",
                "created": "2017-01-01",
                "updated": "2017-01-01"
            })
        );
    }

    #[test]
    fn test_intent_ignores_unknown_keys() {
        let body = br#"{"intent": "greeting", "future_field": {"nested": true}, "rank": 3}"#;
        let intent: Intent = decode_slice(body).unwrap();
        assert_eq!(intent.intent_name, "greeting");
        assert_eq!(intent.description, None);
    }

    #[test]
    fn test_intent_round_trip_with_examples() {
        let intent = Intent {
            intent_name: "greeting".to_string(),
            description: None,
            created: None,
            updated: None,
            examples: Some(vec![Example::new("hi"), Example::new("hello")]),
        };
        let bytes = encode_to_vec(&intent).unwrap();
        assert_eq!(decode_slice::<Intent>(&bytes).unwrap(), intent);
    }

    #[test]
    fn test_intent_round_trip_all_optional_absent() {
        let intent = Intent {
            intent_name: "bare".to_string(),
            description: None,
            created: None,
            updated: None,
            examples: None,
        };
        let encoded = intent.encode().unwrap();
        assert_eq!(Value::Object(encoded.clone()), json!({"intent": "bare"}));
        let bytes = serde_json::to_vec(&encoded).unwrap();
        assert_eq!(decode_slice::<Intent>(&bytes).unwrap(), intent);
    }

    #[test]
    fn test_create_intent_builder() {
        let create = CreateIntent::new("greeting")
            .with_description("Say hello")
            .with_examples(["hi", "hello"]);
        assert_eq!(
            Value::Object(create.encode().unwrap()),
            json!({
                "intent": "greeting",
                "description": "Say hello",
                "examples": [{"text": "hi"}, {"text": "hello"}]
            })
        );
    }

    #[test]
    fn test_update_intent_uses_wire_keys() {
        let update = UpdateIntent {
            new_intent: Some("salutation".to_string()),
            ..Default::default()
        };
        assert_eq!(
            Value::Object(update.encode().unwrap()),
            json!({"intent": "salutation"})
        );
    }

    #[test]
    fn test_create_intent_round_trip() {
        let bare = CreateIntent::new("greeting");
        assert_eq!(round_trip(&bare), bare);

        let full = CreateIntent::new("greeting")
            .with_description("Say hello")
            .with_examples(["hi", "hello"]);
        assert_eq!(round_trip(&full), full);
    }
}
