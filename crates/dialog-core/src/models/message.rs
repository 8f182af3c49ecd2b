//! Message exchange models
//!
//! `Context`, `OutputData` and `MessageResponse` are pass-through types: the
//! server may attach arbitrary keys to them, and those keys must reach the
//! next request untouched. They expose typed accessors for the well-known
//! fields but encode exactly the mapping they were decoded from.

use serde_json::Value;

use crate::codec::{Decodable, Encodable, JsonObject, ObjectEncoder};
use crate::error::{DecodeResult, EncodeResult};
use crate::value::DynamicValue;

/// The user's input
#[derive(Debug, Clone, PartialEq)]
pub struct InputData {
    pub text: String,
}

impl InputData {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Decodable for InputData {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            text: json.get_string("text")?,
        })
    }
}

impl Encodable for InputData {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("text", self.text.clone());
        Ok(enc.finish())
    }
}

/// Conversation state carried between turns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    json: JsonObject,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_object(json: JsonObject) -> Self {
        Self { json }
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.json.get("conversation_id").and_then(Value::as_str)
    }

    /// Service-private state; must be sent back unchanged
    pub fn system(&self) -> Option<&JsonObject> {
        self.json.get("system").and_then(Value::as_object)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.json.get(key)
    }

    /// Set an application variable, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.json.insert(key.into(), value.into())
    }

    pub fn as_object(&self) -> &JsonObject {
        &self.json
    }
}

impl Decodable for Context {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            json: json.get_dictionary_object()?,
        })
    }
}

impl Encodable for Context {
    fn encode(&self) -> EncodeResult<JsonObject> {
        Ok(self.json.clone())
    }
}

/// An intent recognized in the user input
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeIntent {
    pub intent: String,
    pub confidence: f64,
}

impl Decodable for RuntimeIntent {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            intent: json.get_string("intent")?,
            confidence: json.get_f64("confidence")?,
        })
    }
}

impl Encodable for RuntimeIntent {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("intent", self.intent.clone())
            .insert_f64("confidence", self.confidence)?;
        Ok(enc.finish())
    }
}

/// An entity value recognized in the user input
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeEntity {
    pub entity: String,
    /// Zero-based character offsets `[start, end)` in the input text
    pub location: Vec<i64>,
    pub value: String,
    pub confidence: Option<f64>,
    pub metadata: Option<Value>,
}

impl Decodable for RuntimeEntity {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            entity: json.get_string("entity")?,
            location: json.get_i64_array("location")?,
            value: json.get_string("value")?,
            confidence: json.try_f64("confidence"),
            metadata: json.try_value("metadata"),
        })
    }
}

impl Encodable for RuntimeEntity {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("entity", self.entity.clone())
            .insert("location", self.location.clone())
            .insert("value", self.value.clone())
            .insert_opt_f64("confidence", self.confidence)?
            .insert_opt("metadata", self.metadata.clone());
        Ok(enc.finish())
    }
}

/// A log line emitted while processing a message
#[derive(Debug, Clone, PartialEq)]
pub struct LogMessage {
    /// `info`, `error` or `warn`
    pub level: String,
    pub msg: String,
}

impl Decodable for LogMessage {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            level: json.get_string("level")?,
            msg: json.get_string("msg")?,
        })
    }
}

impl Encodable for LogMessage {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("level", self.level.clone())
            .insert("msg", self.msg.clone());
        Ok(enc.finish())
    }
}

/// The dialog's output for one turn
#[derive(Debug, Clone, PartialEq)]
pub struct OutputData {
    pub log_messages: Vec<LogMessage>,
    pub text: Vec<String>,
    pub nodes_visited: Option<Vec<String>>,
    json: JsonObject,
}

impl OutputData {
    pub fn as_object(&self) -> &JsonObject {
        &self.json
    }
}

impl Decodable for OutputData {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            log_messages: json.decoded_array("log_messages")?,
            text: json.get_string_array("text")?,
            nodes_visited: json.try_string_array("nodes_visited")?,
            json: json.get_dictionary_object()?,
        })
    }
}

impl Encodable for OutputData {
    fn encode(&self) -> EncodeResult<JsonObject> {
        Ok(self.json.clone())
    }
}

/// Body of a `message` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageRequest {
    pub input: Option<InputData>,
    /// Ask for up to ten intents instead of only the best match
    pub alternate_intents: Option<bool>,
    pub context: Option<Context>,
    /// Entities to use instead of detecting them
    pub entities: Option<Vec<RuntimeEntity>>,
    /// Intents to use instead of classifying the input
    pub intents: Option<Vec<RuntimeIntent>>,
    pub output: Option<OutputData>,
}

impl MessageRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            input: Some(InputData::new(text)),
            ..Default::default()
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Continue the conversation a previous response belongs to
    pub fn reply(response: &MessageResponse, text: impl Into<String>) -> Self {
        Self::text(text).with_context(response.context.clone())
    }
}

impl Decodable for MessageRequest {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            input: json.try_decode("input")?,
            alternate_intents: json.try_bool("alternate_intents"),
            context: json.try_decode("context")?,
            entities: json.try_decoded_array("entities")?,
            intents: json.try_decoded_array("intents")?,
            output: json.try_decode("output")?,
        })
    }
}

impl Encodable for MessageRequest {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert_opt_model("input", self.input.as_ref())?
            .insert_opt("alternate_intents", self.alternate_intents)
            .insert_opt_model("context", self.context.as_ref())?
            .insert_opt_models("entities", self.entities.as_deref())?
            .insert_opt_models("intents", self.intents.as_deref())?
            .insert_opt_model("output", self.output.as_ref())?;
        Ok(enc.finish())
    }
}

/// Result of a `message` call
#[derive(Debug, Clone, PartialEq)]
pub struct MessageResponse {
    pub input: Option<InputData>,
    pub intents: Vec<RuntimeIntent>,
    pub entities: Vec<RuntimeEntity>,
    pub alternate_intents: Option<bool>,
    pub context: Context,
    pub output: OutputData,
    json: JsonObject,
}

impl MessageResponse {
    /// Highest-confidence intent, if any was recognized
    pub fn top_intent(&self) -> Option<&RuntimeIntent> {
        self.intents
            .iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    }

    pub fn as_object(&self) -> &JsonObject {
        &self.json
    }
}

impl Decodable for MessageResponse {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            input: json.try_decode("input")?,
            intents: json.decoded_array("intents")?,
            entities: json.decoded_array("entities")?,
            alternate_intents: json.try_bool("alternate_intents"),
            context: json.decode("context")?,
            output: json.decode("output")?,
            json: json.get_dictionary_object()?,
        })
    }
}

impl Encodable for MessageResponse {
    fn encode(&self) -> EncodeResult<JsonObject> {
        Ok(self.json.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_slice, round_trip};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const RESPONSE: &[u8] = br#"{
        "input": {"text": "I want a large pizza"},
        "intents": [
            {"intent": "order", "confidence": 0.93},
            {"intent": "cancel", "confidence": 0.02}
        ],
        "entities": [
            {"entity": "size", "location": [9, 14], "value": "large", "confidence": 1}
        ],
        "output": {
            "log_messages": [],
            "text": ["Which toppings?"],
            "nodes_visited": ["node_1"],
            "generic": [{"response_type": "text", "text": "Which toppings?"}]
        },
        "context": {
            "conversation_id": "c-1",
            "system": {"dialog_stack": [{"dialog_node": "node_1"}], "dialog_turn_counter": 1},
            "size": "large"
        },
        "actions": []
    }"#;

    #[test]
    fn test_response_decodes_typed_fields() {
        let response: MessageResponse = decode_slice(RESPONSE).unwrap();
        assert_eq!(response.top_intent().unwrap().intent, "order");
        assert_eq!(response.entities[0].location, vec![9, 14]);
        assert_eq!(response.entities[0].confidence, Some(1.0));
        assert_eq!(response.output.text, vec!["Which toppings?".to_string()]);
        assert_eq!(response.context.conversation_id(), Some("c-1"));
        assert_eq!(response.context.get("size"), Some(&json!("large")));
    }

    #[test]
    fn test_response_echoes_server_payload() {
        let response: MessageResponse = decode_slice(RESPONSE).unwrap();
        let original: Value = serde_json::from_slice(RESPONSE).unwrap();
        assert_eq!(Value::Object(response.encode().unwrap()), original);
    }

    #[test]
    fn test_reply_carries_context_verbatim() {
        let response: MessageResponse = decode_slice(RESPONSE).unwrap();
        let request = MessageRequest::reply(&response, "pepperoni");
        let encoded = Value::Object(request.encode().unwrap());
        assert_eq!(encoded["input"], json!({"text": "pepperoni"}));
        assert_eq!(
            encoded["context"]["system"]["dialog_turn_counter"],
            json!(1)
        );
        assert!(encoded.get("intents").is_none());
    }

    #[test]
    fn test_response_requires_output() {
        let body = br#"{"intents": [], "entities": [], "context": {}}"#;
        let err = decode_slice::<MessageResponse>(body).unwrap_err();
        assert_eq!(err.path(), Some("output"));
    }

    #[test]
    fn test_empty_request_encodes_empty_object() {
        assert!(MessageRequest::default().encode().unwrap().is_empty());
    }

    #[test]
    fn test_request_round_trip() {
        let mut context = Context::new();
        context.insert("conversation_id", "c-9");
        let request = MessageRequest {
            input: Some(InputData::new("hi")),
            alternate_intents: Some(true),
            context: Some(context),
            entities: None,
            intents: Some(vec![RuntimeIntent {
                intent: "greeting".to_string(),
                confidence: 1.0,
            }]),
            output: None,
        };
        let bytes = crate::codec::encode_to_vec(&request).unwrap();
        assert_eq!(decode_slice::<MessageRequest>(&bytes).unwrap(), request);
    }

    #[test]
    fn test_confidence_survives_round_trip() {
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };

        let mut confidences = vec![0.9856906946328695, 0.1 + 0.2, f64::MIN_POSITIVE, 5e-324, f64::MAX];
        for _ in 0..20_000 {
            confidences.push((next() >> 11) as f64 / (1u64 << 53) as f64);
            let wide = f64::from_bits(next());
            if wide.is_finite() {
                confidences.push(wide);
            }
        }

        for confidence in confidences {
            let intent = RuntimeIntent {
                intent: "order".to_string(),
                confidence,
            };
            assert_eq!(round_trip(&intent), intent, "confidence {confidence:e}");
        }
    }

    #[test]
    fn test_entity_metadata_keeps_any_json() {
        let body = br#"{"entity":"e","location":[0,1],"value":"v","metadata":["a",1]}"#;
        let entity: RuntimeEntity = decode_slice(body).unwrap();
        assert_eq!(entity.metadata, Some(json!(["a", 1])));

        let original: Value = serde_json::from_slice(body).unwrap();
        assert_eq!(Value::Object(entity.encode().unwrap()), original);
    }

    #[test]
    fn test_runtime_entity_round_trip() {
        let bare = RuntimeEntity {
            entity: "size".to_string(),
            location: vec![9, 14],
            value: "large".to_string(),
            confidence: None,
            metadata: None,
        };
        assert_eq!(round_trip(&bare), bare);

        let full = RuntimeEntity {
            confidence: Some(0.8713),
            metadata: Some(json!({"numeric_value": 14, "tags": ["x", null]})),
            ..bare
        };
        assert_eq!(round_trip(&full), full);
    }

    #[test]
    fn test_small_models_round_trip() {
        let input = InputData::new("hello");
        assert_eq!(round_trip(&input), input);

        let log = LogMessage {
            level: "warn".to_string(),
            msg: "No dialog node matched".to_string(),
        };
        assert_eq!(round_trip(&log), log);

        assert_eq!(round_trip(&Context::new()), Context::new());
    }

    #[test]
    fn test_response_round_trip() {
        let response: MessageResponse = decode_slice(RESPONSE).unwrap();
        assert_eq!(round_trip(&response), response);
        assert_eq!(round_trip(&response.output), response.output);
        assert_eq!(round_trip(&response.context), response.context);
    }

    #[test]
    fn test_request_round_trip_all_set() {
        let response: MessageResponse = decode_slice(RESPONSE).unwrap();
        let request = MessageRequest {
            input: Some(InputData::new("large")),
            alternate_intents: Some(false),
            context: Some(response.context.clone()),
            entities: Some(response.entities.clone()),
            intents: Some(response.intents.clone()),
            output: Some(response.output.clone()),
        };
        assert_eq!(round_trip(&request), request);
        assert_eq!(round_trip(&MessageRequest::default()), MessageRequest::default());
    }
}
