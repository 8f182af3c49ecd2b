//! Conversation log models

use crate::codec::{Decodable, Encodable, JsonObject, ObjectEncoder};
use crate::error::{DecodeResult, EncodeResult};
use crate::models::{MessageRequest, MessageResponse};
use crate::value::DynamicValue;

/// One logged `message` exchange
#[derive(Debug, Clone, PartialEq)]
pub struct LogExport {
    pub request: MessageRequest,
    pub response: MessageResponse,
    pub log_id: String,
    pub request_timestamp: String,
    pub response_timestamp: String,
    pub workspace_id: String,
    pub language: String,
}

impl Decodable for LogExport {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            request: json.decode("request")?,
            response: json.decode("response")?,
            log_id: json.get_string("log_id")?,
            request_timestamp: json.get_string("request_timestamp")?,
            response_timestamp: json.get_string("response_timestamp")?,
            workspace_id: json.get_string("workspace_id")?,
            language: json.get_string("language")?,
        })
    }
}

impl Encodable for LogExport {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert_model("request", &self.request)?
            .insert_model("response", &self.response)?
            .insert("log_id", self.log_id.clone())
            .insert("request_timestamp", self.request_timestamp.clone())
            .insert("response_timestamp", self.response_timestamp.clone())
            .insert("workspace_id", self.workspace_id.clone())
            .insert("language", self.language.clone());
        Ok(enc.finish())
    }
}

/// Pagination block of log listings, which are cursor-only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogPagination {
    pub next_url: Option<String>,
    pub matched: Option<i64>,
    pub next_cursor: Option<String>,
}

impl Decodable for LogPagination {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            next_url: json.try_string("next_url"),
            matched: json.try_i64("matched"),
            next_cursor: json.try_string("next_cursor"),
        })
    }
}

impl Encodable for LogPagination {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert_opt("next_url", self.next_url.clone())
            .insert_opt("matched", self.matched)
            .insert_opt("next_cursor", self.next_cursor.clone());
        Ok(enc.finish())
    }
}

/// One page of logged exchanges
#[derive(Debug, Clone, PartialEq)]
pub struct LogCollection {
    pub logs: Vec<LogExport>,
    pub pagination: LogPagination,
}

impl Decodable for LogCollection {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            logs: json.decoded_array("logs")?,
            pagination: json.decode("pagination")?,
        })
    }
}

impl Encodable for LogCollection {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert_models("logs", &self.logs)?
            .insert_model("pagination", &self.pagination)?;
        Ok(enc.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_slice, round_trip};
    use crate::models::InputData;

    fn log_entry(log_id: &str, response: &str) -> String {
        format!(
            r#"{{
                "request": {{"input": {{"text": "hi"}}}},
                "response": {response},
                "log_id": "{log_id}",
                "request_timestamp": "2017-01-01T00:00:00Z",
                "response_timestamp": "2017-01-01T00:00:01Z",
                "workspace_id": "ws-1",
                "language": "en"
            }}"#
        )
    }

    const GOOD_RESPONSE: &str = r#"{
        "intents": [], "entities": [], "context": {"conversation_id": "c"},
        "output": {"log_messages": [], "text": ["Hello"]}
    }"#;

    #[test]
    fn test_log_collection() {
        let body = format!(
            r#"{{"logs": [{}], "pagination": {{"next_cursor": "n"}}}}"#,
            log_entry("l-1", GOOD_RESPONSE)
        );
        let page: LogCollection = decode_slice(body.as_bytes()).unwrap();
        assert_eq!(page.logs.len(), 1);
        assert_eq!(page.logs[0].response.output.text, vec!["Hello".to_string()]);
        assert_eq!(page.pagination.next_cursor.as_deref(), Some("n"));
    }

    #[test]
    fn test_bad_nested_response_fails_whole_page() {
        let bad = r#"{"intents": [], "entities": [], "context": {}, "output": {"text": []}}"#;
        let body = format!(
            r#"{{"logs": [{}, {}], "pagination": {{}}}}"#,
            log_entry("l-1", GOOD_RESPONSE),
            log_entry("l-2", bad)
        );
        let err = decode_slice::<LogCollection>(body.as_bytes()).unwrap_err();
        assert_eq!(err.path(), Some("logs[1].response.output.log_messages"));
    }

    #[test]
    fn test_log_export_round_trip() {
        let entry: LogExport = decode_slice(log_entry("l-1", GOOD_RESPONSE).as_bytes()).unwrap();
        assert_eq!(round_trip(&entry), entry);

        let full = LogExport {
            request: MessageRequest {
                input: Some(InputData::new("hi")),
                alternate_intents: Some(true),
                context: Some(entry.response.context.clone()),
                ..Default::default()
            },
            ..entry
        };
        assert_eq!(round_trip(&full), full);
    }

    #[test]
    fn test_log_pagination_round_trip() {
        let bare = LogPagination::default();
        assert!(bare.encode().unwrap().is_empty());
        assert_eq!(round_trip(&bare), bare);

        let full = LogPagination {
            next_url: Some("/v1/logs?cursor=n".to_string()),
            matched: Some(120),
            next_cursor: Some("n".to_string()),
        };
        assert_eq!(round_trip(&full), full);
    }

    #[test]
    fn test_log_collection_round_trip() {
        let body = format!(
            r#"{{"logs": [{}], "pagination": {{"matched": 1}}}}"#,
            log_entry("l-1", GOOD_RESPONSE)
        );
        let page: LogCollection = decode_slice(body.as_bytes()).unwrap();
        assert_eq!(round_trip(&page), page);
    }
}
