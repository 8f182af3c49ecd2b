//! Mapping of HTTP responses to service errors

use serde_json::Value;
use tracing::warn;

use crate::error::DomainError;

/// Inspects a response and decides whether it is a service failure
///
/// Runs before any decoding. Returning `None` for a non-2xx status means
/// the mapper could not interpret the body; the dispatcher then reports
/// the status at the transport level instead.
pub trait ErrorMapper: std::fmt::Debug + Send + Sync {
    fn map_error(&self, status: u16, body: Option<&[u8]>) -> Option<DomainError>;
}

/// Error mapper for the dialog service's `{"error": "...", "code": n}` bodies
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceErrorMapper;

impl ErrorMapper for ServiceErrorMapper {
    fn map_error(&self, status: u16, body: Option<&[u8]>) -> Option<DomainError> {
        if (200..300).contains(&status) {
            return None;
        }

        let Some(body) = body.filter(|b| !b.is_empty()) else {
            return Some(DomainError::new(status, None));
        };

        let json: Value = match serde_json::from_slice(body) {
            Ok(json) => json,
            Err(e) => {
                warn!(status, error = %e, "error response body is not JSON");
                return None;
            }
        };

        Some(DomainError {
            status,
            message: json.get("error").and_then(Value::as_str).map(str::to_string),
            code: json.get("code").and_then(Value::as_i64),
        })
    }
}
