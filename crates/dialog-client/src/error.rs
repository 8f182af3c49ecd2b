//! Error types for dialog client operations

use std::fmt;

use dialog_core::{DecodeError, EncodeError};
use thiserror::Error;

/// Result type alias for dialog client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Failure reported by the service itself (status outside 200..300)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct DomainError {
    pub status: u16,
    /// Value of the `error` field of the response body, if any
    pub message: Option<String>,
    /// Value of the `code` field of the response body, if any
    pub code: Option<i64>,
}

impl DomainError {
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self {
            status,
            message,
            code: None,
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "service error {}: {}", self.status, message),
            None => write!(f, "service error {}", self.status),
        }
    }
}

/// Errors raised by the network layer
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response that the error mapper could not interpret
    #[error("unacceptable HTTP status {status}")]
    UnacceptableStatus { status: u16 },

    /// A header name or value could not be put on the wire
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// Connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
}

/// Errors that can occur during dialog client operations
///
/// Every operation resolves to exactly one success value or one of these.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The outgoing payload could not be serialized; nothing was sent
    #[error("failed to encode request: {0}")]
    RequestEncodeFailed(#[from] EncodeError),

    /// The service answered 2xx but the body did not match the expected shape
    #[error("failed to decode response: {0}")]
    ResponseDecodeFailed(#[from] DecodeError),

    /// The service reported a failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The request did not complete at the network level
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid client configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(TransportError::Http(err))
    }
}

impl ClientError {
    /// HTTP status carried by the error, if the service responded
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Domain(err) => Some(err.status),
            ClientError::Transport(TransportError::UnacceptableStatus { status }) => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
