//! Network transport
//!
//! The [`Transport`] trait is the single seam between the dispatcher and the
//! network. [`ReqwestTransport`] is the production implementation; tests can
//! substitute [`MockTransport`](crate::testing::MockTransport).

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use tracing::trace;

use crate::error::TransportError;
use crate::request::{Method, RequestDescriptor};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A completed HTTP exchange, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Response headers; keys are lowercase
    pub headers: BTreeMap<String, String>,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body bytes, or `None` for an empty body
    pub fn body_opt(&self) -> Option<&[u8]> {
        if self.body.is_empty() {
            None
        } else {
            Some(&self.body)
        }
    }
}

/// Performs a request and returns the raw response
///
/// A transport never treats an HTTP status as a failure; it only fails when
/// no response was obtained.
#[async_trait]
pub trait Transport: std::fmt::Debug + Send + Sync {
    async fn perform(&self, request: &RequestDescriptor) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeouts(DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    pub fn with_timeouts(timeout: Duration, connect_timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Reuse an existing client and its connection pool
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
            Method::Head => reqwest::Method::HEAD,
        }
    }

    fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, TransportError> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::InvalidHeader(format!("{}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| TransportError::InvalidHeader(format!("{}: {}", name, e)))?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn perform(&self, request: &RequestDescriptor) -> Result<RawResponse, TransportError> {
        let url = request.full_url();
        let headers = Self::header_map(&request.authorized_headers())?;
        trace!(method = %request.method(), %url, "performing request");

        let mut builder = self
            .client
            .request(Self::method(request.method()), url)
            .headers(headers);
        if let Some(body) = request.body() {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.bytes().await?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_status() {
        assert!(RawResponse::new(204, Bytes::new()).is_success());
        assert!(!RawResponse::new(301, Bytes::new()).is_success());
        assert!(!RawResponse::new(404, Bytes::new()).is_success());
    }

    #[test]
    fn test_empty_body_is_absent() {
        assert_eq!(RawResponse::new(500, Bytes::new()).body_opt(), None);
        assert_eq!(
            RawResponse::new(500, "oops").body_opt(),
            Some(b"oops".as_slice())
        );
    }

    #[test]
    fn test_invalid_header_rejected() {
        let mut headers = BTreeMap::new();
        headers.insert("x-bad".to_string(), "line\nbreak".to_string());
        let err = ReqwestTransport::header_map(&headers).unwrap_err();
        assert!(matches!(err, TransportError::InvalidHeader(_)));
    }
}
