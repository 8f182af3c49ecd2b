//! Request descriptors
//!
//! A [`RequestDescriptor`] is the full, immutable description of one HTTP
//! call. It is built per call through [`RequestBuilder`] and handed to a
//! [`Transport`](crate::Transport) by the dispatcher.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use dialog_core::{encode_to_vec, Encodable, EncodeResult};
use url::Url;

use crate::auth::Credentials;

/// Content type of every JSON body
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to perform one HTTP call
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    url: Url,
    credentials: Option<Arc<dyn Credentials>>,
    headers: BTreeMap<String, String>,
    query: Vec<(String, String)>,
    content_type: Option<String>,
    body: Option<Bytes>,
}

impl RequestDescriptor {
    pub fn method(&self) -> Method {
        self.method
    }

    /// URL without the query list
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn credentials(&self) -> Option<&Arc<dyn Credentials>> {
        self.credentials.as_ref()
    }

    /// Explicit headers; keys are lowercase
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Query parameters in insertion order, duplicates included
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// URL with the query list appended
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        url
    }

    /// Headers as sent on the wire
    ///
    /// Credentials are applied first, then explicit headers, then the
    /// content type.
    pub fn authorized_headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        if let Some(credentials) = &self.credentials {
            credentials.authorize(&mut headers);
        }
        headers.extend(self.headers.clone());
        if let Some(content_type) = &self.content_type {
            headers.insert("content-type".to_string(), content_type.clone());
        }
        headers
    }
}

/// Builder for [`RequestDescriptor`]
#[derive(Debug)]
pub struct RequestBuilder {
    inner: RequestDescriptor,
}

impl RequestBuilder {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            inner: RequestDescriptor {
                method,
                url,
                credentials: None,
                headers: BTreeMap::new(),
                query: Vec::new(),
                content_type: None,
                body: None,
            },
        }
    }

    pub fn credentials(mut self, credentials: Option<Arc<dyn Credentials>>) -> Self {
        self.inner.credentials = credentials;
        self
    }

    /// Set a header; a later write to the same name wins
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.inner
            .headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self = self.header(name, value);
        }
        self
    }

    /// Append a query parameter; repeated names are all kept
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.inner.query.push((name.into(), value.to_string()));
        self
    }

    pub fn query_opt<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Attach a raw body with its content type
    pub fn body(mut self, content_type: impl Into<String>, body: impl Into<Bytes>) -> Self {
        self.inner.content_type = Some(content_type.into());
        self.inner.body = Some(body.into());
        self
    }

    /// Encode a model as the JSON body
    pub fn json_body<T: Encodable>(self, model: &T) -> EncodeResult<Self> {
        let bytes = encode_to_vec(model)?;
        Ok(self.body(APPLICATION_JSON, bytes))
    }

    pub fn build(self) -> RequestDescriptor {
        self.inner
    }
}

/// Pagination and sorting parameters shared by the list endpoints
///
/// Each parameter is sent only when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub page_limit: Option<u32>,
    pub include_count: Option<bool>,
    /// Attribute to sort by; prefix with `-` for descending order
    pub sort: Option<String>,
    pub cursor: Option<String>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = Some(page_limit);
        self
    }

    pub fn include_count(mut self, include_count: bool) -> Self {
        self.include_count = Some(include_count);
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub(crate) fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .query_opt("page_limit", self.page_limit)
            .query_opt("include_count", self.include_count)
            .query_opt("sort", self.sort.as_deref())
            .query_opt("cursor", self.cursor.as_deref())
    }
}

/// Query parameters of the log listing endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    /// Attribute to sort by, e.g. `-request_timestamp`
    pub sort: Option<String>,
    /// Search filter expression
    pub filter: Option<String>,
    pub page_limit: Option<u32>,
    pub cursor: Option<String>,
}

impl LogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = Some(page_limit);
        self
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub(crate) fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .query_opt("sort", self.sort.as_deref())
            .query_opt("filter", self.filter.as_deref())
            .query_opt("page_limit", self.page_limit)
            .query_opt("cursor", self.cursor.as_deref())
    }
}
