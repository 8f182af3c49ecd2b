//! Request credentials
//!
//! A [`Credentials`] value is created once per client and shared read-only
//! by every request it builds. New schemes implement the trait; the
//! dispatcher never inspects which scheme is in use.

use std::collections::BTreeMap;
use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Header key the credential schemes write to
pub const AUTHORIZATION: &str = "authorization";

/// Capability to authorize an outgoing request
pub trait Credentials: fmt::Debug + Send + Sync {
    /// Add this scheme's headers to an outgoing header map
    fn authorize(&self, headers: &mut BTreeMap<String, String>);
}

/// HTTP basic authentication
#[derive(Clone)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Value of the `Authorization` header, `Basic base64(user:password)`
    pub fn header_value(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", token)
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials for BasicAuth {
    fn authorize(&self, headers: &mut BTreeMap<String, String>) {
        headers.insert(AUTHORIZATION.to_string(), self.header_value());
    }
}

/// Bearer token authentication
#[derive(Clone)]
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Credentials for BearerToken {
    fn authorize(&self, headers: &mut BTreeMap<String, String>) {
        headers.insert(AUTHORIZATION.to_string(), format!("Bearer {}", self.token));
    }
}
