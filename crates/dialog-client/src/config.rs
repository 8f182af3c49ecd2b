//! Client configuration
//!
//! ```toml
//! url = "https://dialog.example.com/api"
//! version = "2017-05-26"
//! username = "apikey"
//! password = "..."
//! timeout_secs = 30
//!
//! [headers]
//! x-learning-opt-out = "true"
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::auth::{BasicAuth, BearerToken, Credentials};
use crate::error::{ClientError, Result};

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Settings needed to build a [`DialogClient`](crate::DialogClient)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service URL
    pub url: String,
    /// API version date
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Headers sent with every request
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            version: version.into(),
            username: None,
            password: None,
            bearer_token: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            headers: BTreeMap::new(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Credentials described by this configuration
    ///
    /// A username needs a password, and basic auth and a bearer token are
    /// mutually exclusive.
    pub fn credentials(&self) -> Result<Option<Arc<dyn Credentials>>> {
        match (&self.username, &self.password, &self.bearer_token) {
            (None, None, None) => Ok(None),
            (Some(username), Some(password), None) => {
                Ok(Some(Arc::new(BasicAuth::new(username, password))))
            }
            (None, None, Some(token)) => Ok(Some(Arc::new(BearerToken::new(token)))),
            (_, _, Some(_)) => Err(ClientError::Config(
                "bearer_token cannot be combined with username/password".to_string(),
            )),
            _ => Err(ClientError::Config(
                "username and password must be set together".to_string(),
            )),
        }
    }
}
