//! Configuration file handling for dialog-cli

use anyhow::{Context, Result};
use dialog_client::ClientConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const DEFAULT_URL: &str = "http://localhost:8080";
const DEFAULT_VERSION: &str = "2017-05-26";

/// Configuration for the CLI tool
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default service URL
    pub url: Option<String>,
    /// Default API version date
    pub version: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub bearer_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Headers sent with every request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Default output format
    pub output: Option<String>,
    /// Disable colored output
    pub no_color: Option<bool>,
}

/// Connection settings given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides<'a> {
    pub url: Option<&'a str>,
    pub version: Option<&'a str>,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
    pub bearer_token: Option<&'a str>,
}

impl Config {
    /// Load configuration from the default config file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("dialog-cli");

        Ok(config_dir.join("config.toml"))
    }

    /// Merge CLI arguments over config file values
    ///
    /// Credentials given on the command line replace every credential in the
    /// file, so a file password never pairs with a flag username.
    pub fn merge_with_args(
        &self,
        overrides: &Overrides<'_>,
        output: Option<&str>,
        no_color: bool,
    ) -> MergedConfig {
        let mut client = ClientConfig::new(
            overrides
                .url
                .map(String::from)
                .or_else(|| self.url.clone())
                .unwrap_or_else(|| DEFAULT_URL.to_string()),
            overrides
                .version
                .map(String::from)
                .or_else(|| self.version.clone())
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        );

        let flag_credentials = overrides.username.is_some()
            || overrides.password.is_some()
            || overrides.bearer_token.is_some();
        if flag_credentials {
            client.username = overrides.username.map(String::from);
            client.password = overrides.password.map(String::from);
            client.bearer_token = overrides.bearer_token.map(String::from);
        } else {
            client.username = self.username.clone();
            client.password = self.password.clone();
            client.bearer_token = self.bearer_token.clone();
        }
        if let Some(timeout) = self.timeout_secs {
            client.timeout_secs = timeout;
        }
        client.headers = self.headers.clone();

        MergedConfig {
            client,
            output: output
                .map(String::from)
                .or_else(|| self.output.clone())
                .unwrap_or_else(|| "table".to_string()),
            no_color: no_color || self.no_color.unwrap_or(false),
        }
    }
}

/// Fully resolved configuration after merging CLI args
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub client: ClientConfig,
    pub output: String,
    pub no_color: bool,
}
