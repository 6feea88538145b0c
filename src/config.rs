//! Client endpoint configuration
//!
//! A [`ClientConfig`] names the RESTCONF server and the credentials used to
//! talk to it. It is validated once when the client is built and never
//! changes afterwards.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use url::Url;

use crate::error::{RestconfError, Result};

/// URL scheme used to reach the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Endpoint and credentials for a RESTCONF server
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub scheme: Scheme,
    pub username: String,
    pub password: String,
    /// RESTCONF API root (e.g. "restconf")
    #[serde(default = "default_root")]
    pub root: String,
    #[serde(
        rename = "timeout_secs",
        default = "default_timeout",
        deserialize_with = "deserialize_secs"
    )]
    pub timeout: Duration,
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
}

impl ClientConfig {
    /// Create a config with default port, scheme, root and timeout
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            scheme: Scheme::default(),
            username: username.into(),
            password: password.into(),
            root: default_root(),
            timeout: default_timeout(),
            verify_ssl: default_verify_ssl(),
        }
    }

    /// Load a config from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a config from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = verify_ssl;
        self
    }

    /// Check host, credentials and limits
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(config_error("host must not be empty"));
        }
        if self
            .host
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '@'))
        {
            return Err(config_error(format!("invalid host: {:?}", self.host)));
        }
        if self.username.is_empty() {
            return Err(config_error("username must not be empty"));
        }
        // Basic auth cannot carry a colon in the user id
        if self.username.contains(':') || self.username.chars().any(char::is_control) {
            return Err(config_error("username contains invalid characters"));
        }
        if self.password.chars().any(char::is_control) {
            return Err(config_error("password contains control characters"));
        }
        if self.port == 0 {
            return Err(config_error("port must not be 0"));
        }
        if self.timeout.is_zero() {
            return Err(config_error("timeout must be greater than zero"));
        }
        self.base_url().map(|_| ())
    }

    /// Server base URL, e.g. `http://nso.example.com:8080/`
    pub fn base_url(&self) -> Result<Url> {
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        let raw = format!("{}://{}:{}/", self.scheme, host, self.port);
        Url::parse(&raw).map_err(|e| config_error(format!("invalid base URL {raw}: {e}")))
    }

    /// RESTCONF root without surrounding slashes
    pub fn root_path(&self) -> &str {
        self.root.trim_matches('/')
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("scheme", &self.scheme)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("root", &self.root)
            .field("timeout", &self.timeout)
            .field("verify_ssl", &self.verify_ssl)
            .finish()
    }
}

fn config_error(message: impl Into<String>) -> RestconfError {
    RestconfError::Configuration(message.into())
}

fn default_port() -> u16 {
    8080
}

fn default_root() -> String {
    "restconf".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_verify_ssl() -> bool {
    true
}

fn deserialize_secs<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = u64::deserialize(deserializer)?;
    Ok(Duration::from_secs(secs))
}
