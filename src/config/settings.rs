//! Settings structures for google-image-bot configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Default Google Custom Search endpoint
pub const DEFAULT_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Default custom search engine ID
pub const DEFAULT_CX: &str = "003141582324323361145:f5zyrk9_8_m";

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub google: GoogleSettings,
    pub matrix: MatrixSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Merge with environment variables (GOOGLE_BOT_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary variable source
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("GOOGLE_BOT_API_KEY") {
            self.google.api_key = val;
        }
        if let Some(val) = lookup("GOOGLE_BOT_CX") {
            self.google.cx = val;
        }
        if let Some(val) = lookup("GOOGLE_BOT_HOMESERVER_URL") {
            self.matrix.homeserver_url = val;
        }
        if let Some(val) = lookup("GOOGLE_BOT_ACCESS_TOKEN") {
            self.matrix.access_token = val;
        }
        if let Some(val) = lookup("GOOGLE_BOT_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("GOOGLE_BOT_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
    }

    /// Check that every required field is present and well formed.
    ///
    /// There is no built-in API key: a deployment without one fails here,
    /// at start-up, rather than on the first command.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.google.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("google.api_key"));
        }
        if self.google.cx.trim().is_empty() {
            return Err(ConfigError::Missing("google.cx"));
        }
        Url::parse(&self.google.base_url).map_err(|e| ConfigError::Invalid {
            field: "google.base_url",
            reason: e.to_string(),
        })?;
        Url::parse(&self.matrix.homeserver_url).map_err(|e| ConfigError::Invalid {
            field: "matrix.homeserver_url",
            reason: e.to_string(),
        })?;
        if self.matrix.access_token.is_empty() {
            return Err(ConfigError::Missing("matrix.access_token"));
        }
        if self.server.command_prefix.is_empty() {
            return Err(ConfigError::Missing("server.command_prefix"));
        }
        for (field, value) in [
            ("outgoing.search_timeout", self.outgoing.search_timeout),
            ("outgoing.upload_timeout", self.outgoing.upload_timeout),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a positive number of seconds, got {}", value),
                });
            }
        }
        Ok(())
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Prefix that marks a message body as a command
    pub command_prefix: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 4050,
            bind_address: "127.0.0.1".to_string(),
            command_prefix: "!".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Timeout for the image search request, in seconds
    pub search_timeout: f64,
    /// Timeout for fetching and re-uploading an image, in seconds
    pub upload_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            search_timeout: crate::DEFAULT_SEARCH_TIMEOUT,
            upload_timeout: crate::DEFAULT_UPLOAD_TIMEOUT,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Google Custom Search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleSettings {
    /// API key sent with every search request
    pub api_key: String,
    /// Custom search engine ID
    pub cx: String,
    /// Search endpoint
    pub base_url: String,
    /// Image size class
    pub img_size: String,
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            cx: DEFAULT_CX.to_string(),
            base_url: DEFAULT_SEARCH_URL.to_string(),
            img_size: "medium".to_string(),
        }
    }
}

/// Homeserver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixSettings {
    /// Base URL of the homeserver, e.g. https://matrix.example.org
    pub homeserver_url: String,
    /// Access token of the bot user
    pub access_token: String,
    /// Send command results to the originating room
    pub deliver_messages: bool,
}

impl Default for MatrixSettings {
    fn default() -> Self {
        Self {
            homeserver_url: "http://localhost:8008".to_string(),
            access_token: String::new(),
            deliver_messages: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn valid() -> Settings {
        let mut settings = Settings::default();
        settings.google.api_key = "key".to_string();
        settings.matrix.access_token = "token".to_string();
        settings
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 4050);
        assert_eq!(settings.google.cx, DEFAULT_CX);
        assert_eq!(settings.google.img_size, "medium");
        assert!(settings.google.api_key.is_empty());
    }

    #[test]
    fn test_missing_api_key_fails() {
        let mut settings = valid();
        settings.google.api_key = String::new();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Missing("google.api_key"))
        ));
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_bad_timeout_rejected() {
        let mut settings = valid();
        settings.outgoing.upload_timeout = 0.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid {
                field: "outgoing.upload_timeout",
                ..
            })
        ));
    }

    #[test]
    fn test_from_yaml_partial() {
        let yaml = "google:\n  api_key: abc\nmatrix:\n  homeserver_url: https://hs.example\n";
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.google.api_key, "abc");
        assert_eq!(settings.google.base_url, DEFAULT_SEARCH_URL);
        assert_eq!(settings.matrix.homeserver_url, "https://hs.example");
        assert!(settings.matrix.deliver_messages);
    }

    #[test]
    fn test_merge_vars() {
        let vars: HashMap<&str, &str> = [
            ("GOOGLE_BOT_API_KEY", "from-env"),
            ("GOOGLE_BOT_PORT", "9000"),
            ("GOOGLE_BOT_BIND_ADDRESS", "0.0.0.0"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.merge_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(settings.google.api_key, "from-env");
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.bind_address, "0.0.0.0");
    }
}
