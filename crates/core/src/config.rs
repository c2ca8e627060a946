use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Default text shown while an answer is outstanding
pub const DEFAULT_PLACEHOLDER_TEXT: &str = "…";

/// Default text an unanswered placeholder is replaced with on failure
pub const DEFAULT_ERROR_TEXT: &str = "Error...";

/// Answer service selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ServiceConfig {
    /// Remote endpoint accepting `{"message"}` and returning `{"answer"}`
    Http {
        /// Full URL of the answer endpoint
        endpoint: String,
        /// Per-request timeout enforced by the HTTP client
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    /// Scripted answers for offline use and testing
    Mock {
        /// TOML file with `[[responses]]` entries
        #[serde(default)]
        responses_file: Option<PathBuf>,
    },
}

impl ServiceConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceConfig::Http { .. } => "http",
            ServiceConfig::Mock { .. } => "mock",
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig::Http { endpoint: default_endpoint(), timeout_secs: default_timeout_secs() }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:5001/predict".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Widget texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetConfig {
    /// Name shown in the widget header
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,

    /// Text of the seeded assistant entry
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,

    /// Sentinel shown while an answer is outstanding
    #[serde(default = "default_placeholder_text")]
    pub placeholder_text: String,

    /// Sentinel shown when the answer request fails
    #[serde(default = "default_error_text")]
    pub error_text: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            assistant_name: default_assistant_name(),
            welcome_message: default_welcome_message(),
            placeholder_text: default_placeholder_text(),
            error_text: default_error_text(),
        }
    }
}

fn default_assistant_name() -> String {
    "Assistant".to_string()
}

fn default_welcome_message() -> String {
    "Hi! Ask me anything and I'll search the site for an answer.".to_string()
}

fn default_placeholder_text() -> String {
    DEFAULT_PLACEHOLDER_TEXT.to_string()
}

fn default_error_text() -> String {
    DEFAULT_ERROR_TEXT.to_string()
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive for stderr output
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: pretty, json, compact
    #[serde(default = "default_log_format")]
    pub format: String,

    #[serde(default)]
    pub file: FileLoggingConfig,

    #[serde(default)]
    pub privacy: PrivacyConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: FileLoggingConfig::default(),
            privacy: PrivacyConfig::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

/// `[logging.file]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileLoggingConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Log directory (default: `~/.chatbox/logs`)
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

/// `[logging.privacy]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrivacyConfig {
    /// Include user messages and answers in logs
    #[serde(default)]
    pub log_message_text: bool,

    /// Maximum logged characters per message
    #[serde(default = "default_truncate_length")]
    pub truncate_length: usize,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self { log_message_text: false, truncate_length: default_truncate_length() }
    }
}

fn default_truncate_length() -> usize {
    200
}

/// Root configuration structure for chatbox.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub widget: WidgetConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)
            .map_err(|e| crate::Error::Config(ConfigError::from(e).to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), service = config.service.kind(), "loaded config");
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        use crate::Error;

        if let ServiceConfig::Http { endpoint, timeout_secs } = &self.service {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(Error::Config(ConfigError::InvalidEndpoint(endpoint.clone()).to_string()));
            }
            if *timeout_secs == 0 {
                return Err(Error::Config(ConfigError::ZeroTimeout.to_string()));
            }
        }

        if self.widget.placeholder_text.trim().is_empty() {
            return Err(Error::Config(
                ConfigError::EmptyText("placeholder_text".to_string()).to_string(),
            ));
        }

        if self.widget.error_text.trim().is_empty() {
            return Err(Error::Config(ConfigError::EmptyText("error_text".to_string()).to_string()));
        }

        Ok(())
    }

    /// Get example configuration (as a string)
    pub fn example() -> &'static str {
        r#"# Chatbox Configuration Example

[service]
# Answer service type: "http" or "mock"
kind = "http"
# Endpoint receiving {"message": "..."} and answering {"answer": "..."}
endpoint = "http://127.0.0.1:5001/predict"
# Request timeout in seconds
timeout_secs = 30

# For offline use:
# kind = "mock"
# responses_file = "mock_responses.toml"

[widget]
assistant_name = "Assistant"
welcome_message = "Hi! Ask me anything and I'll search the site for an answer."
# Shown while an answer is outstanding
placeholder_text = "…"
# Shown when the answer request fails
error_text = "Error..."

[logging]
level = "warn"
# "pretty", "json" or "compact"
format = "pretty"

[logging.file]
enabled = false
# directory = "/tmp/chatbox-logs"

[logging.privacy]
log_message_text = false
truncate_length = 200
"#
    }
}

/// Configuration-specific errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Endpoint is not an http(s) URL
    #[error("invalid endpoint (expected http:// or https://): {0}")]
    InvalidEndpoint(String),

    /// Request timeout of zero seconds
    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,

    /// A required widget text is blank
    #[error("{0} must not be empty")]
    EmptyText(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlParse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::TomlParse(err.to_string())
    }
}
