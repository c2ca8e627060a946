//! Logging setup built on the tracing ecosystem.
//!
//! # Environment Variables
//!
//! - `CHATBOX_LOG`: Filter directive (like `RUST_LOG`), e.g., `chatbox_ui=debug`
//! - `CHATBOX_LOG_FORMAT`: Output format for stderr: `pretty`, `json`, `compact`
//! - `CHATBOX_LOG_DIR`: Overrides the log file directory
//!
//! # Configuration
//!
//! Logging is configured via the `[logging]` section in `chatbox.toml`:
//!
//! ```toml
//! [logging]
//! level = "warn"
//! format = "pretty"
//!
//! [logging.file]
//! enabled = false
//!
//! [logging.privacy]
//! log_message_text = false
//! truncate_length = 200
//! ```
//!
//! # Example
//!
//! ```no_run
//! use chatbox_core::logging::{self, LoggingConfig};
//!
//! let _guard = logging::init_logging(Some(LoggingConfig::default()))?;
//! # Ok::<(), chatbox_core::Error>(())
//! ```

use crate::Error;
use crate::config::{FileLoggingConfig, LoggingConfig as ConfigLoggingConfig, PrivacyConfig};
use std::env;
use std::io;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format for stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Pretty, human-readable output with colors (default for TTY)
    #[default]
    Pretty,
    /// JSON output (one line per event)
    Json,
    /// Compact, single-line output
    Compact,
}

impl LogFormat {
    pub const VALUES: &[LogFormat] = &[LogFormat::Pretty, LogFormat::Json, LogFormat::Compact];

    /// Parse a log format from a string.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
            LogFormat::Compact => "compact",
        }
    }
}

/// Resolved logging settings handed to [`init_logging`].
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default log level when no environment filter is set.
    pub level: String,
    /// Output format for stderr.
    pub format: LogFormat,
    /// Whether to write to stderr at all (off while the terminal UI owns the screen).
    pub stderr: bool,
    /// File logging configuration (optional).
    pub file: Option<FileLoggingConfig>,
    /// Controls over message text in logs.
    pub privacy: PrivacyConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
            stderr: true,
            file: None,
            privacy: PrivacyConfig::default(),
        }
    }
}

impl From<ConfigLoggingConfig> for LoggingConfig {
    fn from(config: ConfigLoggingConfig) -> Self {
        let format = LogFormat::parse_str(&config.format).unwrap_or_default();

        Self {
            level: config.level,
            format,
            stderr: true,
            file: if config.file.enabled { Some(config.file) } else { None },
            privacy: config.privacy,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_stderr(mut self, enabled: bool) -> Self {
        self.stderr = enabled;
        self
    }

    pub fn with_privacy(mut self, config: PrivacyConfig) -> Self {
        self.privacy = config;
        self
    }

    /// Build an EnvFilter from this config and environment variables.
    fn build_env_filter(&self) -> EnvFilter {
        let filter = env::var("CHATBOX_LOG")
            .ok()
            .or_else(|| env::var("RUST_LOG").ok())
            .unwrap_or_else(|| self.level.clone());

        EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new(&self.level))
    }

    fn is_tty() -> bool {
        atty::is(atty::Stream::Stderr)
    }

    /// Determine the appropriate format for stderr output.
    fn detect_format(&self) -> LogFormat {
        if let Ok(fmt_str) = env::var("CHATBOX_LOG_FORMAT")
            && let Some(fmt) = LogFormat::parse_str(&fmt_str)
        {
            return fmt;
        }

        match self.format {
            LogFormat::Pretty if !Self::is_tty() => LogFormat::Compact,
            other => other,
        }
    }

    /// Get the log directory path.
    fn log_dir(file: &FileLoggingConfig) -> Result<PathBuf, Error> {
        if let Ok(custom_dir) = env::var("CHATBOX_LOG_DIR") {
            return Ok(PathBuf::from(custom_dir));
        }

        if let Some(dir) = &file.directory {
            return Ok(dir.clone());
        }

        let home = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .map_err(|_| Error::Config("Could not determine home directory".to_string()))?;

        Ok(PathBuf::from(home).join(".chatbox").join("logs"))
    }
}

/// Initialize the global tracing subscriber.
///
/// Sets up an environment-based filter (`CHATBOX_LOG`, then `RUST_LOG`, then the
/// configured level), an optional stderr layer and an optional daily-rolling JSON
/// file layer. When file logging is enabled the returned guard must be kept alive
/// for buffered lines to reach the file.
pub fn init_logging(config: Option<LoggingConfig>) -> Result<Option<WorkerGuard>, Error> {
    let config = config.unwrap_or_default();
    let env_filter = config.build_env_filter();
    let format = config.detect_format();

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    let mut guard = None;

    if config.stderr {
        let layer: Box<dyn Layer<Registry> + Send + Sync> = match format {
            LogFormat::Pretty => fmt::layer().pretty().with_writer(io::stderr).with_ansi(true).boxed(),
            LogFormat::Json => fmt::layer().json().with_writer(io::stderr).boxed(),
            LogFormat::Compact => fmt::layer().compact().with_writer(io::stderr).boxed(),
        };
        layers.push(layer);
    }

    if let Some(file_config) = &config.file {
        let log_dir = LoggingConfig::log_dir(file_config)?;
        std::fs::create_dir_all(&log_dir)
            .map_err(|e| Error::Config(format!("Failed to create log directory: {}", e)))?;

        let file_appender = tracing_appender::rolling::daily(log_dir, "chatbox.log");
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
        layers.push(fmt::layer().json().with_writer(non_blocking).boxed());
        guard = Some(worker_guard);
    }

    Registry::default()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(guard)
}

/// Prepare message text for a log line according to privacy settings.
pub fn redact_message(content: &str, privacy: &PrivacyConfig) -> String {
    if !privacy.log_message_text {
        return format!("[{} chars]", content.chars().count());
    }

    let total = content.chars().count();
    if total <= privacy.truncate_length {
        return content.to_string();
    }

    let mut truncated = content.chars().take(privacy.truncate_length).collect::<String>();
    truncated.push_str("...");
    truncated.push_str(&format!(" ({} total chars)", total));
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!(LogFormat::parse_str("pretty"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse_str("PRETTY"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse_str("json"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse_str("Compact"), Some(LogFormat::Compact));
        assert_eq!(LogFormat::parse_str("invalid"), None);
    }

    #[test]
    fn test_log_format_as_str() {
        for format in LogFormat::VALUES {
            assert_eq!(LogFormat::parse_str(format.as_str()), Some(*format));
        }
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.stderr);
        assert!(config.file.is_none());
        assert!(!config.privacy.log_message_text);
    }

    #[test]
    fn test_logging_config_builder() {
        let config = LoggingConfig::new()
            .with_level("debug")
            .with_format(LogFormat::Json)
            .with_stderr(false)
            .with_privacy(PrivacyConfig { log_message_text: true, truncate_length: 10 });

        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.stderr);
        assert!(config.privacy.log_message_text);
        assert_eq!(config.privacy.truncate_length, 10);
    }

    #[test]
    fn test_logging_config_from_config_section() {
        let section = ConfigLoggingConfig {
            level: "info".to_string(),
            format: "compact".to_string(),
            file: FileLoggingConfig { enabled: true, directory: Some(PathBuf::from("/tmp/logs")) },
            privacy: PrivacyConfig::default(),
        };

        let config = LoggingConfig::from(section);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.file.unwrap().directory, Some(PathBuf::from("/tmp/logs")));
    }

    #[test]
    fn test_logging_config_from_disabled_file_section() {
        let section = ConfigLoggingConfig { format: "bogus".to_string(), ..ConfigLoggingConfig::default() };

        let config = LoggingConfig::from(section);
        assert!(config.file.is_none());
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_redact_message_hidden_by_default() {
        let privacy = PrivacyConfig::default();
        assert_eq!(redact_message("secret question", &privacy), "[15 chars]");
    }

    #[test]
    fn test_redact_message_short_text() {
        let privacy = PrivacyConfig { log_message_text: true, truncate_length: 100 };
        assert_eq!(redact_message("hello", &privacy), "hello");
    }

    #[test]
    fn test_redact_message_truncates() {
        let privacy = PrivacyConfig { log_message_text: true, truncate_length: 10 };
        let redacted = redact_message("abcdefghijklmnopqrstuvwxyz", &privacy);
        assert!(redacted.starts_with("abcdefghij..."));
        assert!(redacted.contains("26 total chars"));
    }

    #[test]
    fn test_log_dir_prefers_configured_directory() {
        if env::var("CHATBOX_LOG_DIR").is_ok() {
            return;
        }
        let file = FileLoggingConfig { enabled: true, directory: Some(PathBuf::from("/var/tmp/chatbox")) };
        assert_eq!(LoggingConfig::log_dir(&file).unwrap(), PathBuf::from("/var/tmp/chatbox"));
    }
}
