pub mod config;
pub mod error;
pub mod logging;
pub mod transcript;

pub use config::{
    Config, ConfigError, DEFAULT_ERROR_TEXT, DEFAULT_PLACEHOLDER_TEXT, FileLoggingConfig, PrivacyConfig,
    ServiceConfig, WidgetConfig,
};
pub use error::{Error, Result, TranscriptError};
pub use transcript::{Entry, EntryIndex, Speaker, Transcript};
