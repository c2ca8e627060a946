use thiserror::Error;

/// Result type alias for chatbox-core
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the chatbox widget
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error for file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transcript access errors
    #[error("transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Parse/serialization errors
    #[error("parse error: {0}")]
    Parse(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Errors raised by [`crate::Transcript`] operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    /// The index does not name an appended entry
    #[error("entry index {index} out of range (transcript has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// A completion named an entry that is not the outstanding placeholder
    #[error("no outstanding turn for entry {index}")]
    NoOutstandingTurn { index: usize },
}
