use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body posted to the answer endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRequest<'a> {
    pub message: &'a str,
}

/// Body returned by the answer endpoint on success
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
}

/// The single failure kind of an answer round trip.
///
/// Transport errors, non-success statuses and malformed bodies are all
/// reported through this type; `reason` only carries diagnostics for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("answer request failed: {reason}")]
pub struct AnswerRequestFailed {
    reason: String,
}

impl AnswerRequestFailed {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    /// The request never produced a response
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::new(format!("transport error: {}", err))
    }

    /// The service answered with a non-success status
    pub fn status(code: u16, body: &str) -> Self {
        if body.is_empty() {
            Self::new(format!("status {}", code))
        } else {
            Self::new(format!("status {}: {}", code, body))
        }
    }

    /// The response body was not `{"answer": <string>}`
    pub fn malformed(err: impl std::fmt::Display) -> Self {
        Self::new(format!("malformed response: {}", err))
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}
