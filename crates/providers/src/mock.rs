use crate::AnswerService;
use crate::types::AnswerRequestFailed;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Scripted response for deterministic testing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MockResponse {
    /// Successful answer, optionally after a delay
    Answer {
        text: String,
        #[serde(default)]
        delay_ms: u64,
    },
    /// Failed round trip
    Failure { message: String },
}

impl MockResponse {
    pub fn answer(text: impl Into<String>) -> Self {
        MockResponse::Answer { text: text.into(), delay_ms: 0 }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        MockResponse::Failure { message: message.into() }
    }
}

/// Mock configuration from TOML file
#[derive(Debug, Deserialize)]
struct MockConfig {
    responses: Vec<MockResponse>,
}

/// Answer service that replays scripted responses without network access
pub struct MockAnswerService {
    responses: Vec<MockResponse>,
    current: AtomicUsize,
    received: Mutex<Vec<String>>,
}

impl MockAnswerService {
    pub fn new(responses_file: Option<&Path>) -> Self {
        let responses = if let Some(path) = responses_file {
            Self::load_responses(path)
        } else {
            vec![MockResponse::answer("Mock answer - configure responses_file in chatbox.toml")]
        };

        Self::with_responses(responses)
    }

    pub fn with_responses(responses: Vec<MockResponse>) -> Self {
        Self { responses, current: AtomicUsize::new(0), received: Mutex::new(Vec::new()) }
    }

    fn load_responses(path: &Path) -> Vec<MockResponse> {
        if !path.exists() {
            tracing::warn!("Mock responses file not found: {}", path.display());
            return vec![MockResponse::failure(format!(
                "Mock responses file not found: {}",
                path.display()
            ))];
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<MockConfig>(&content) {
                Ok(config) => config.responses,
                Err(e) => {
                    tracing::error!("Failed to parse mock responses: {}", e);
                    vec![MockResponse::failure(format!("Failed to parse mock responses: {}", e))]
                }
            },
            Err(e) => {
                tracing::error!("Failed to read mock responses file: {}", e);
                vec![MockResponse::failure(format!("Failed to read mock responses file: {}", e))]
            }
        }
    }

    fn next_response(&self) -> MockResponse {
        let index = self.current.fetch_add(1, Ordering::SeqCst);
        match self.responses.get(index) {
            Some(response) => response.clone(),
            None => MockResponse::answer(format!(
                "No more mock responses configured (requested: {}, available: {})",
                index + 1,
                self.responses.len()
            )),
        }
    }

    /// Messages received so far, in call order
    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of requests issued against this service
    pub fn request_count(&self) -> usize {
        self.received.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait::async_trait]
impl AnswerService for MockAnswerService {
    async fn ask(&self, message: &str) -> Result<String, AnswerRequestFailed> {
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());

        match self.next_response() {
            MockResponse::Answer { text, delay_ms } => {
                if delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                Ok(text)
            }
            MockResponse::Failure { message } => Err(AnswerRequestFailed::new(message)),
        }
    }
}
