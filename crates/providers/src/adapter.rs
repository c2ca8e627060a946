use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::Duration;

use crate::mock::MockAnswerService;
use crate::types::*;
use chatbox_core::{Error, Result, ServiceConfig};

/// Remote service mapping a question to an answer
#[async_trait::async_trait]
pub trait AnswerService: Send + Sync {
    /// Ask one question. Every failure mode collapses into [`AnswerRequestFailed`].
    async fn ask(&self, message: &str) -> std::result::Result<String, AnswerRequestFailed>;
}

/// JSON-over-HTTP answer service
pub struct HttpAnswerService {
    client: HttpClient,
    endpoint: String,
}

impl HttpAnswerService {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint: endpoint.into() })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl AnswerService for HttpAnswerService {
    async fn ask(&self, message: &str) -> std::result::Result<String, AnswerRequestFailed> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&AnswerRequest { message })
            .send()
            .await
            .map_err(AnswerRequestFailed::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(endpoint = %self.endpoint, status = status.as_u16(), "answer endpoint returned an error status");
            return Err(AnswerRequestFailed::status(status.as_u16(), &body));
        }

        let body = response.text().await.map_err(AnswerRequestFailed::transport)?;
        let parsed: AnswerResponse = serde_json::from_str(&body).map_err(AnswerRequestFailed::malformed)?;

        Ok(parsed.answer)
    }
}

/// Factory to create answer services from config
pub struct AnswerServiceFactory;

impl AnswerServiceFactory {
    pub fn create_from_config(config: &ServiceConfig) -> Result<Arc<dyn AnswerService>> {
        match config {
            ServiceConfig::Http { endpoint, timeout_secs } => Ok(Arc::new(HttpAnswerService::new(
                endpoint.clone(),
                Duration::from_secs(*timeout_secs),
            )?)),
            ServiceConfig::Mock { responses_file } => {
                Ok(Arc::new(MockAnswerService::new(responses_file.as_deref())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// Accept one connection, answer it with a canned response, and return the raw request.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{}/predict", addr), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
                let content_length = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= pos + 4 + content_length {
                    break;
                }
            }
        }

        String::from_utf8_lossy(&buf).to_string()
    }

    fn service(endpoint: &str) -> HttpAnswerService {
        let client = HttpClient::builder().timeout(Duration::from_secs(5)).no_proxy().build().unwrap();
        HttpAnswerService { client, endpoint: endpoint.to_string() }
    }

    #[tokio::test]
    async fn test_http_ask_success() {
        let (endpoint, server) = serve_once("200 OK", r#"{"answer":"Hello!"}"#).await;

        let answer = service(&endpoint).ask("Hi").await.unwrap();
        assert_eq!(answer, "Hello!");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /predict HTTP/1.1"));
        assert!(request.to_lowercase().contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"message":"Hi"}"#));
    }

    #[tokio::test]
    async fn test_http_ask_non_success_status() {
        let (endpoint, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;

        let err = service(&endpoint).ask("Hi").await.unwrap_err();
        assert!(err.reason().starts_with("status 500"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_http_ask_malformed_body() {
        let (endpoint, server) = serve_once("200 OK", "not json").await;

        let err = service(&endpoint).ask("Hi").await.unwrap_err();
        assert!(err.reason().starts_with("malformed response"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_http_ask_wrong_shape() {
        let (endpoint, server) = serve_once("200 OK", r#"{"reply":"Hello!"}"#).await;

        let err = service(&endpoint).ask("Hi").await.unwrap_err();
        assert!(err.reason().starts_with("malformed response"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_http_ask_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = service(&format!("http://{}/predict", addr)).ask("Hi").await.unwrap_err();
        assert!(err.reason().starts_with("transport error"));
    }

    #[test]
    fn test_http_service_endpoint() {
        let service = HttpAnswerService::new("http://localhost:5001/predict", Duration::from_secs(1)).unwrap();
        assert_eq!(service.endpoint(), "http://localhost:5001/predict");
    }

    #[tokio::test]
    async fn test_factory_creates_mock() {
        let service = AnswerServiceFactory::create_from_config(&ServiceConfig::Mock { responses_file: None }).unwrap();
        let answer = service.ask("anything").await.unwrap();
        assert!(answer.contains("Mock answer"));
    }

    #[test]
    fn test_factory_creates_http() {
        let config = ServiceConfig::Http { endpoint: "http://localhost:5001/predict".to_string(), timeout_secs: 5 };
        assert!(AnswerServiceFactory::create_from_config(&config).is_ok());
    }
}
