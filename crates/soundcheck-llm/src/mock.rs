//! Mock LLM provider for deterministic testing.
//!
//! Returns pre-configured responses without making any HTTP calls.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::provider::*;
use soundcheck_core::{Result, SoundcheckError};

/// A mock LLM provider that returns pre-configured responses in order.
///
/// # Example
/// ```
/// use soundcheck_llm::mock::MockProvider;
/// let provider = MockProvider::new("test")
///     .with_response("Hello, world!");
/// ```
pub struct MockProvider {
    responses: Arc<Mutex<Vec<MockResponse>>>,
    /// Track all requests received (for assertions in tests).
    pub requests: Arc<Mutex<Vec<LlmRequest>>>,
    name: String,
}

/// A pre-configured response from the mock provider.
#[derive(Clone)]
pub struct MockResponse {
    pub text: String,
    pub usage: Usage,
    /// If set, the provider will return this failure instead.
    pub failure: Option<MockFailure>,
}

/// Failure modes the mock can simulate.
#[derive(Clone)]
pub enum MockFailure {
    /// The transient "overloaded" status (HTTP 529).
    Overloaded,
    /// Any non-transient provider error.
    Provider(String),
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            text: String::new(),
            usage: Usage {
                input_tokens: 100,
                output_tokens: 50,
            },
            failure: None,
        }
    }
}

impl MockResponse {
    /// Create a text response.
    pub fn text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }

    /// Create an overloaded failure.
    pub fn overloaded() -> Self {
        Self {
            failure: Some(MockFailure::Overloaded),
            ..Default::default()
        }
    }

    /// Create a non-transient error response.
    pub fn error(msg: &str) -> Self {
        Self {
            failure: Some(MockFailure::Provider(msg.to_string())),
            ..Default::default()
        }
    }
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![])),
            requests: Arc::new(Mutex::new(vec![])),
            name: name.into(),
        }
    }

    /// Queue a simple text response.
    pub fn with_response(self, text: &str) -> Self {
        self.responses.lock().unwrap().push(MockResponse::text(text));
        self
    }

    /// Queue a transient overloaded failure.
    pub fn with_overload(self) -> Self {
        self.responses.lock().unwrap().push(MockResponse::overloaded());
        self
    }

    /// Queue a non-transient error response.
    pub fn with_error(self, error: &str) -> Self {
        self.responses.lock().unwrap().push(MockResponse::error(error));
        self
    }

    /// Queue a fully custom response.
    pub fn with_mock_response(self, resp: MockResponse) -> Self {
        self.responses.lock().unwrap().push(resp);
        self
    }

    /// Get all requests that were made to this provider.
    pub fn recorded_requests(&self) -> Arc<Mutex<Vec<LlmRequest>>> {
        Arc::clone(&self.requests)
    }

    /// Pop the next queued response, or return a default "no response queued" message.
    fn next_response(&self) -> MockResponse {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            MockResponse::text("(mock: no more queued responses)")
        } else {
            responses.remove(0)
        }
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let mock = self.next_response();

        if let Some(failure) = mock.failure {
            return Err(match failure {
                MockFailure::Overloaded => SoundcheckError::Overloaded,
                MockFailure::Provider(msg) => SoundcheckError::Provider(msg),
            });
        }

        Ok(LlmResponse {
            text: mock.text,
            usage: mock.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_request() -> LlmRequest {
        LlmRequest {
            model: "test".into(),
            messages: vec![ChatMessage::user("hello")],
            system: Some("be nice".into()),
            max_tokens: 100,
            temperature: 0.0,
        }
    }

    #[tokio::test]
    async fn test_mock_text_response() {
        let provider = MockProvider::new("mock").with_response("Hello!");

        let resp = provider.complete(&make_request()).await.unwrap();
        assert_eq!(resp.text, "Hello!");
        assert_eq!(resp.usage.total_tokens(), 150);
    }

    #[tokio::test]
    async fn test_mock_overload() {
        let provider = MockProvider::new("mock").with_overload();

        let result = provider.complete(&make_request()).await;
        assert!(matches!(result, Err(SoundcheckError::Overloaded)));
    }

    #[tokio::test]
    async fn test_mock_error() {
        let provider = MockProvider::new("mock").with_error("HTTP 400: bad request");

        let result = provider.complete(&make_request()).await;
        assert!(matches!(result, Err(SoundcheckError::Provider(_))));
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let provider = MockProvider::new("mock").with_response("ok");

        let _ = provider.complete(&make_request()).await;
        let recorded = provider.recorded_requests();
        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].system, Some("be nice".into()));
        assert_eq!(recorded[0].messages[0].content, "hello");
    }

    #[tokio::test]
    async fn test_mock_multiple_responses_in_order() {
        let provider = MockProvider::new("mock")
            .with_response("first")
            .with_response("second")
            .with_response("third");

        let r1 = provider.complete(&make_request()).await.unwrap();
        let r2 = provider.complete(&make_request()).await.unwrap();
        let r3 = provider.complete(&make_request()).await.unwrap();
        assert_eq!(r1.text, "first");
        assert_eq!(r2.text, "second");
        assert_eq!(r3.text, "third");
    }

    #[tokio::test]
    async fn test_mock_exhausted_queue_returns_placeholder() {
        let provider = MockProvider::new("mock");

        let resp = provider.complete(&make_request()).await.unwrap();
        assert!(resp.text.contains("no more queued responses"));
    }
}
