//! Amalaw LLM Provider Layer
//!
//! OpenAI-backed chat completions plus the fine-tuning API surface the
//! offline pipeline needs (file upload, job create, job status).
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiClient`: OpenAI API integration
//!
//! `ChatClient` wraps the two behind one async call so consumers (the chat
//! service) are written once and tested against the mock.
//!
//! # Examples
//!
//! ```
//! use amalaw_domain::ChatMessage;
//! use amalaw_llm::{ChatClient, CompletionParams, MockProvider};
//!
//! # async fn example() {
//! let client = ChatClient::Mock(MockProvider::new("Hello from the model"));
//! let messages = vec![ChatMessage::user("hi")];
//! let reply = client
//!     .chat_completion(&messages, &CompletionParams::new("test-model"))
//!     .await
//!     .unwrap();
//! assert_eq!(reply, "Hello from the model");
//! # }
//! ```

#![warn(missing_docs)]

pub mod openai;

use amalaw_domain::ChatMessage;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openai::{FineTuneJob, OpenAiClient};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Sampling parameters for one completion call.
#[derive(Debug, Clone)]
pub struct CompletionParams {
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl CompletionParams {
    /// Parameters with the given model and neutral defaults.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: 0.7,
            max_tokens: 1000,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the token limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// A chat backend: the real OpenAI client or a deterministic mock.
///
/// Call sites here are async end-to-end, so this is an enum rather than a
/// trait object; no boxed futures, no blocking wrappers.
pub enum ChatClient {
    /// Live OpenAI API
    OpenAi(OpenAiClient),
    /// Deterministic mock for tests
    Mock(MockProvider),
}

impl ChatClient {
    /// Run one chat completion and return the assistant text.
    pub async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<String, LlmError> {
        match self {
            ChatClient::OpenAi(client) => client.chat_completion(messages, params).await,
            ChatClient::Mock(provider) => provider.chat_completion(messages),
        }
    }
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls. A
/// response can be keyed on the content of the conversation's last user
/// message; anything unkeyed gets the default response.
///
/// # Examples
///
/// ```
/// use amalaw_domain::ChatMessage;
/// use amalaw_llm::MockProvider;
///
/// let mut provider = MockProvider::new("default");
/// provider.add_response("ping", "pong");
///
/// let reply = provider.chat_completion(&[ChatMessage::user("ping")]).unwrap();
/// assert_eq!(reply, "pong");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a mock with a fixed response for all conversations.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a response keyed on the last user message's content.
    pub fn add_response(&mut self, last_user_message: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(last_user_message.into(), response.into());
    }

    /// Configure an error for a specific last user message.
    pub fn add_error(&mut self, last_user_message: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(last_user_message.into(), "ERROR".to_string());
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Run one mock completion.
    pub fn chat_completion(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        *self.call_count.lock().unwrap() += 1;

        let key = messages
            .iter()
            .rev()
            .find(|m| m.role == amalaw_domain::Role::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(&key) {
            if response == "ERROR" {
                return Err(LlmError::Other("Mock error".to_string()));
            }
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amalaw_domain::ChatMessage;

    #[test]
    fn test_mock_default_response() {
        let provider = MockProvider::new("Test response");
        let reply = provider
            .chat_completion(&[ChatMessage::user("anything")])
            .unwrap();
        assert_eq!(reply, "Test response");
    }

    #[test]
    fn test_mock_keyed_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");

        let reply = provider
            .chat_completion(&[
                ChatMessage::system("system prompt"),
                ChatMessage::user("hello"),
            ])
            .unwrap();
        assert_eq!(reply, "world");

        let fallback = provider
            .chat_completion(&[ChatMessage::user("unknown")])
            .unwrap();
        assert_eq!(fallback, "Default mock response");
    }

    #[test]
    fn test_mock_keys_on_last_user_message() {
        let mut provider = MockProvider::default();
        provider.add_response("second", "matched");

        let reply = provider
            .chat_completion(&[
                ChatMessage::user("first"),
                ChatMessage::assistant("reply"),
                ChatMessage::user("second"),
            ])
            .unwrap();
        assert_eq!(reply, "matched");
    }

    #[test]
    fn test_mock_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.chat_completion(&[ChatMessage::user("a")]).unwrap();
        provider.chat_completion(&[ChatMessage::user("b")]).unwrap();
        assert_eq!(provider.call_count(), 2);
    }

    #[test]
    fn test_mock_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.chat_completion(&[ChatMessage::user("bad prompt")]);
        assert!(matches!(result, Err(LlmError::Other(_))));
    }

    #[test]
    fn test_mock_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.chat_completion(&[ChatMessage::user("x")]).unwrap();
        assert_eq!(provider2.call_count(), 1);
    }

    #[tokio::test]
    async fn test_chat_client_dispatches_to_mock() {
        let client = ChatClient::Mock(MockProvider::new("via enum"));
        let reply = client
            .chat_completion(
                &[ChatMessage::user("hi")],
                &CompletionParams::new("test-model"),
            )
            .await
            .unwrap();
        assert_eq!(reply, "via enum");
    }

    #[test]
    fn test_completion_params_builders() {
        let params = CompletionParams::new("gpt-4o-mini-2024-07-18")
            .with_temperature(0.0)
            .with_max_tokens(5);
        assert_eq!(params.temperature, 0.0);
        assert_eq!(params.max_tokens, 5);
    }
}
