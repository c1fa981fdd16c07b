//! HTTP request handlers for the chat service.
//!
//! Implements the chat endpoint and health check using axum.

use crate::config::ServerConfig;
use crate::prompt;
use amalaw_domain::ChatMessage;
use amalaw_llm::{ChatClient, CompletionParams, LlmError};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Chat backend (live API or mock)
    pub llm: Arc<ChatClient>,
    /// Service configuration
    pub config: Arc<ServerConfig>,
}

/// Chat request body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The latest user message
    #[serde(default)]
    pub message: String,

    /// Prior conversation turns, oldest first
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// Chat response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Assistant reply text
    pub response: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall service status
    pub status: String,
    /// Model answering chat requests
    pub model: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Request was malformed
    BadRequest(String),
    /// Upstream model call failed
    Llm(LlmError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Llm(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Llm(e)
    }
}

/// POST /api/chat - Answer an immigration question
///
/// Gates the message through a yes/no topical classification first; only
/// on-topic questions reach the persona model.
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::BadRequest("Message is required".to_string()));
    }

    if !is_immigration_related(&state, &request.message).await {
        debug!("off-topic message, returning refusal");
        return Ok(Json(ChatResponse {
            response: prompt::REFUSAL_MESSAGE.to_string(),
        }));
    }

    let mut messages = Vec::with_capacity(request.messages.len() + 2);
    messages.push(ChatMessage::system(prompt::PERSONA_SYSTEM_PROMPT));
    messages.extend(request.messages);
    messages.push(ChatMessage::user(&request.message));

    let params = CompletionParams::new(&state.config.model_id)
        .with_temperature(0.7)
        .with_max_tokens(1000);

    let completion = state.llm.chat_completion(&messages, &params).await?;
    let completion = completion.trim();

    let response = if completion.is_empty() {
        prompt::EMPTY_COMPLETION_FALLBACK.to_string()
    } else {
        completion.to_string()
    };

    Ok(Json(ChatResponse { response }))
}

/// Ask the classifier model whether a message is on-topic.
///
/// A classifier failure must not take the service down, so errors degrade
/// to "on-topic" and the persona model (which carries its own topical
/// instructions) has the final word.
async fn is_immigration_related(state: &AppState, message: &str) -> bool {
    let messages = vec![
        ChatMessage::system(prompt::CLASSIFIER_SYSTEM_PROMPT),
        ChatMessage::user(prompt::classifier_prompt(message)),
    ];

    let params = CompletionParams::new(&state.config.classifier_model)
        .with_temperature(0.0)
        .with_max_tokens(5);

    match state.llm.chat_completion(&messages, &params).await {
        Ok(answer) => answer.trim().to_lowercase() == "yes",
        Err(e) => {
            warn!("classification failed, allowing question: {}", e);
            true
        }
    }
}

/// GET /health - Service health check
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        model: state.config.model_id.clone(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/api/chat", post(chat))
        .route("/health", get(health_check))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use amalaw_llm::MockProvider;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt; // for oneshot

    fn create_test_state(provider: MockProvider) -> AppState {
        AppState {
            llm: Arc::new(ChatClient::Mock(provider)),
            config: Arc::new(ServerConfig::default_test_config()),
        }
    }

    /// Mock wired so the classifier says yes/no for a given message and the
    /// persona call gets the default response.
    fn classifier_mock(message: &str, verdict: &str, answer: &str) -> MockProvider {
        let mut provider = MockProvider::new(answer);
        provider.add_response(prompt::classifier_prompt(message), verdict);
        provider
    }

    async fn post_chat(app: AxumRouter, body: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(create_test_state(MockProvider::default()));

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_on_topic_question_answered() {
        let provider = classifier_mock(
            "How long does EB-2 take?",
            "yes",
            "About 1-2 years for most nationalities.",
        );
        let app = create_router(create_test_state(provider));

        let (status, json) = post_chat(
            app,
            r#"{"message": "How long does EB-2 take?", "messages": []}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["response"], "About 1-2 years for most nationalities.");
    }

    #[tokio::test]
    async fn test_off_topic_question_refused() {
        let provider = classifier_mock("What's the best pizza?", "no", "should not be called");
        let app = create_router(create_test_state(provider.clone()));

        let (status, json) =
            post_chat(app, r#"{"message": "What's the best pizza?", "messages": []}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["response"], prompt::REFUSAL_MESSAGE);
        // Only the classifier ran; the persona model was never called.
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_classifier_failure_still_answers() {
        let mut provider = MockProvider::new("An answer despite the broken classifier.");
        provider.add_error(prompt::classifier_prompt("Do I need a visa?"));
        let app = create_router(create_test_state(provider));

        let (status, json) =
            post_chat(app, r#"{"message": "Do I need a visa?", "messages": []}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["response"], "An answer despite the broken classifier.");
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let app = create_router(create_test_state(MockProvider::default()));

        let (status, json) = post_chat(app, r#"{"message": "", "messages": []}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Message is required");
    }

    #[tokio::test]
    async fn test_empty_completion_falls_back() {
        let provider = classifier_mock("Do I need a visa?", "yes", "   ");
        let app = create_router(create_test_state(provider));

        let (status, json) =
            post_chat(app, r#"{"message": "Do I need a visa?", "messages": []}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["response"], prompt::EMPTY_COMPLETION_FALLBACK);
    }

    #[tokio::test]
    async fn test_get_chat_method_not_allowed() {
        let app = create_router(create_test_state(MockProvider::default()));

        let request = Request::builder()
            .uri("/api/chat")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
