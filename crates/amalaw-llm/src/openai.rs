//! OpenAI API integration.
//!
//! # Features
//!
//! - Chat completions
//! - Training-file upload (multipart, purpose `fine-tune`)
//! - Fine-tune job creation and retrieval
//! - Retry logic with exponential backoff on transient failures

use crate::{CompletionParams, LlmError};
use amalaw_domain::ChatMessage;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default OpenAI API base URL
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Default timeout for API requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// OpenAI API client.
pub struct OpenAiClient {
    api_base: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct FileUploadResponse {
    id: String,
}

#[derive(Serialize)]
struct FineTuneJobRequest<'a> {
    training_file: &'a str,
    model: &'a str,
    hyperparameters: Hyperparameters,
}

#[derive(Serialize)]
struct Hyperparameters {
    n_epochs: u32,
}

/// A fine-tuning job as reported by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct FineTuneJob {
    /// Job identifier
    pub id: String,

    /// Job status (`validating_files`, `running`, `succeeded`, `failed`, ...)
    pub status: String,

    /// Identifier of the resulting model, present once the job succeeded
    #[serde(default)]
    pub fine_tuned_model: Option<String>,

    /// Error details, present when the job failed
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl OpenAiClient {
    /// Create a client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Point the client at a different API base (test servers, proxies).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the maximum number of retry attempts.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Run one chat completion and return the assistant message text.
    ///
    /// # Errors
    ///
    /// Returns error if the API is unreachable after retries, the model is
    /// unknown, the rate limit holds across retries, or the response shape
    /// is unexpected.
    pub async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.api_base);
        let request_body = ChatCompletionRequest {
            model: &params.model,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed: ChatCompletionResponse =
                            response.json().await.map_err(|e| {
                                LlmError::InvalidResponse(format!(
                                    "Failed to parse response: {}",
                                    e
                                ))
                            })?;
                        return parsed
                            .choices
                            .into_iter()
                            .next()
                            .map(|choice| choice.message.content)
                            .ok_or_else(|| {
                                LlmError::InvalidResponse("No choices in response".to_string())
                            });
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(params.model.clone()));
                    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(LlmError::RateLimitExceeded);
                    } else {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }

    /// Upload a training file (purpose `fine-tune`) and return its file id.
    pub async fn upload_training_file(&self, path: &Path) -> Result<String, LlmError> {
        let url = format!("{}/files", self.api_base);

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| LlmError::Other(format!("Failed to read {}: {}", path.display(), e)))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "training.jsonl".to_string());

        let form = reqwest::multipart::Form::new()
            .text("purpose", "fine-tune")
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let upload: FileUploadResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
        Ok(upload.id)
    }

    /// Create a fine-tuning job for an uploaded training file.
    pub async fn create_fine_tune_job(
        &self,
        training_file: &str,
        model: &str,
        n_epochs: u32,
    ) -> Result<FineTuneJob, LlmError> {
        let url = format!("{}/fine_tuning/jobs", self.api_base);
        let request_body = FineTuneJobRequest {
            training_file,
            model,
            hyperparameters: Hyperparameters { n_epochs },
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        Self::parse_job_response(response).await
    }

    /// Retrieve the current state of a fine-tuning job.
    pub async fn retrieve_fine_tune_job(&self, job_id: &str) -> Result<FineTuneJob, LlmError> {
        let url = format!("{}/fine_tuning/jobs/{}", self.api_base, job_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        Self::parse_job_response(response).await
    }

    async fn parse_job_response(response: reqwest::Response) -> Result<FineTuneJob, LlmError> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenAiClient::new("sk-test");
        assert_eq!(client.api_base, DEFAULT_API_BASE);
        assert_eq!(client.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_with_api_base() {
        let client = OpenAiClient::new("sk-test").with_api_base("http://localhost:8089/v1");
        assert_eq!(client.api_base, "http://localhost:8089/v1");
    }

    #[test]
    fn test_completion_request_serialization() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hi")];
        let request = ChatCompletionRequest {
            model: "gpt-4o-mini-2024-07-18",
            messages: &messages,
            temperature: 0.0,
            max_tokens: 5,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini-2024-07-18");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["max_tokens"], 5);
    }

    #[test]
    fn test_completion_response_parsing() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "About 1-2 years."}, "finish_reason": "stop"}
            ],
            "usage": {"total_tokens": 42}
        }"#;

        let parsed: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content, "About 1-2 years.");
    }

    #[test]
    fn test_fine_tune_job_parsing() {
        let json = r#"{
            "id": "ftjob-abc123",
            "status": "succeeded",
            "fine_tuned_model": "ft:gpt-3.5-turbo:custom",
            "object": "fine_tuning.job"
        }"#;

        let job: FineTuneJob = serde_json::from_str(json).unwrap();
        assert_eq!(job.id, "ftjob-abc123");
        assert_eq!(job.status, "succeeded");
        assert_eq!(job.fine_tuned_model.as_deref(), Some("ft:gpt-3.5-turbo:custom"));
        assert!(job.error.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_errors() {
        let client = OpenAiClient::new("sk-test")
            .with_api_base("http://127.0.0.1:9/v1")
            .with_max_retries(1);

        let result = client
            .chat_completion(
                &[ChatMessage::user("hi")],
                &CompletionParams::new("test-model"),
            )
            .await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
