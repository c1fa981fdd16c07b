//! HTTP client for the Algolia HN API.
//!
//! # Features
//!
//! - Story search and full item-tree fetch
//! - Retry logic with exponential backoff
//! - Timeout handling

use crate::types::SearchResults;
use crate::HnError;
use amalaw_domain::Thread;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Default Algolia HN API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://hn.algolia.com/api/v1";

/// Default timeout for API requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Client for the Algolia HN API.
pub struct HnClient {
    endpoint: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl HnClient {
    /// Create a new client against the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: endpoint.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a client against the public Algolia endpoint.
    pub fn default_endpoint() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }

    /// Set the maximum number of retry attempts.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Full-text search for stories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API is unreachable after retries or the
    /// response cannot be parsed.
    pub async fn search_stories(
        &self,
        query: &str,
        hits_per_page: u32,
    ) -> Result<SearchResults, HnError> {
        let url = format!(
            "{}/search?query={}&tags=story&hitsPerPage={}",
            self.endpoint,
            urlencode(query),
            hits_per_page
        );
        debug!(%url, "searching stories");
        self.get_json(&url, None).await
    }

    /// Fetch a thread with its full comment tree.
    ///
    /// # Errors
    ///
    /// Returns [`HnError::ItemNotFound`] for an unknown id, otherwise the
    /// same failure modes as [`HnClient::search_stories`].
    pub async fn fetch_thread(&self, id: u64) -> Result<Thread, HnError> {
        let url = format!("{}/items/{}", self.endpoint, id);
        debug!(%url, "fetching thread");
        self.get_json(&url, Some(id)).await
    }

    /// GET a JSON document with retry and exponential backoff.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        item_id: Option<u64>,
    ) -> Result<T, HnError> {
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.get(url).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return response.json::<T>().await.map_err(|e| {
                            HnError::InvalidResponse(format!("Failed to parse response: {}", e))
                        });
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        if let Some(id) = item_id {
                            return Err(HnError::ItemNotFound(id));
                        }
                        return Err(HnError::Communication("HTTP 404".to_string()));
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(HnError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(HnError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!(%url, attempt = attempts, "request failed, retrying");
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| HnError::Communication("Max retries exceeded".to_string())))
    }
}

/// Percent-encode a query string value. Only the characters the Algolia
/// query parameter actually needs escaped.
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HnClient::default_endpoint();
        assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(client.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_with_max_retries() {
        let client = HnClient::default_endpoint().with_max_retries(5);
        assert_eq!(client.max_retries, 5);
    }

    #[test]
    fn test_urlencode() {
        assert_eq!(
            urlencode("Peter Roberts immigration ask me anything"),
            "Peter%20Roberts%20immigration%20ask%20me%20anything"
        );
        assert_eq!(urlencode("a&b=c"), "a%26b%3Dc");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_errors() {
        let client = HnClient::new("http://127.0.0.1:9").with_max_retries(1);
        let result = client.fetch_thread(1).await;
        assert!(matches!(result, Err(HnError::Communication(_))));
    }

    // Integration test against the live API
    #[tokio::test]
    #[ignore] // Only run when network access is available
    async fn test_search_stories_integration() {
        let client = HnClient::default_endpoint();
        let results = client
            .search_stories(crate::DEFAULT_SEARCH_QUERY, 10)
            .await
            .unwrap();
        assert!(!results.hits.is_empty());
    }
}
