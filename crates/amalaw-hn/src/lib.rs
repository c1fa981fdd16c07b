//! Amalaw HN Client
//!
//! Hacker News access via the Algolia search API.
//!
//! # Overview
//!
//! Two operations back the scraping pipeline: full-text story search (to
//! find AMA threads) and item fetch (to pull a thread's full comment tree
//! in one document). Both retry transient failures with exponential
//! backoff.
//!
//! # Examples
//!
//! ```no_run
//! use amalaw_hn::HnClient;
//!
//! # async fn example() -> Result<(), amalaw_hn::HnError> {
//! let client = HnClient::default_endpoint();
//! let results = client.search_stories(amalaw_hn::DEFAULT_SEARCH_QUERY, 100).await?;
//! for hit in results.ama_hits() {
//!     println!("{}", hit.title.as_deref().unwrap_or("(untitled)"));
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod types;

use thiserror::Error;

pub use client::{HnClient, DEFAULT_ENDPOINT, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
pub use types::{SearchHit, SearchResults, AMA_TITLE_KEYWORDS, DEFAULT_SEARCH_QUERY};

/// Errors that can occur talking to the HN API
#[derive(Error, Debug)]
pub enum HnError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response body could not be parsed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Item does not exist
    #[error("Item not found: {0}")]
    ItemNotFound(u64),
}
