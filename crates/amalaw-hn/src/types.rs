//! Search API response types and AMA thread filtering.

use serde::Deserialize;

/// Default full-text query used to locate the AMA threads.
pub const DEFAULT_SEARCH_QUERY: &str = "Peter Roberts immigration ask me anything";

/// Keywords a story title must all contain (case-insensitively) to count
/// as one of the target AMA threads. Full-text search is fuzzy; this filter
/// is what actually decides membership.
pub const AMA_TITLE_KEYWORDS: [&str; 3] = ["peter roberts", "immigration", "ask me anything"];

/// Response from the Algolia search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    /// Matching stories
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

impl SearchResults {
    /// Hits whose titles pass the AMA keyword filter.
    pub fn ama_hits(&self) -> Vec<&SearchHit> {
        self.hits
            .iter()
            .filter(|hit| hit.title_matches(&AMA_TITLE_KEYWORDS))
            .collect()
    }
}

/// One story returned by search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    /// Story identifier (Algolia serves it as a string)
    #[serde(rename = "objectID")]
    pub object_id: String,

    /// Story title
    #[serde(default)]
    pub title: Option<String>,

    /// Story author
    #[serde(default)]
    pub author: Option<String>,

    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
}

impl SearchHit {
    /// Whether the title contains every keyword, case-insensitively.
    pub fn title_matches(&self, keywords: &[&str]) -> bool {
        match &self.title {
            Some(title) => {
                let title = title.to_lowercase();
                keywords.iter().all(|kw| title.contains(kw))
            }
            None => false,
        }
    }

    /// The story id as a number, for the items endpoint.
    pub fn item_id(&self) -> Option<u64> {
        self.object_id.parse().ok()
    }
}
