//! Discussion thread and comment tree types.
//!
//! These mirror the JSON shape served by the HN Algolia items API: a thread
//! document is its own root node, carrying `id`, `title`, `author`, optional
//! body text, and a nested `children` array of comments of the same shape.

use serde::{Deserialize, Deserializer};

/// One node in a thread's reply tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Comment {
    /// Identifier, unique within a thread
    pub id: u64,

    /// Author username; absent for deleted comments
    #[serde(default)]
    pub author: Option<String>,

    /// Raw body text (HTML-entity encoded); absent for deleted comments
    #[serde(default)]
    pub text: Option<String>,

    /// Identifier of the parent node; absent for the thread root
    #[serde(default, alias = "parent_id")]
    pub parent: Option<u64>,

    /// Creation timestamp as reported by the API (ISO 8601)
    #[serde(default)]
    pub created_at: Option<String>,

    /// Whether the comment has been deleted
    #[serde(default)]
    pub deleted: bool,

    /// Direct replies, in the order the API returned them
    #[serde(default, deserialize_with = "lenient_children")]
    pub children: Vec<Comment>,
}

impl Comment {
    /// Whether this comment has non-empty body text and is not deleted.
    ///
    /// Comments failing this test are excluded from consideration as either
    /// question or answer, though their children are still reachable.
    pub fn has_body(&self) -> bool {
        !self.deleted && self.text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// A discussion tree rooted at a single posted item.
///
/// The root carries the thread identifier and title, and may itself be a
/// question (an Ask HN post body).
#[derive(Debug, Clone, Deserialize)]
pub struct Thread {
    /// Thread identifier (the root item's id)
    pub id: u64,

    /// Thread title
    #[serde(default)]
    pub title: Option<String>,

    /// Author of the root item
    #[serde(default)]
    pub author: Option<String>,

    /// Body text of the root item, if any
    #[serde(default)]
    pub text: Option<String>,

    /// Creation timestamp of the root item
    #[serde(default)]
    pub created_at: Option<String>,

    /// Top-level comments
    #[serde(default, deserialize_with = "lenient_children")]
    pub children: Vec<Comment>,
}

impl Thread {
    /// The thread title, or an empty string when absent.
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

/// Deserialize a children array, skipping entries that are not well-formed
/// comment objects (nulls, bare strings). A malformed entry drops only
/// itself, never the surrounding document.
fn lenient_children<'de, D>(deserializer: D) -> Result<Vec<Comment>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect())
}
