//! Search hits produced by the web-search collaborator

use serde::{Deserialize, Serialize};

/// One result entry from a general-purpose web search for a claim.
///
/// Hits are consumed read-only by the verification pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// Result title
    #[serde(default)]
    pub title: String,

    /// Short excerpt shown by the search engine
    #[serde(default)]
    pub snippet: String,

    /// Target URL
    #[serde(default)]
    pub link: String,

    /// Domain as displayed by the search engine (e.g. "www.kemkes.go.id")
    #[serde(default, alias = "displayLink")]
    pub display_domain: String,

    /// Human-readable URL, when the engine provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_url: Option<String>,

    /// Preview image, when the engine provides one
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "thumbnail")]
    pub thumbnail_url: Option<String>,
}

impl SearchHit {
    /// Create a hit from the four always-present fields
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        link: impl Into<String>,
        display_domain: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            link: link.into(),
            display_domain: display_domain.into(),
            formatted_url: None,
            thumbnail_url: None,
        }
    }

    /// Lowercased `title + " " + snippet`, the text heuristics match against
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.snippet).to_lowercase()
    }
}
