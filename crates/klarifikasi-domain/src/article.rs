//! Scraped article module

use serde::{Deserialize, Serialize};

/// Cleaned article text extracted from one search-hit URL.
///
/// `content` is always plain text, whitespace-collapsed and truncated to the
/// extractor's cap before it leaves the extractor. Articles live for a single
/// pipeline run and are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedArticle {
    /// URL the article was fetched from
    pub url: String,

    /// Article headline, empty when none was found
    pub title: String,

    /// Main article text
    pub content: String,

    /// Publication date as written by the site (not normalised)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,

    /// Author or byline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Whitespace-delimited word count of `content`
    pub word_count: usize,
}

impl ScrapedArticle {
    /// Build an article, deriving `word_count` from `content`.
    ///
    /// Empty date/author strings are stored as `None`.
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        published_date: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let word_count = content.split_whitespace().count();
        Self {
            url: url.into(),
            title: title.into(),
            content,
            published_date: non_empty(published_date.into()),
            author: non_empty(author.into()),
            word_count,
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
