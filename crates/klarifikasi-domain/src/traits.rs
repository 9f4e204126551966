//! Trait definitions for external interactions
//!
//! These traits define the boundaries between verification logic and
//! infrastructure. The claim analyzer receives implementations through its
//! constructor, so tests substitute fakes without any global state.

use crate::{FetchError, LlmError, ScrapedArticle, SearchError, SearchHit};
use async_trait::async_trait;

/// Web search for a claim
///
/// Implemented by the infrastructure layer (klarifikasi-search)
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search the web; hits are returned in ranking order
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError>;
}

/// Fetch one URL and extract its main article
///
/// Implemented by the infrastructure layer (klarifikasi-scraper)
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    /// Fetch and extract; every failure is a [`FetchError`], never a panic
    async fn fetch(&self, url: &str) -> Result<ScrapedArticle, FetchError>;
}

/// What a generative model returned for a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Candidate text (possibly truncated by the output-token cap)
    Text(String),

    /// The model refused the prompt; carries the reported block reason
    Blocked(String),

    /// A 2xx response without usable candidate text and no block reason
    NoCandidate,
}

/// Generative model answering a single text prompt
///
/// Implemented by the infrastructure layer (klarifikasi-llm)
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Display label used in user-facing text (e.g. "Gemini AI")
    fn name(&self) -> &str;

    /// Whether credentials look usable; unconfigured models are never called
    fn is_configured(&self) -> bool {
        true
    }

    /// Run one prompt with the provider's fixed generation configuration
    async fn generate(&self, prompt: &str) -> Result<Generation, LlmError>;
}
