//! Klarifikasi Domain Layer
//!
//! Core vocabulary for claim verification: the search hits a claim is checked
//! against, the articles scraped from them, and the verdict that comes out.
//! Infrastructure (HTTP clients, HTML parsing, the generative model) lives in
//! other crates and plugs in through the traits in [`traits`].
//!
//! ## Key Concepts
//!
//! - **Claim**: free text submitted by a user for verification
//! - **SearchHit**: one web-search result for the claim
//! - **ScrapedArticle**: cleaned, truncated article text behind a hit
//! - **ClaimVerdict**: the structured answer, identical in shape for the
//!   AI path and the heuristic path

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod article;
pub mod error;
pub mod search;
pub mod text;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use article::ScrapedArticle;
pub use error::{FetchError, LlmError, SearchError};
pub use search::SearchHit;
pub use traits::{ArticleFetcher, GenerativeModel, Generation, SearchProvider};
pub use verdict::{ClaimVerdict, Confidence, Verdict, MAX_SOURCES};
