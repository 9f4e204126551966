//! Klarifikasi Search Providers
//!
//! Implementations of the [`SearchProvider`] trait from `klarifikasi-domain`.
//!
//! # Providers
//!
//! - `GoogleSearchProvider`: Google Custom Search JSON API
//! - `StaticSearchProvider`: fixed hit list, for tests and offline runs

#![warn(missing_docs)]

pub mod google;

use async_trait::async_trait;
use klarifikasi_domain::{SearchError, SearchHit, SearchProvider};

pub use google::{GoogleSearchProvider, SearchConfig};

/// Search provider that returns the same hits (or error) for every query
#[derive(Debug, Clone)]
pub struct StaticSearchProvider {
    result: Result<Vec<SearchHit>, SearchError>,
}

impl StaticSearchProvider {
    /// Always return `hits`
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self { result: Ok(hits) }
    }

    /// Always fail with `error`
    pub fn failing(error: SearchError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl SearchProvider for StaticSearchProvider {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, SearchError> {
        self.result.clone()
    }
}
