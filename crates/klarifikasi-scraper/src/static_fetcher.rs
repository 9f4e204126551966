//! Canned-page fetcher

use crate::extractor::{extract_article, DEFAULT_CONTENT_MAX_CHARS};
use async_trait::async_trait;
use klarifikasi_domain::{ArticleFetcher, FetchError, ScrapedArticle};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
enum Page {
    Html(String),
    Delayed(String, Duration),
    Failing(FetchError),
    Hang,
}

/// Serves fixed HTML per URL through the real extraction cascade
///
/// Unknown URLs answer with HTTP 404. Requested URLs are recorded so tests
/// can assert which sources were actually fetched.
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    pages: HashMap<String, Page>,
    max_chars: usize,
    requested: Arc<Mutex<Vec<String>>>,
}

impl Default for StaticFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticFetcher {
    /// Fetcher with no pages
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            max_chars: DEFAULT_CONTENT_MAX_CHARS,
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Serve `html` for `url`
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), Page::Html(html.into()));
        self
    }

    /// Serve `html` for `url` after `delay`
    pub fn with_delayed_page(
        mut self,
        url: impl Into<String>,
        html: impl Into<String>,
        delay: Duration,
    ) -> Self {
        self.pages.insert(url.into(), Page::Delayed(html.into(), delay));
        self
    }

    /// Fail `url` with `error`
    pub fn with_failure(mut self, url: impl Into<String>, error: FetchError) -> Self {
        self.pages.insert(url.into(), Page::Failing(error));
        self
    }

    /// Never answer for `url`
    pub fn with_hanging(mut self, url: impl Into<String>) -> Self {
        self.pages.insert(url.into(), Page::Hang);
        self
    }

    /// URLs fetched so far, in request order
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ArticleFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<ScrapedArticle, FetchError> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(url.to_string());
        }

        match self.pages.get(url) {
            Some(Page::Html(html)) => extract_article(url, html, self.max_chars),
            Some(Page::Delayed(html, delay)) => {
                tokio::time::sleep(*delay).await;
                extract_article(url, html, self.max_chars)
            }
            Some(Page::Failing(error)) => Err(error.clone()),
            Some(Page::Hang) => std::future::pending().await,
            None => Err(FetchError::Status(404)),
        }
    }
}
