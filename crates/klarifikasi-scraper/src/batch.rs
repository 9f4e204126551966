//! Batch scraping across candidate URLs

use futures::stream::{self, StreamExt};
use klarifikasi_domain::{ArticleFetcher, FetchError, ScrapedArticle};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Domains that block automated fetches or carry no article markup
pub const BLOCKED_DOMAINS: &[&str] = &[
    "facebook.com",
    "twitter.com",
    "x.com",
    "instagram.com",
    "tiktok.com",
    "youtube.com",
    "linkedin.com",
];

/// Default number of fetches in flight
pub const DEFAULT_MAX_CONCURRENT: usize = 3;

/// Whether a URL should not be fetched at all.
///
/// Matches the host exactly or as a subdomain, so `m.facebook.com` is skipped
/// while `notfacebook.com` is not. Unparseable URLs are skipped too.
pub fn should_skip_url(url: &str) -> bool {
    let Some(host) = url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
    else {
        return true;
    };

    BLOCKED_DOMAINS
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
}

/// Runs an [`ArticleFetcher`] over a batch of URLs
///
/// Fetches run concurrently (bounded), but results are consumed in input
/// order and the limit counts successes, so the outcome never depends on
/// which fetch finishes first.
pub struct SourceScraper<F: ?Sized> {
    fetcher: Arc<F>,
    fetch_timeout: Duration,
    max_concurrent: usize,
}

impl<F: ArticleFetcher + ?Sized> SourceScraper<F> {
    /// Create a scraper with a 10s per-fetch timeout and 3 fetches in flight
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            fetch_timeout: crate::extractor::DEFAULT_FETCH_TIMEOUT,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Per-fetch timeout, independent of peer fetches
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Maximum fetches in flight (at least one)
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Fetch `urls` in order, keeping at most `limit` successful articles.
    ///
    /// Never fails: skipped domains and fetch errors are logged and dropped,
    /// and an all-failure run returns an empty vector.
    pub async fn scrape_multiple(&self, urls: &[String], limit: usize) -> Vec<ScrapedArticle> {
        if limit == 0 {
            return Vec::new();
        }

        let candidates: Vec<&str> = urls
            .iter()
            .map(String::as_str)
            .filter(|url| {
                let skip = should_skip_url(url);
                if skip {
                    debug!(url, "Skipping blocked or invalid URL");
                }
                !skip
            })
            .collect();

        info!(candidates = candidates.len(), limit, "Scraping sources");

        let mut fetches = stream::iter(candidates)
            .map(|url| async move {
                let result = tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch(url))
                    .await
                    .unwrap_or(Err(FetchError::Timeout));
                (url, result)
            })
            .buffered(self.max_concurrent);

        let mut articles = Vec::new();
        while let Some((url, result)) = fetches.next().await {
            match result {
                Ok(article) => {
                    debug!(url, words = article.word_count, "Scraped article");
                    articles.push(article);
                    if articles.len() >= limit {
                        break;
                    }
                }
                Err(e) => debug!(url, error = %e, "Fetch failed"),
            }
        }

        info!(scraped = articles.len(), "Scraping finished");
        articles
    }
}
