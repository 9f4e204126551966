//! Klarifikasi Scraper
//!
//! Best-effort article extraction for claim verification.
//!
//! - [`HtmlFetcher`] fetches one URL and runs [`extract_article`], the
//!   ordered selector cascade for body, title, date and author.
//! - [`SourceScraper`] runs any [`ArticleFetcher`] across a batch of
//!   candidate URLs, keeping successes in input order up to a limit.
//! - [`StaticFetcher`] serves canned HTML through the same extraction, for
//!   tests and offline runs.
//!
//! [`ArticleFetcher`]: klarifikasi_domain::ArticleFetcher

#![warn(missing_docs)]

pub mod batch;
pub mod extractor;
pub mod static_fetcher;

pub use batch::{should_skip_url, SourceScraper, BLOCKED_DOMAINS};
pub use extractor::{extract_article, HtmlFetcher, DEFAULT_CONTENT_MAX_CHARS, DEFAULT_FETCH_TIMEOUT};
pub use static_fetcher::StaticFetcher;
