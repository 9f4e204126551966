//! Content extraction: fetch one page and pull out the main article
//!
//! Every field runs its own ordered selector cascade, most specific first.
//! Parsing is synchronous ([`extract_article`]) so the non-`Send` parsed
//! document never lives across an await point.

use async_trait::async_trait;
use klarifikasi_domain::text::{collapse_whitespace, truncate_with_ellipsis};
use klarifikasi_domain::{ArticleFetcher, FetchError, ScrapedArticle};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::debug;

/// Default cap on extracted article content (characters, ellipsis included)
pub const DEFAULT_CONTENT_MAX_CHARS: usize = 3000;

/// Default per-request timeout
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Paragraphs must be longer than this to count as article text
const MIN_PARAGRAPH_CHARS: usize = 50;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "id-ID,id;q=0.9,en-US;q=0.8,en;q=0.7";

/// Article-body selectors, site-template classes first, bare paragraphs last
const CONTENT_SELECTORS: &[&str] = &[
    "article .content",
    "article .post-content",
    "article .entry-content",
    "article .article-content",
    "article .article-body",
    ".article-content",
    ".post-content",
    ".entry-content",
    ".content-article",
    ".detail-content",
    ".detail__body-text",
    ".read__content",
    "article p",
    "main p",
    ".content p",
    "body p",
];

/// Phrases removed from extracted text
const BOILERPLATE: &[&str] = &[
    "Baca juga:",
    "BACA JUGA:",
    "Baca Juga:",
    "Simak juga:",
    "Artikel Terkait:",
    "Related Articles",
    "Loading...",
    "Advertisement",
    "ADVERTISEMENT",
];

/// Where a rule reads its value from
#[derive(Debug, Clone, Copy)]
enum Source {
    Attr(&'static str),
    Text,
    AttrOrText(&'static str),
}

/// One step of a metadata cascade: the first matching element is read
#[derive(Debug, Clone, Copy)]
struct Rule {
    selector: &'static str,
    source: Source,
}

const fn text(selector: &'static str) -> Rule {
    Rule {
        selector,
        source: Source::Text,
    }
}

const fn attr(selector: &'static str, name: &'static str) -> Rule {
    Rule {
        selector,
        source: Source::Attr(name),
    }
}

const fn datetime(selector: &'static str) -> Rule {
    Rule {
        selector,
        source: Source::AttrOrText("datetime"),
    }
}

const TITLE_RULES: &[Rule] = &[
    attr(r#"meta[property="og:title"]"#, "content"),
    attr(r#"meta[name="twitter:title"]"#, "content"),
    text("h1.title"),
    text("h1.post-title"),
    text("h1.article-title"),
    text("h1.entry-title"),
    text(".article-title"),
    text("article h1"),
    text("h1"),
    text("title"),
];

const DATE_RULES: &[Rule] = &[
    attr(r#"meta[property="article:published_time"]"#, "content"),
    attr(r#"meta[name="pubdate"]"#, "content"),
    datetime("time[datetime]"),
    datetime(".date"),
    datetime(".publish-date"),
    datetime(".article-date"),
    datetime(".post-date"),
];

const AUTHOR_RULES: &[Rule] = &[
    attr(r#"meta[name="author"]"#, "content"),
    text(".author"),
    text(".author-name"),
    text(".byline"),
    text(r#"[rel="author"]"#),
];

impl Source {
    fn read(self, element: ElementRef<'_>) -> Option<String> {
        match self {
            Source::Attr(name) => element.value().attr(name).map(str::to_string),
            Source::Text => Some(element_text(element)),
            Source::AttrOrText(name) => element
                .value()
                .attr(name)
                .map(str::to_string)
                .or_else(|| Some(element_text(element))),
        }
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// First non-empty value produced by the cascade; empty string when none is
fn first_match(document: &Html, rules: &[Rule]) -> String {
    rules
        .iter()
        .find_map(|rule| {
            let selector = Selector::parse(rule.selector).ok()?;
            let element = document.select(&selector).next()?;
            let value = collapse_whitespace(&rule.source.read(element)?);
            (!value.is_empty()).then_some(value)
        })
        .unwrap_or_default()
}

/// Paragraphs of the first selector that yields any substantial text
fn main_content(document: &Html) -> Option<String> {
    CONTENT_SELECTORS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|selector| {
            let paragraphs: Vec<String> = document
                .select(&selector)
                .map(|element| element_text(element).trim().to_string())
                .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
                .collect();
            (!paragraphs.is_empty()).then(|| paragraphs.join("\n\n"))
        })
}

/// Collapse whitespace, strip boilerplate, then cap the length.
///
/// Collapsing first lets phrases split across lines in the markup match.
fn clean_text(text: &str, max_chars: usize) -> String {
    let stripped = BOILERPLATE
        .iter()
        .fold(collapse_whitespace(text), |acc, phrase| acc.replace(phrase, ""));
    truncate_with_ellipsis(&collapse_whitespace(&stripped), max_chars)
}

/// Extract the main article from an HTML document.
///
/// Content is cleaned plain text of at most `max_chars` characters. Title,
/// date and author are best effort and never cause a failure; a page where
/// no content selector matches yields [`FetchError::NoContent`].
pub fn extract_article(url: &str, html: &str, max_chars: usize) -> Result<ScrapedArticle, FetchError> {
    let document = Html::parse_document(html);

    let raw = main_content(&document).ok_or(FetchError::NoContent)?;
    let content = clean_text(&raw, max_chars);
    if content.is_empty() {
        return Err(FetchError::NoContent);
    }

    Ok(ScrapedArticle::new(
        url,
        first_match(&document, TITLE_RULES),
        content,
        first_match(&document, DATE_RULES),
        first_match(&document, AUTHOR_RULES),
    ))
}

/// HTTP article fetcher with a browser-like request identity
pub struct HtmlFetcher {
    client: reqwest::Client,
    max_chars: usize,
}

impl HtmlFetcher {
    /// Create a fetcher with the default timeout and content cap
    pub fn new() -> Result<Self, FetchError> {
        Self::with_options(DEFAULT_FETCH_TIMEOUT, DEFAULT_CONTENT_MAX_CHARS)
    }

    /// Create a fetcher with an explicit timeout and content cap
    pub fn with_options(timeout: Duration, max_chars: usize) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(format!("HTTP client: {}", e)))?;

        Ok(Self { client, max_chars })
    }
}

#[async_trait]
impl ArticleFetcher for HtmlFetcher {
    async fn fetch(&self, url: &str) -> Result<ScrapedArticle, FetchError> {
        url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(url, status = status.as_u16(), "Fetch returned non-success status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Network(e.to_string())
            }
        })?;

        extract_article(url, &body, self.max_chars)
    }
}
