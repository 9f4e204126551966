//! Google Custom Search provider
//!
//! A thin key-for-results client: one GET per query, items mapped to
//! [`SearchHit`]s in ranking order.

use async_trait::async_trait;
use klarifikasi_domain::text::mask_secret;
use klarifikasi_domain::{SearchError, SearchHit, SearchProvider};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

/// Default Custom Search endpoint
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Configuration for [`GoogleSearchProvider`]
#[derive(Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// API key
    #[serde(default)]
    pub api_key: String,

    /// Programmable search engine id (`cx`)
    #[serde(default)]
    pub engine_id: String,

    /// Results per query (the API caps this at 10)
    #[serde(default = "default_num")]
    pub num: u8,

    /// API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_num() -> u8 {
    10
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            engine_id: String::new(),
            num: default_num(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SearchConfig {
    /// Whether both credentials are present
    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.engine_id.trim().is_empty()
    }
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_key", &mask_secret(&self.api_key))
            .field("engine_id", &self.engine_id)
            .field("num", &self.num)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Google Custom Search API client
pub struct GoogleSearchProvider {
    config: SearchConfig,
    client: reqwest::Client,
}

impl GoogleSearchProvider {
    /// Create a new provider
    ///
    /// Missing credentials are reported per query, not here.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SearchError::Communication(format!("HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }
}

/// Map the `items` array of a Custom Search response to hits.
///
/// A response without `items` (no results) maps to an empty vector.
pub fn parse_items(body: &Value) -> Vec<SearchHit> {
    body.get("items")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(parse_item).collect())
        .unwrap_or_default()
}

fn parse_item(item: &Value) -> SearchHit {
    let field = |name: &str| {
        item.get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    SearchHit {
        title: field("title"),
        snippet: field("snippet"),
        link: field("link"),
        display_domain: field("displayLink"),
        formatted_url: item
            .get("formattedUrl")
            .and_then(Value::as_str)
            .map(str::to_string),
        thumbnail_url: thumbnail(item),
    }
}

fn thumbnail(item: &Value) -> Option<String> {
    let metatags = item.pointer("/pagemap/metatags/0");
    item.pointer("/pagemap/cse_thumbnail/0/src")
        .or_else(|| metatags.and_then(|m| m.get("og:image")))
        .or_else(|| metatags.and_then(|m| m.get("twitter:image")))
        .or_else(|| metatags.and_then(|m| m.get("twitter:image:src")))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl SearchProvider for GoogleSearchProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        if !self.config.has_credentials() {
            return Err(SearchError::MissingCredentials);
        }

        let num = self.config.num.to_string();
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("cx", self.config.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Communication(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        if !status.is_success() {
            let message = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("Search API returned an error.")
                .to_string();
            warn!(status = status.as_u16(), %message, "Search API error");
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let hits = parse_items(&body);
        info!(query, hits = hits.len(), "Search completed");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_items() {
        let body = json!({
            "items": [
                {
                    "title": "[HOAKS] Vaksin Mengandung Magnet",
                    "snippet": "Klaim vaksin menyebabkan magnet adalah hoaks.",
                    "link": "https://www.kemkes.go.id/article/1",
                    "displayLink": "www.kemkes.go.id",
                    "formattedUrl": "https://www.kemkes.go.id/article/1",
                    "pagemap": {"cse_thumbnail": [{"src": "https://img/1.png"}]}
                },
                {
                    "title": "Cek Fakta",
                    "link": "https://turnbackhoax.id/2",
                    "displayLink": "turnbackhoax.id",
                    "pagemap": {"metatags": [{"twitter:image": "https://img/2.png"}]}
                }
            ]
        });

        let hits = parse_items(&body);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].display_domain, "www.kemkes.go.id");
        assert_eq!(hits[0].thumbnail_url.as_deref(), Some("https://img/1.png"));
        assert_eq!(hits[1].snippet, "");
        assert_eq!(hits[1].formatted_url, None);
        assert_eq!(hits[1].thumbnail_url.as_deref(), Some("https://img/2.png"));
    }

    #[test]
    fn test_thumbnail_precedence() {
        let item = json!({
            "pagemap": {
                "metatags": [{"og:image": "https://og.png", "twitter:image": "https://tw.png"}]
            }
        });
        assert_eq!(thumbnail(&item).as_deref(), Some("https://og.png"));
        assert_eq!(thumbnail(&json!({})), None);
    }

    #[test]
    fn test_no_items_is_empty() {
        assert!(parse_items(&json!({"searchInformation": {"totalResults": "0"}})).is_empty());
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let provider = GoogleSearchProvider::new(SearchConfig::default()).unwrap();
        let result = provider.search("vaksin").await;
        assert_eq!(result, Err(SearchError::MissingCredentials));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let provider = GoogleSearchProvider::new(SearchConfig {
            api_key: "key".to_string(),
            engine_id: "cx".to_string(),
            endpoint: "http://localhost:99999/customsearch".to_string(),
            ..SearchConfig::default()
        })
        .unwrap();
        assert!(matches!(
            provider.search("vaksin").await,
            Err(SearchError::Communication(_))
        ));
    }
}
