//! Configuration for the claim analyzer

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`ClaimAnalyzer`](crate::ClaimAnalyzer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Use the generative model at all; `false` always takes the heuristic path
    pub ai_enabled: bool,

    /// Maximum time for one model call (seconds)
    pub ai_timeout_secs: u64,

    /// Maximum time for one page fetch (seconds)
    pub fetch_timeout_secs: u64,

    /// Maximum articles kept per scrape batch
    pub scrape_limit: usize,

    /// How many hit links are offered to the scraper
    pub scrape_candidates: usize,

    /// Page fetches in flight at once
    pub max_concurrent_fetches: usize,

    /// Scraped articles included in the prompt
    pub prompt_article_limit: usize,

    /// Cap on extracted article content (characters)
    pub content_max_chars: usize,
}

impl AnalyzerConfig {
    /// Model call timeout as a Duration
    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }

    /// Page fetch timeout as a Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let counts = [
            ("ai_timeout_secs", self.ai_timeout_secs as usize),
            ("fetch_timeout_secs", self.fetch_timeout_secs as usize),
            ("scrape_limit", self.scrape_limit),
            ("scrape_candidates", self.scrape_candidates),
            ("max_concurrent_fetches", self.max_concurrent_fetches),
            ("prompt_article_limit", self.prompt_article_limit),
            ("content_max_chars", self.content_max_chars),
        ];
        if let Some((name, _)) = counts.iter().find(|(_, value)| *value == 0) {
            return Err(format!("{} must be greater than 0", name));
        }
        if self.scrape_limit > self.scrape_candidates {
            return Err("scrape_limit cannot exceed scrape_candidates".to_string());
        }
        Ok(())
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            ai_enabled: true,
            ai_timeout_secs: 30,
            fetch_timeout_secs: 10,
            scrape_limit: 3,
            scrape_candidates: 5,
            max_concurrent_fetches: 3,
            prompt_article_limit: 3,
            content_max_chars: 3000,
        }
    }
}

impl AnalyzerConfig {
    /// Offline preset: heuristic verdicts only, no model calls
    pub fn offline() -> Self {
        Self {
            ai_enabled: false,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
