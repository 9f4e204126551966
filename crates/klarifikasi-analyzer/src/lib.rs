//! Klarifikasi Analyzer
//!
//! Turns a claim and its search hits into a [`ClaimVerdict`].
//!
//! # Overview
//!
//! The analyzer prefers a generative model, steered by a composed prompt and
//! read back through a tolerant response interpreter. Whenever that path is
//! disabled, unconfigured, unreachable or unusable, a deterministic heuristic
//! produces a verdict of the same shape from search metadata and scraped
//! article text.
//!
//! # Architecture
//!
//! ```text
//! claim + hits → SourceScraper → PromptComposer → model → ResponseInterpreter → verdict
//!                                                   │
//!                                                   └─ any failure → HeuristicSynthesizer
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use klarifikasi_analyzer::{AnalyzerConfig, ClaimAnalyzer};
//! use klarifikasi_llm::MockProvider;
//! use klarifikasi_scraper::HtmlFetcher;
//! use klarifikasi_search::StaticSearchProvider;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = ClaimAnalyzer::new(
//!     Arc::new(StaticSearchProvider::new(Vec::new())),
//!     Arc::new(MockProvider::new(r#"{"verdict": "Terbantah", "explanation": "..."}"#)),
//!     Arc::new(HtmlFetcher::new()?),
//!     AnalyzerConfig::default(),
//! )?;
//!
//! let report = analyzer.verify("Vaksin X menyebabkan magnet").await;
//! println!("{}: {}", report.analysis.verdict, report.analysis.explanation);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
mod error;
mod heuristic;
mod parser;
mod prompt;
mod types;

#[cfg(test)]
mod tests;

pub use analyzer::ClaimAnalyzer;
pub use config::AnalyzerConfig;
pub use error::AnalyzerError;
pub use heuristic::{synthesize_with_articles, HeuristicSynthesizer};
pub use parser::{
    clean_response, interpret, locate_json, normalize_social_links, parse_free_text,
    repair_truncated_json,
};
pub use prompt::{compose, PromptComposer};
pub use types::{VerificationReport, SEARCH_UNAVAILABLE_MESSAGE};

pub use klarifikasi_domain::{ClaimVerdict, Confidence, SearchHit, Verdict};
