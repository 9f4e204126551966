//! Error types for the CLI application.

use klarifikasi_domain::{FetchError, LlmError, SearchError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analyzer could not be assembled
    #[error("Analyzer error: {0}")]
    Analyzer(#[from] klarifikasi_analyzer::AnalyzerError),

    /// Page could not be fetched or extracted
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Search client could not be built
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// Model client could not be built
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
