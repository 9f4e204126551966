//! Error types for the analyzer stages
//!
//! These never leave [`ClaimAnalyzer::analyze`](crate::ClaimAnalyzer::analyze);
//! they tell the orchestration which branch to take.

use klarifikasi_domain::LlmError;
use thiserror::Error;

/// Errors between analyzer stages
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Model text could not be turned into a verdict
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generative model failure
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for AnalyzerError {
    fn from(e: serde_json::Error) -> Self {
        AnalyzerError::Json(e.to_string())
    }
}
