//! Error taxonomy for the verification collaborators
//!
//! None of these escape the claim analyzer: fetch errors are skipped per URL,
//! search errors become "no hits", and model errors route to the heuristic path.

use thiserror::Error;

/// Why a single URL produced no article
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection, TLS or body-read failure
    #[error("Network error: {0}")]
    Network(String),

    /// The fetch did not finish in time
    #[error("Fetch timed out")]
    Timeout,

    /// Non-2xx response
    #[error("HTTP status {0}")]
    Status(u16),

    /// No selector in the cascade produced substantial text
    #[error("No article content found")]
    NoContent,

    /// Domain is known to block automated fetches
    #[error("Domain skipped: {0}")]
    Blocked(String),

    /// URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors from the generative-model call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Network failure or timeout
    #[error("Model unreachable: {0}")]
    Unreachable(String),

    /// Non-2xx response from the model API
    #[error("Model API returned HTTP {status}: {body}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body (possibly truncated)
        body: String,
    },

    /// 2xx response that could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing or unusable credentials
    #[error("Model not configured: {0}")]
    NotConfigured(String),
}

/// Errors from the search collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// API key or engine id missing
    #[error("Search credentials are not configured")]
    MissingCredentials,

    /// Network failure or timeout
    #[error("Unable to reach search API: {0}")]
    Communication(String),

    /// Non-2xx response
    #[error("Search API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message reported by the API
        message: String,
    },

    /// 2xx response that could not be decoded
    #[error("Invalid search response: {0}")]
    InvalidResponse(String),
}
