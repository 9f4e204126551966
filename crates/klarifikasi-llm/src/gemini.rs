//! Gemini Provider Implementation
//!
//! Calls Google's `generateContent` endpoint with a single text prompt and a
//! fixed, low-temperature generation configuration.
//!
//! # Features
//!
//! - Async HTTP communication with the Gemini API
//! - Configurable endpoint, model and timeout
//! - Distinguishes candidate text, explicit content blocks and empty answers
//! - No automatic retries; a timeout is reported as `Unreachable`
//!
//! # Examples
//!
//! ```no_run
//! use klarifikasi_llm::{GeminiConfig, GeminiProvider};
//!
//! let config = GeminiConfig {
//!     api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
//!     ..GeminiConfig::default()
//! };
//! let provider = GeminiProvider::new(config).unwrap();
//! ```

use async_trait::async_trait;
use klarifikasi_domain::text::{mask_secret, take_chars};
use klarifikasi_domain::{Generation, GenerativeModel, LlmError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default timeout for LLM requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Keys shorter than this are treated as misconfigured
pub const MIN_API_KEY_LEN: usize = 20;

/// Harm categories that get the same blocking threshold
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

/// Configuration for [`GeminiProvider`]
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key (sent as `x-goog-api-key`)
    #[serde(default)]
    pub api_key: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Whole-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Output-token cap; long answers may come back truncated
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_output_tokens() -> u32 {
    1024
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl GeminiConfig {
    /// Whether the API key is long enough to be real
    pub fn has_usable_key(&self) -> bool {
        self.api_key.trim().len() >= MIN_API_KEY_LEN
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &mask_secret(&self.api_key))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

/// Gemini API provider
pub struct GeminiProvider {
    config: GeminiConfig,
    client: reqwest::Client,
}

/// Request body for the generateContent API
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Errors
    ///
    /// Returns `LlmError::NotConfigured` if the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::NotConfigured(format!("HTTP client: {}", e)))?;

        info!(
            model = %config.model,
            api_key = %mask_secret(&config.api_key),
            "Gemini provider initialized"
        );
        if !config.has_usable_key() {
            warn!("Gemini API key is missing or too short; AI analysis will be skipped");
        }

        Ok(Self { config, client })
    }

    /// The model identifier in use
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                top_k: 1,
                top_p: 1.0,
                max_output_tokens: self.config.max_output_tokens,
            },
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: SAFETY_THRESHOLD,
                })
                .collect(),
        }
    }
}

/// Classify a 2xx `generateContent` response body.
///
/// All text parts of the first candidate are concatenated. Blank text means
/// either an explicit block (`promptFeedback.blockReason`) or no candidate.
pub fn interpret_response(body: &Value) -> Generation {
    let text: String = body
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if !text.trim().is_empty() {
        return Generation::Text(text);
    }

    let block_reason = body
        .pointer("/promptFeedback/blockReason")
        .and_then(Value::as_str)
        .or_else(|| {
            // A candidate stopped by the safety filter carries no text either
            body.pointer("/candidates/0/finishReason")
                .and_then(Value::as_str)
                .filter(|reason| *reason == "SAFETY" || *reason == "PROHIBITED_CONTENT")
        });

    match block_reason {
        Some(reason) => Generation::Blocked(reason.to_string()),
        None => Generation::NoCandidate,
    }
}

#[async_trait]
impl GenerativeModel for GeminiProvider {
    fn name(&self) -> &str {
        "Gemini AI"
    }

    fn is_configured(&self) -> bool {
        self.config.has_usable_key()
    }

    async fn generate(&self, prompt: &str) -> Result<Generation, LlmError> {
        debug!(prompt_chars = prompt.chars().count(), "Sending request to Gemini API");

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Unreachable("request timed out".to_string())
                } else {
                    LlmError::Unreachable(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        info!(status = status.as_u16(), "Gemini API responded");

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Server {
                status: status.as_u16(),
                body: take_chars(&body, 500),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let generation = interpret_response(&body);
        match &generation {
            Generation::Text(text) => debug!(chars = text.chars().count(), "Gemini returned text"),
            Generation::Blocked(reason) => warn!(%reason, "Gemini blocked the prompt"),
            Generation::NoCandidate => warn!("Gemini returned no analysable candidates"),
        }
        Ok(generation)
    }
}
