//! Klarifikasi LLM Provider Layer
//!
//! Implementations of the [`GenerativeModel`] trait from `klarifikasi-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Gemini `generateContent` API
//!
//! # Examples
//!
//! ```
//! use klarifikasi_domain::{Generation, GenerativeModel};
//! use klarifikasi_llm::MockProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let result = rt.block_on(provider.generate("test prompt")).unwrap();
//! assert_eq!(result, Generation::Text("Hello from LLM!".to_string()));
//! ```

#![warn(missing_docs)]

pub mod gemini;

use async_trait::async_trait;
use klarifikasi_domain::{Generation, GenerativeModel};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub use gemini::{GeminiConfig, GeminiProvider};
pub use klarifikasi_domain::LlmError;

/// Scripted behaviour for one prompt (or for all prompts by default)
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this generation
    Reply(Generation),

    /// Fail with this error
    Fail(LlmError),

    /// Never resolve; exercises caller-side timeouts
    Hang,
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
///
/// # Examples
///
/// ```
/// use klarifikasi_domain::{Generation, GenerativeModel};
/// use klarifikasi_llm::MockProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.add_blocked("prompt2", "SAFETY");
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// assert_eq!(
///     rt.block_on(provider.generate("prompt1")).unwrap(),
///     Generation::Text("response1".to_string())
/// );
/// assert_eq!(
///     rt.block_on(provider.generate("prompt2")).unwrap(),
///     Generation::Blocked("SAFETY".to_string())
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    name: String,
    configured: bool,
    default_reply: MockReply,
    replies: Arc<Mutex<HashMap<String, MockReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a MockProvider with a fixed text response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Reply(Generation::Text(response.into())))
    }

    /// Create a MockProvider with fixed behaviour for all prompts
    pub fn with_reply(reply: MockReply) -> Self {
        Self {
            name: "Mock AI".to_string(),
            configured: true,
            default_reply: reply,
            replies: Arc::new(Mutex::new(HashMap::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Mock that reports a content block for every prompt
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Reply(Generation::Blocked(reason.into())))
    }

    /// Mock that returns an empty candidate list for every prompt
    pub fn no_candidate() -> Self {
        Self::with_reply(MockReply::Reply(Generation::NoCandidate))
    }

    /// Mock that fails every call with `error`
    pub fn failing(error: LlmError) -> Self {
        Self::with_reply(MockReply::Fail(error))
    }

    /// Mock whose calls never complete
    pub fn hanging() -> Self {
        Self::with_reply(MockReply::Hang)
    }

    /// Override the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Simulate missing credentials
    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    /// Add a specific text response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.insert(prompt.into(), MockReply::Reply(Generation::Text(response.into())));
    }

    /// Add a block signal for a given prompt
    pub fn add_blocked(&mut self, prompt: impl Into<String>, reason: impl Into<String>) {
        self.insert(prompt.into(), MockReply::Reply(Generation::Blocked(reason.into())));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>, error: LlmError) {
        self.insert(prompt.into(), MockReply::Fail(error));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.clear();
        }
    }

    fn insert(&mut self, prompt: String, reply: MockReply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.insert(prompt, reply);
        }
    }

    fn reply_for(&self, prompt: &str) -> MockReply {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.replies
            .lock()
            .ok()
            .and_then(|replies| replies.get(prompt).cloned())
            .unwrap_or_else(|| self.default_reply.clone())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl GenerativeModel for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate(&self, prompt: &str) -> Result<Generation, LlmError> {
        match self.reply_for(prompt) {
            MockReply::Reply(generation) => Ok(generation),
            MockReply::Fail(error) => Err(error),
            MockReply::Hang => std::future::pending().await,
        }
    }
}
