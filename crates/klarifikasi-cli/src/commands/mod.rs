//! Command implementations.

pub mod analyze;
pub mod check;
pub mod config;
pub mod scrape;

pub use self::analyze::execute_analyze;
pub use self::check::execute_check;
pub use self::config::execute_config;
pub use self::scrape::execute_scrape;

use crate::config::Config;
use crate::error::{CliError, Result};
use klarifikasi_analyzer::ClaimAnalyzer;
use klarifikasi_domain::SearchProvider;
use klarifikasi_llm::GeminiProvider;
use klarifikasi_scraper::HtmlFetcher;
use std::sync::Arc;

/// Shortest accepted claim, in characters after trimming
pub const MIN_CLAIM_CHARS: usize = 3;

/// Longest accepted claim, in characters after trimming
pub const MAX_CLAIM_CHARS: usize = 255;

/// Trim a claim and check its length.
pub fn validate_claim(claim: &str) -> Result<String> {
    let claim = claim.trim();
    let length = claim.chars().count();
    if length < MIN_CLAIM_CHARS {
        return Err(CliError::InvalidInput(format!(
            "Claim must be at least {} characters",
            MIN_CLAIM_CHARS
        )));
    }
    if length > MAX_CLAIM_CHARS {
        return Err(CliError::InvalidInput(format!(
            "Claim must be at most {} characters (got {})",
            MAX_CLAIM_CHARS, length
        )));
    }
    Ok(claim.to_string())
}

/// Page fetcher honouring the analyzer's timeout and content cap.
pub(crate) fn html_fetcher(config: &Config) -> Result<HtmlFetcher> {
    Ok(HtmlFetcher::with_options(
        config.analyzer.fetch_timeout(),
        config.analyzer.content_max_chars,
    )?)
}

/// Wire the Gemini model and the HTML fetcher around `search`.
pub(crate) fn build_analyzer<S>(
    search: Arc<S>,
    config: &Config,
) -> Result<ClaimAnalyzer<S, GeminiProvider, HtmlFetcher>>
where
    S: SearchProvider + ?Sized,
{
    let model = GeminiProvider::new(config.gemini.clone())?;
    let fetcher = html_fetcher(config)?;
    Ok(ClaimAnalyzer::new(
        search,
        Arc::new(model),
        Arc::new(fetcher),
        config.analyzer.clone(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_is_trimmed() {
        assert_eq!(validate_claim("  Bumi itu datar \n").unwrap(), "Bumi itu datar");
    }

    #[test]
    fn test_claim_too_short() {
        assert!(matches!(validate_claim("  ab  "), Err(CliError::InvalidInput(_))));
        assert!(validate_claim("abc").is_ok());
    }

    #[test]
    fn test_claim_too_long() {
        assert!(validate_claim(&"a".repeat(255)).is_ok());
        assert!(matches!(
            validate_claim(&"a".repeat(256)),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_claim_length_counts_characters() {
        assert!(validate_claim(&"é".repeat(255)).is_ok());
    }
}
