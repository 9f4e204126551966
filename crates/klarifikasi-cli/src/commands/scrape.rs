//! Scrape command implementation.

use super::html_fetcher;
use crate::cli::ScrapeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use klarifikasi_domain::{ArticleFetcher, FetchError};
use klarifikasi_scraper::should_skip_url;

/// Execute the scrape command.
pub async fn execute_scrape(args: ScrapeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    check_url(&args.url)?;

    let fetcher = html_fetcher(config)?;
    let article = fetcher.fetch(&args.url).await?;

    println!("{}", formatter.format_article(&article)?);
    Ok(())
}

/// Reject URLs the verification pipeline would never fetch.
pub fn check_url(url: &str) -> std::result::Result<(), FetchError> {
    let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
    if should_skip_url(url) {
        let host = parsed.host_str().unwrap_or(url).to_string();
        return Err(FetchError::Blocked(host));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_url() {
        assert!(check_url("https://www.kemkes.go.id/berita").is_ok());
        assert_eq!(
            check_url("https://m.facebook.com/post/1"),
            Err(FetchError::Blocked("m.facebook.com".to_string()))
        );
        assert!(matches!(check_url("bukan url"), Err(FetchError::InvalidUrl(_))));
    }
}
