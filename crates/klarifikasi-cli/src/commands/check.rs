//! Check command implementation.

use super::{build_analyzer, validate_claim};
use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use klarifikasi_search::GoogleSearchProvider;
use std::sync::Arc;
use tracing::warn;

/// Execute the check command.
pub async fn execute_check(args: CheckArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let claim = validate_claim(&args.claim)?;

    if !config.search.has_credentials() {
        warn!("Search credentials missing; the verdict will rest on the claim alone");
    }

    let search = GoogleSearchProvider::new(config.search.clone())?;
    let analyzer = build_analyzer(Arc::new(search), config)?;
    let report = analyzer.verify(&claim).await;

    println!("{}", formatter.format_report(&report)?);
    Ok(())
}
