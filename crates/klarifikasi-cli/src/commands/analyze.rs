//! Analyze command implementation.

use super::{build_analyzer, validate_claim};
use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use klarifikasi_domain::{ClaimVerdict, SearchHit};
use klarifikasi_search::google::parse_items;
use klarifikasi_search::StaticSearchProvider;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Execute the analyze command.
pub async fn execute_analyze(
    args: AnalyzeArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let (verdict, hits) = analyze_file(&args.claim, Path::new(&args.hits), config).await?;
    println!("{}", formatter.format_verdict(&verdict, &hits)?);
    Ok(())
}

/// Read hits from `path` and analyze `claim` against them.
pub async fn analyze_file(
    claim: &str,
    path: &Path,
    config: &Config,
) -> Result<(ClaimVerdict, Vec<SearchHit>)> {
    let claim = validate_claim(claim)?;
    let hits = parse_hits(&fs::read_to_string(path)?)?;
    info!(path = %path.display(), hits = hits.len(), "Loaded search hits");

    let analyzer = build_analyzer(Arc::new(StaticSearchProvider::new(Vec::new())), config)?;
    let verdict = analyzer.analyze(&claim, &hits).await;
    Ok((verdict, hits))
}

/// Accept either a JSON array of hits or a raw Custom Search response.
pub fn parse_hits(contents: &str) -> Result<Vec<SearchHit>> {
    let value: Value = serde_json::from_str(contents)?;
    if value.is_object() {
        return Ok(parse_items(&value));
    }
    Ok(serde_json::from_value(value)?)
}
