//! Types exposed by a verification run

use klarifikasi_domain::{ClaimVerdict, SearchHit};
use serde::{Deserialize, Serialize};

/// Message attached to a report when no search hits were available
pub const SEARCH_UNAVAILABLE_MESSAGE: &str =
    "Google Custom Search tidak tersedia, menampilkan fallback AI.";

/// Outcome of [`ClaimAnalyzer::verify`](crate::ClaimAnalyzer::verify)
///
/// One verdict document plus the hit list it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// The query as verified (trimmed)
    pub query: String,

    /// Search hits in ranking order (empty when search failed)
    pub results: Vec<SearchHit>,

    /// The verdict
    pub analysis: ClaimVerdict,

    /// Whether the verdict was produced without any search hits
    pub fallback: bool,

    /// Human-readable note for degraded runs
    pub message: Option<String>,
}
