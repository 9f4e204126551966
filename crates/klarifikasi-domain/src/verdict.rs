//! Verdict module - the sole output type of claim verification
//!
//! Both the generative path and the heuristic path produce a [`ClaimVerdict`]
//! with identical shape, so downstream consumers never branch on provenance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of entries in [`ClaimVerdict::sources_used`]
pub const MAX_SOURCES: usize = 5;

/// Three-way classification of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Verdict {
    /// Sources support the claim
    #[serde(rename = "Tervalidasi")]
    Validated,

    /// Sources contradict the claim or label it a hoax
    #[serde(rename = "Terbantah")]
    Refuted,

    /// Evidence is insufficient either way
    #[default]
    #[serde(rename = "Perlu Verifikasi")]
    NeedsVerification,
}

impl Verdict {
    /// Display label, matching the literal the model is instructed to emit
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Validated => "Tervalidasi",
            Verdict::Refuted => "Terbantah",
            Verdict::NeedsVerification => "Perlu Verifikasi",
        }
    }

    /// Parse a verdict literal (internal use)
    ///
    /// Accepts the display labels and the English variant names, ignoring case,
    /// surrounding whitespace and `_`/`-`/space differences.
    pub fn parse(s: &str) -> Option<Self> {
        match normalize_literal(s).as_str() {
            "tervalidasi" | "valid" | "validated" | "benar" => Some(Verdict::Validated),
            "terbantah" | "refuted" | "hoaks" | "hoax" | "salah" => Some(Verdict::Refuted),
            "perlu verifikasi" | "memerlukan verifikasi" | "needs verification"
            | "needsverification" => Some(Verdict::NeedsVerification),
            _ => None,
        }
    }

    /// Parse a verdict literal, falling back to `NeedsVerification`
    pub fn from_literal(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How much the available evidence supports the verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Confidence {
    /// Little or inconsistent evidence
    #[default]
    #[serde(rename = "Rendah")]
    Low,

    /// Some consistent evidence
    #[serde(rename = "Sedang")]
    Medium,

    /// Strong, consistent evidence across sources
    #[serde(rename = "Tinggi")]
    High,
}

impl Confidence {
    /// Display label, matching the literal the model is instructed to emit
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::High => "Tinggi",
            Confidence::Medium => "Sedang",
            Confidence::Low => "Rendah",
        }
    }

    /// Parse a confidence literal (internal use)
    pub fn parse(s: &str) -> Option<Self> {
        match normalize_literal(s).as_str() {
            "tinggi" | "high" => Some(Confidence::High),
            "sedang" | "medium" => Some(Confidence::Medium),
            "rendah" | "low" => Some(Confidence::Low),
            _ => None,
        }
    }

    /// Parse a confidence literal, falling back to `Low`
    pub fn from_literal(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// Confidence bucket for a count of relevant search hits
    pub fn from_relevant_count(count: usize) -> Self {
        if count >= 4 {
            Confidence::High
        } else if count >= 2 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize_literal(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Structured verdict for one claim
///
/// Invariants upheld by the constructors:
/// - `explanation` is never empty
/// - `sources_used` holds at most [`MAX_SOURCES`] distinct, non-empty entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimVerdict {
    /// Whether a substantive analysis was produced
    pub success: bool,

    /// Three-way classification
    pub verdict: Verdict,

    /// Evidence strength
    pub confidence: Confidence,

    /// Short narrative answer
    pub explanation: String,

    /// Detailed analysis (markdown)
    pub analysis: String,

    /// Source labels the verdict relied on, in order of first mention
    pub sources_used: Vec<String>,

    /// The claim as submitted
    pub claim: String,

    /// Error description when something upstream failed visibly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Explanation used when a constructor is handed an empty one
pub const DEFAULT_EXPLANATION: &str = "Tidak dapat menganalisis klaim ini dengan pasti.";

impl ClaimVerdict {
    /// Create a successful verdict with no sources
    pub fn new(
        claim: impl Into<String>,
        verdict: Verdict,
        confidence: Confidence,
        explanation: impl Into<String>,
        analysis: impl Into<String>,
    ) -> Self {
        let explanation = explanation.into();
        let explanation = if explanation.trim().is_empty() {
            DEFAULT_EXPLANATION.to_string()
        } else {
            explanation
        };

        Self {
            success: true,
            verdict,
            confidence,
            explanation,
            analysis: analysis.into(),
            sources_used: Vec::new(),
            claim: claim.into(),
            error: None,
        }
    }

    /// Set sources, dropping blanks and duplicates and capping at [`MAX_SOURCES`]
    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for source in sources {
            let source = source.into().trim().to_string();
            if source.is_empty() || unique.contains(&source) {
                continue;
            }
            unique.push(source);
            if unique.len() == MAX_SOURCES {
                break;
            }
        }
        self.sources_used = unique;
        self
    }

    /// Mark the verdict as a visible failure, keeping the verdict usable
    pub fn into_failure(
        mut self,
        explanation: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let explanation = explanation.into();
        if !explanation.trim().is_empty() {
            self.explanation = explanation;
        }
        self.success = false;
        self.error = Some(error.into());
        self
    }

    /// Sources joined for display ("a, b, c")
    pub fn sources_display(&self) -> String {
        self.sources_used.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_verdict_literals() {
        assert_eq!(Verdict::from_literal("Tervalidasi"), Verdict::Validated);
        assert_eq!(Verdict::from_literal("  terbantah "), Verdict::Refuted);
        assert_eq!(Verdict::from_literal("Perlu Verifikasi"), Verdict::NeedsVerification);
        assert_eq!(Verdict::from_literal("PERLU_VERIFIKASI"), Verdict::NeedsVerification);
        assert_eq!(Verdict::from_literal("NeedsVerification"), Verdict::NeedsVerification);
    }

    #[test]
    fn test_unknown_verdict_defaults() {
        assert_eq!(Verdict::parse("mungkin"), None);
        assert_eq!(Verdict::from_literal("mungkin"), Verdict::NeedsVerification);
        assert_eq!(Verdict::from_literal(""), Verdict::NeedsVerification);
    }

    #[test]
    fn test_confidence_literals() {
        assert_eq!(Confidence::from_literal("Tinggi"), Confidence::High);
        assert_eq!(Confidence::from_literal("sedang"), Confidence::Medium);
        assert_eq!(Confidence::from_literal("RENDAH"), Confidence::Low);
        assert_eq!(Confidence::from_literal("sangat tinggi"), Confidence::Low);
    }

    #[test]
    fn test_confidence_from_relevant_count() {
        assert_eq!(Confidence::from_relevant_count(0), Confidence::Low);
        assert_eq!(Confidence::from_relevant_count(1), Confidence::Low);
        assert_eq!(Confidence::from_relevant_count(2), Confidence::Medium);
        assert_eq!(Confidence::from_relevant_count(3), Confidence::Medium);
        assert_eq!(Confidence::from_relevant_count(4), Confidence::High);
    }

    #[test]
    fn test_serialized_labels() {
        let verdict = ClaimVerdict::new("klaim", Verdict::Refuted, Confidence::High, "x", "y");
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["verdict"], "Terbantah");
        assert_eq!(json["confidence"], "Tinggi");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_empty_explanation_replaced() {
        let verdict = ClaimVerdict::new("klaim", Verdict::Validated, Confidence::Low, "  ", "");
        assert_eq!(verdict.explanation, DEFAULT_EXPLANATION);
    }

    #[test]
    fn test_sources_deduplicated_and_capped() {
        let verdict = ClaimVerdict::new("k", Verdict::Refuted, Confidence::Low, "e", "a")
            .with_sources(["a.go.id", "b.com", "a.go.id", "", "c.com", "d.com", "e.com", "f.com"]);
        assert_eq!(verdict.sources_used, vec!["a.go.id", "b.com", "c.com", "d.com", "e.com"]);
        assert_eq!(verdict.sources_display(), "a.go.id, b.com, c.com, d.com, e.com");
    }

    #[test]
    fn test_into_failure_keeps_verdict() {
        let verdict = ClaimVerdict::new("k", Verdict::Refuted, Confidence::Medium, "e", "a")
            .into_failure("Analisis diblokir.", "blocked: SAFETY");
        assert!(!verdict.success);
        assert_eq!(verdict.verdict, Verdict::Refuted);
        assert_eq!(verdict.explanation, "Analisis diblokir.");
        assert_eq!(verdict.error.as_deref(), Some("blocked: SAFETY"));
    }

    proptest! {
        #[test]
        fn prop_sources_invariants(sources in proptest::collection::vec("[a-c]{0,2}", 0..12)) {
            let verdict = ClaimVerdict::new("k", Verdict::Refuted, Confidence::Low, "e", "a")
                .with_sources(sources);
            prop_assert!(verdict.sources_used.len() <= MAX_SOURCES);
            let mut seen = std::collections::HashSet::new();
            for s in &verdict.sources_used {
                prop_assert!(!s.is_empty());
                prop_assert!(seen.insert(s.clone()));
            }
        }
    }
}
