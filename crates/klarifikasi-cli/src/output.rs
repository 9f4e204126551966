//! Output formatting for the CLI.

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use klarifikasi_analyzer::VerificationReport;
use klarifikasi_domain::text::truncate_with_ellipsis;
use klarifikasi_domain::{ClaimVerdict, ScrapedArticle, SearchHit, Verdict};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const TITLE_WIDTH: usize = 60;
const LINK_WIDTH: usize = 70;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a full verification run.
    pub fn format_report(&self, report: &VerificationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(report.analysis.verdict.label().to_string()),
            OutputFormat::Table => {
                let mut out = self.verdict_block(&report.analysis);
                if let Some(message) = &report.message {
                    out.push_str("\n\n");
                    out.push_str(&self.warning(message));
                }
                out.push_str("\n\n");
                out.push_str(&self.hits_table(&report.results));
                Ok(out)
            }
        }
    }

    /// Format a verdict produced from caller-supplied hits.
    pub fn format_verdict(&self, verdict: &ClaimVerdict, hits: &[SearchHit]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(verdict)?),
            OutputFormat::Quiet => Ok(verdict.verdict.label().to_string()),
            OutputFormat::Table => {
                let mut out = self.verdict_block(verdict);
                out.push_str("\n\n");
                out.push_str(&self.hits_table(hits));
                Ok(out)
            }
        }
    }

    /// Format one extracted article.
    pub fn format_article(&self, article: &ScrapedArticle) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(article)?),
            OutputFormat::Quiet => Ok(article.content.clone()),
            OutputFormat::Table => {
                let unknown = "-".to_string();
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["URL", article.url.as_str()]);
                builder.push_record(["Title", article.title.as_str()]);
                builder.push_record([
                    "Date",
                    article.published_date.as_ref().unwrap_or(&unknown).as_str(),
                ]);
                builder.push_record(["Author", article.author.as_ref().unwrap_or(&unknown).as_str()]);
                builder.push_record(["Words", article.word_count.to_string().as_str()]);

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                let summary = self.success(&format!("Extracted {} words", article.word_count));
                Ok(format!("{}\n{}\n\n{}", summary, table, article.content))
            }
        }
    }

    /// Format the effective configuration (caller masks secrets).
    pub fn format_config(&self, config: &Config) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
            OutputFormat::Table | OutputFormat::Quiet => config.to_toml(),
        }
    }

    fn verdict_block(&self, verdict: &ClaimVerdict) -> String {
        let header = format!(
            "{}  (confidence: {})",
            verdict.verdict.label(),
            verdict.confidence.label()
        );
        let header = match verdict.verdict {
            Verdict::Validated => self.colorize(&header, "green"),
            Verdict::Refuted => self.colorize(&header, "red"),
            Verdict::NeedsVerification => self.colorize(&header, "yellow"),
        };

        let mut out = format!("{}\nClaim: {}\n", header, verdict.claim);
        if let Some(error) = &verdict.error {
            out.push('\n');
            out.push_str(&self.error(error));
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.colorize("Explanation", "cyan"));
        out.push('\n');
        out.push_str(&verdict.explanation);

        if !verdict.analysis.trim().is_empty() {
            out.push_str("\n\n");
            out.push_str(&self.colorize("Analysis", "cyan"));
            out.push('\n');
            out.push_str(&verdict.analysis);
        }
        if !verdict.sources_used.is_empty() {
            out.push_str("\n\n");
            out.push_str(&self.info(&format!("Sources: {}", verdict.sources_display())));
        }
        out
    }

    fn hits_table(&self, hits: &[SearchHit]) -> String {
        if hits.is_empty() {
            return self.colorize("No search results.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Domain", "Title", "Link"]);

        for (index, hit) in hits.iter().enumerate() {
            builder.push_record([
                (index + 1).to_string(),
                hit.display_domain.clone(),
                truncate_with_ellipsis(&hit.title, TITLE_WIDTH),
                truncate_with_ellipsis(&hit.link, LINK_WIDTH),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().bold().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klarifikasi_domain::Confidence;

    fn create_test_verdict() -> ClaimVerdict {
        ClaimVerdict::new(
            "Vaksin mengandung magnet",
            Verdict::Refuted,
            Confidence::High,
            "**Analisa Klaim**: Klaim tidak didukung data.",
            "### Ringkasan Verifikasi Data\n- 3 sumber relevan",
        )
        .with_sources(["kemkes.go.id", "cekfakta.com"])
    }

    fn create_test_report(hits: Vec<SearchHit>) -> VerificationReport {
        let fallback = hits.is_empty();
        VerificationReport {
            query: "Vaksin mengandung magnet".to_string(),
            results: hits,
            analysis: create_test_verdict(),
            fallback,
            message: fallback.then(|| "Google Custom Search tidak tersedia".to_string()),
        }
    }

    fn hit() -> SearchHit {
        SearchHit::new(
            "Hoaks vaksin magnet",
            "Kemenkes membantah",
            "https://www.kemkes.go.id/hoaks",
            "www.kemkes.go.id",
        )
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_report(&create_test_report(vec![hit()])).unwrap();

        let parsed: VerificationReport = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.analysis.verdict, Verdict::Refuted);
        assert!(!parsed.fallback);
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_report(&create_test_report(vec![])).unwrap();
        assert_eq!(output, Verdict::Refuted.label());
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&create_test_report(vec![hit()])).unwrap();

        assert!(output.starts_with(Verdict::Refuted.label()));
        assert!(output.contains(Confidence::High.label()));
        assert!(output.contains("Claim: Vaksin mengandung magnet"));
        assert!(output.contains("### Ringkasan Verifikasi Data"));
        assert!(output.contains("Sources: kemkes.go.id, cekfakta.com"));
        assert!(output.contains("www.kemkes.go.id"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_table_fallback_message() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&create_test_report(vec![])).unwrap();
        assert!(output.contains("⚠ Google Custom Search tidak tersedia"));
        assert!(output.contains("No search results."));
    }

    #[test]
    fn test_failure_verdict_shows_error() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let verdict = create_test_verdict().into_failure("Analisis diblokir.", "Model memblokir");
        let output = formatter.format_verdict(&verdict, &[]).unwrap();
        assert!(output.contains("✗ Model memblokir"));
        assert!(output.contains("Analisis diblokir."));
    }

    #[test]
    fn test_article_format() {
        let article = ScrapedArticle::new(
            "https://berita.id/a",
            "Judul",
            "Isi artikel yang cukup panjang.",
            "2024-01-02",
            "",
        );

        let table = Formatter::new(OutputFormat::Table, false).format_article(&article).unwrap();
        assert!(table.starts_with("✓ Extracted 5 words\n"));
        assert!(table.contains("2024-01-02"));
        assert!(table.ends_with("Isi artikel yang cukup panjang."));

        let quiet = Formatter::new(OutputFormat::Quiet, false).format_article(&article).unwrap();
        assert_eq!(quiet, "Isi artikel yang cukup panjang.");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.warning("done"), "⚠ done");
    }
}
