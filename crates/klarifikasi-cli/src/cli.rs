//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};

/// Klarifikasi - Check a claim against web sources.
#[derive(Debug, Parser)]
#[command(name = "klarifikasi")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Skip the generative model and use the heuristic only
    #[arg(long, global = true)]
    pub offline: bool,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Command,
}

/// Settings that environment variables or flags may override.
#[derive(Debug, Default, Args)]
pub struct Overrides {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub gemini_api_key: Option<String>,

    /// Gemini model identifier
    #[arg(long, env = "GEMINI_MODEL", global = true)]
    pub gemini_model: Option<String>,

    /// Google Custom Search API key
    #[arg(long, env = "GOOGLE_CSE_KEY", hide_env_values = true, global = true)]
    pub search_key: Option<String>,

    /// Google Custom Search engine id (cx)
    #[arg(long, env = "GOOGLE_CSE_CX", global = true)]
    pub search_cx: Option<String>,

    /// Enable or disable AI analysis (true/false)
    #[arg(long, env = "KLARIFIKASI_AI_ENABLED", global = true)]
    pub ai_enabled: Option<bool>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (verdict label only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search the web for a claim and verify it
    Check(CheckArgs),

    /// Verify a claim against search hits read from a file
    Analyze(AnalyzeArgs),

    /// Fetch one page and print the extracted article
    Scrape(ScrapeArgs),

    /// Show the effective configuration (secrets masked)
    Config,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Claim to verify
    pub claim: String,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Claim to verify
    pub claim: String,

    /// JSON file with a hit array or a raw Custom Search response
    #[arg(long)]
    pub hits: String,
}

/// Arguments for the scrape command.
#[derive(Debug, Parser)]
pub struct ScrapeArgs {
    /// Page URL
    pub url: String,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_command() {
        let cli = Cli::try_parse_from(["klarifikasi", "check", "Vaksin mengandung magnet"]).unwrap();
        match cli.command {
            Command::Check(args) => assert_eq!(args.claim, "Vaksin mengandung magnet"),
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_analyze_requires_hits() {
        assert!(Cli::try_parse_from(["klarifikasi", "analyze", "klaim"]).is_err());

        let cli =
            Cli::try_parse_from(["klarifikasi", "analyze", "klaim", "--hits", "hits.json"]).unwrap();
        match cli.command {
            Command::Analyze(args) => assert_eq!(args.hits, "hits.json"),
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "klarifikasi",
            "scrape",
            "https://example.com",
            "--format",
            "json",
            "--offline",
            "--no-color",
        ])
        .unwrap();
        assert!(cli.offline);
        assert!(cli.no_color);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }

    #[test]
    fn test_override_flags() {
        let cli = Cli::try_parse_from([
            "klarifikasi",
            "config",
            "--gemini-model",
            "gemini-1.5-pro",
            "--ai-enabled",
            "false",
        ])
        .unwrap();
        assert_eq!(cli.overrides.gemini_model.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(cli.overrides.ai_enabled, Some(false));
    }
}
