//! Klarifikasi CLI - Command-line claim verification.

use clap::Parser;
use klarifikasi_cli::commands;
use klarifikasi_cli::{Cli, Command, Config, Formatter};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> klarifikasi_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref().map(Path::new))?;
    config.apply_overrides(&cli.overrides, cli.offline);
    config.validate()?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Check(args) => commands::execute_check(args, &config, &formatter).await?,
        Command::Analyze(args) => commands::execute_analyze(args, &config, &formatter).await?,
        Command::Scrape(args) => commands::execute_scrape(args, &config, &formatter).await?,
        Command::Config => commands::execute_config(&config, &formatter)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for JSON output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
