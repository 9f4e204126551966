//! Configuration management for the CLI.

use crate::cli::Overrides;
use crate::error::{CliError, Result};
use klarifikasi_analyzer::AnalyzerConfig;
use klarifikasi_domain::text::mask_secret;
use klarifikasi_llm::GeminiConfig;
use klarifikasi_search::SearchConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Verification pipeline settings
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Gemini credentials and model
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Google Custom Search credentials
    #[serde(default)]
    pub search: SearchConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".klarifikasi").join("config.toml"))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::path()?,
        };

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment/flag overrides, then `--offline`.
    pub fn apply_overrides(&mut self, overrides: &Overrides, offline: bool) {
        if let Some(key) = &overrides.gemini_api_key {
            self.gemini.api_key = key.clone();
        }
        if let Some(model) = &overrides.gemini_model {
            self.gemini.model = model.clone();
        }
        if let Some(key) = &overrides.search_key {
            self.search.api_key = key.clone();
        }
        if let Some(cx) = &overrides.search_cx {
            self.search.engine_id = cx.clone();
        }
        if let Some(enabled) = overrides.ai_enabled {
            self.analyzer.ai_enabled = enabled;
        }
        if offline {
            self.analyzer.ai_enabled = false;
        }
    }

    /// Check the analyzer section.
    pub fn validate(&self) -> Result<()> {
        self.analyzer.validate().map_err(CliError::Config)
    }

    /// Copy with every secret masked, for display.
    pub fn masked(&self) -> Self {
        let mut masked = self.clone();
        masked.gemini.api_key = mask_secret(&self.gemini.api_key);
        masked.search.api_key = mask_secret(&self.search.api_key);
        masked
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
