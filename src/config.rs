//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.workshop-pulse.toml` files.

use crate::cli::Theme;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".workshop-pulse.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Survey source settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// Dashboard settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory timestamped reports are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            verbose: false,
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}

/// Where responses are read from when the CLI names no source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Local CSV or JSON export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    /// Published CSV export URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_url: Option<String>,

    /// Request timeout in seconds for the sheet URL.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            input: None,
            sheet_url: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Feedback quotes shown as testimonials.
    #[serde(default = "default_testimonials")]
    pub testimonials: usize,

    /// Commitments shown as action items.
    #[serde(default = "default_action_items")]
    pub action_items: usize,

    /// Facilitator strengths listed.
    #[serde(default = "default_strengths")]
    pub strengths: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            testimonials: default_testimonials(),
            action_items: default_action_items(),
            strengths: default_strengths(),
        }
    }
}

fn default_testimonials() -> usize {
    5
}

fn default_action_items() -> usize {
    5
}

fn default_strengths() -> usize {
    6
}

/// Interactive dashboard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Initial color theme.
    #[serde(default)]
    pub theme: Theme,

    /// Praise quotes and suggestions shown in the summary view.
    #[serde(default = "default_dashboard_quotes")]
    pub quotes: usize,

    /// Commitments shown in the summary view.
    #[serde(default = "default_dashboard_actions")]
    pub action_items: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            quotes: default_dashboard_quotes(),
            action_items: default_dashboard_actions(),
        }
    }
}

fn default_dashboard_quotes() -> usize {
    5
}

fn default_dashboard_actions() -> usize {
    4
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        // An explicit source on the CLI replaces whatever the file named
        if let Some(ref input) = args.input {
            self.source.input = Some(input.display().to_string());
            self.source.sheet_url = None;
        } else if let Some(ref url) = args.sheet_url {
            self.source.sheet_url = Some(url.clone());
            self.source.input = None;
        }

        if let Some(timeout) = args.timeout {
            self.source.timeout_seconds = timeout;
        }

        if let Some(ref dir) = args.output_dir {
            self.general.output_dir = dir.display().to_string();
        }

        if let Some(theme) = args.theme {
            self.dashboard.theme = theme;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Output directory as a path.
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.general.output_dir)
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Args, OutputFormat};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.report.testimonials, 5);
        assert_eq!(config.report.action_items, 5);
        assert_eq!(config.report.strengths, 6);
        assert_eq!(config.dashboard.quotes, 5);
        assert_eq!(config.dashboard.action_items, 4);
        assert_eq!(config.dashboard.theme, Theme::Dark);
        assert!(config.source.input.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output_dir = "reports"
verbose = true

[source]
sheet_url = "https://example.com/export.csv"
timeout_seconds = 10

[report]
testimonials = 3

[dashboard]
theme = "light"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output_dir, "reports");
        assert!(config.general.verbose);
        assert_eq!(
            config.source.sheet_url.as_deref(),
            Some("https://example.com/export.csv")
        );
        assert_eq!(config.source.timeout_seconds, 10);
        assert_eq!(config.report.testimonials, 3);
        assert_eq!(config.report.action_items, 5);
        assert_eq!(config.dashboard.theme, Theme::Light);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[report]\nstrengths = 3\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.report.strengths, 3);

        std::fs::write(&path, "[report\nbroken").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_merge_with_args() {
        let mut config: Config =
            toml::from_str("[source]\nsheet_url = \"https://example.com/a.csv\"\n").unwrap();

        let args = Args {
            input: Some(PathBuf::from("responses.csv")),
            sheet_url: None,
            sample: false,
            dashboard: false,
            format: OutputFormat::Markdown,
            workshop: None,
            background: None,
            output: None,
            output_dir: Some(PathBuf::from("out")),
            print: false,
            timeout: Some(5),
            theme: Some(Theme::Light),
            config: None,
            verbose: true,
            quiet: false,
            init_config: false,
        };
        config.merge_with_args(&args);

        assert_eq!(config.source.input.as_deref(), Some("responses.csv"));
        assert!(config.source.sheet_url.is_none());
        assert_eq!(config.source.timeout_seconds, 5);
        assert_eq!(config.output_dir(), PathBuf::from("out"));
        assert_eq!(config.dashboard.theme, Theme::Light);
        assert!(config.general.verbose);
    }

    #[test]
    fn test_verbose_config_drives_log_level() {
        let config: Config = toml::from_str("[general]\nverbose = true\n").unwrap();
        let mut args = Args {
            input: None,
            sheet_url: None,
            sample: true,
            dashboard: false,
            format: OutputFormat::Markdown,
            workshop: None,
            background: None,
            output: None,
            output_dir: None,
            print: false,
            timeout: None,
            theme: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        };

        assert_eq!(
            args.log_level(config.general.verbose),
            tracing::Level::DEBUG
        );
        assert_eq!(
            args.log_level(Config::default().general.verbose),
            tracing::Level::INFO
        );

        args.quiet = true;
        assert_eq!(
            args.log_level(config.general.verbose),
            tracing::Level::ERROR
        );
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[source]"));
        assert!(toml_str.contains("[report]"));
        assert!(toml_str.contains("[dashboard]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.report.strengths, 6);
    }
}
