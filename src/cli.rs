//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation, default values and the workshop menu.

use crate::survey::schema::WORKSHOPS;
use clap::Parser;
use std::path::PathBuf;
use tracing::warn;

/// Workshop Pulse - facilitator reports from workshop feedback surveys
///
/// Turns survey responses into confidence, facilitator, pacing and
/// hands-on metrics, a health score and a next-step recommendation.
///
/// Examples:
///   workshop-pulse --input responses.csv
///   workshop-pulse --input responses.json --workshop 2 --format html
///   workshop-pulse --sheet-url https://example.com/export.csv --dashboard
///   workshop-pulse --sample --dashboard
///   workshop-pulse --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Local survey export to analyze (.csv or .json)
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["sheet_url", "sample"])]
    pub input: Option<PathBuf>,

    /// Published CSV export URL of the survey sheet
    #[arg(long, value_name = "URL", env = "WORKSHOP_PULSE_SHEET_URL", conflicts_with = "sample")]
    pub sheet_url: Option<String>,

    /// Use the built-in illustrative dataset
    #[arg(long)]
    pub sample: bool,

    /// Open the interactive dashboard instead of writing a report
    #[arg(long)]
    pub dashboard: bool,

    /// Report format (markdown, html, json)
    #[arg(short, long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Workshop menu choice (1-4); prompts when omitted
    ///
    /// 1 = all workshops, 2-4 = the named workshops. Anything else
    /// falls back to all workshops.
    #[arg(short, long, value_name = "CHOICE")]
    pub workshop: Option<String>,

    /// Only include responses with this background level
    #[arg(short, long, value_name = "LEVEL")]
    pub background: Option<String>,

    /// Output file path (default: timestamped file in the output directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Directory for timestamped report files
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the generated report to stdout as well
    #[arg(long)]
    pub print: bool,

    /// Request timeout in seconds for --sheet-url
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Dashboard color theme
    #[arg(long, value_name = "THEME")]
    pub theme: Option<Theme>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .workshop-pulse.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .workshop-pulse.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// Branded HTML, ready to print to PDF
    Html,
    /// JSON format
    Json,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }
}

/// Dashboard color theme.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Workshop picked from the numbered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AllWorkshops,
    Workshop(&'static str),
}

impl MenuChoice {
    /// Workshop name to filter by, `None` for all workshops.
    pub fn workshop(&self) -> Option<&'static str> {
        match self {
            MenuChoice::AllWorkshops => None,
            MenuChoice::Workshop(name) => Some(name),
        }
    }
}

/// Text of the numbered workshop menu.
pub fn workshop_menu() -> String {
    let mut menu = String::from("Which workshop would you like to analyze?\n");
    menu.push_str("1. All workshops (combined report)\n");
    for (i, (name, _)) in WORKSHOPS.iter().enumerate() {
        menu.push_str(&format!("{}. {} Workshop\n", i + 2, name));
    }
    menu
}

/// Parse a menu answer.
///
/// Unrecognized input falls back to all workshops rather than failing;
/// the fallback is logged so it is visible in verbose runs.
pub fn parse_menu_choice(input: &str) -> MenuChoice {
    let trimmed = input.trim();
    match trimmed.parse::<usize>() {
        Ok(1) => MenuChoice::AllWorkshops,
        Ok(n) if (2..WORKSHOPS.len() + 2).contains(&n) => MenuChoice::Workshop(WORKSHOPS[n - 2].1),
        _ => {
            warn!(
                "Unrecognized menu choice {:?}, using all workshops",
                trimmed
            );
            MenuChoice::AllWorkshops
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref url) = self.sheet_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("Sheet URL must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(ref input) = self.input {
            if !input.is_file() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if self.dashboard && self.output.is_some() {
            return Err("--output cannot be used with --dashboard".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings. `config_verbose`
    /// is `[general] verbose` from the config file; `--quiet` still wins.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
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
        }
    }

    #[test]
    fn test_menu_choices() {
        assert_eq!(parse_menu_choice("1"), MenuChoice::AllWorkshops);
        assert_eq!(
            parse_menu_choice("2"),
            MenuChoice::Workshop(WORKSHOPS[0].1)
        );
        assert_eq!(
            parse_menu_choice(" 4 "),
            MenuChoice::Workshop(WORKSHOPS[2].1)
        );
    }

    #[test]
    fn test_invalid_menu_choice_falls_back_to_all() {
        assert_eq!(parse_menu_choice("5"), MenuChoice::AllWorkshops);
        assert_eq!(parse_menu_choice("0"), MenuChoice::AllWorkshops);
        assert_eq!(parse_menu_choice("voice"), MenuChoice::AllWorkshops);
        assert_eq!(parse_menu_choice(""), MenuChoice::AllWorkshops);
        assert_eq!(MenuChoice::AllWorkshops.workshop(), None);
    }

    #[test]
    fn test_workshop_menu_lists_all_options() {
        let menu = workshop_menu();
        assert!(menu.contains("1. All workshops"));
        assert!(menu.contains("2. AI Agent Workshop\n"));
        assert!(menu.contains("3. Confidence VISIBLE Workshop\n"));
        assert!(menu.contains("4. Voice & Pitch Workshop\n"));
    }

    #[test]
    fn test_validation_invalid_url() {
        let mut args = make_args();
        args.sample = false;
        args.sheet_url = Some("ftp://example.com/export.csv".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_missing_input() {
        let mut args = make_args();
        args.input = Some(PathBuf::from("/definitely/not/here.csv"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(false), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(false), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(false), tracing::Level::ERROR);
    }

    #[test]
    fn test_config_verbose_raises_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(true), tracing::Level::DEBUG);

        args.quiet = true;
        assert_eq!(args.log_level(true), tracing::Level::ERROR);
    }

    #[test]
    fn test_theme_toggle_and_extension() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(OutputFormat::Html.extension(), "html");
    }
}
