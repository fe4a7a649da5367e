//! Workshop Pulse - facilitator reports from workshop feedback surveys
//!
//! A CLI tool that turns survey exports into workshop health metrics,
//! a next-step recommendation and Markdown, HTML or JSON reports, with
//! an interactive terminal dashboard for exploring the same numbers.
//!
//! Exit codes:
//!   0 - Success (including a selection with no responses)
//!   1 - Runtime error (unreadable source, missing column, config, etc.)

mod analysis;
mod cli;
mod config;
mod models;
mod report;
mod survey;

use anyhow::{bail, Context, Result};
use chrono::Local;
use cli::{parse_menu_choice, workshop_menu, Args, MenuChoice};
use config::{Config, DEFAULT_CONFIG_FILE};
use report::dashboard::{self, DashboardData, DashboardSession};
use std::io::Write;
use std::path::PathBuf;
use survey::schema::WORKSHOPS;
use survey::{ingest, select, workshops, FilterOutcome, Selection, SurveySource};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load config first so `[general] verbose` can set the log level
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&args, &config);

    info!("Workshop Pulse v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Config: {:?}", config);

    let result = if args.dashboard {
        run_dashboard(args, config).await
    } else {
        run_report(args, config).await
    };

    match result {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .workshop-pulse.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to set the survey source, report sizes and dashboard theme.");
    Ok(())
}

/// Initialize logging from the CLI flags and `[general] verbose`.
fn init_logging(args: &Args, config: &Config) {
    let level = args.log_level(config.general.verbose);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load configuration from file or use defaults, then apply CLI overrides.
///
/// Runs before logging is set up, so problems go straight to stderr.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    let mut config = if let Some(ref config_path) = args.config {
        Config::load(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try default location
        match Config::load_default() {
            Ok(Some(config)) => config,
            Ok(None) => Config::default(),
            Err(e) => {
                eprintln!("⚠️  Failed to load {}: {:#}", DEFAULT_CONFIG_FILE, e);
                Config::default()
            }
        }
    };

    config.merge_with_args(args);
    Ok(config)
}

/// Resolve the survey source from CLI flags and config.
fn resolve_source(args: &Args, config: &Config) -> Option<SurveySource> {
    if args.sample {
        return Some(SurveySource::Sample);
    }

    if let Some(ref input) = config.source.input {
        return Some(SurveySource::File(PathBuf::from(input)));
    }

    config
        .source
        .sheet_url
        .as_ref()
        .map(|url| SurveySource::Remote {
            url: url.clone(),
            timeout_seconds: config.source.timeout_seconds,
        })
}

/// Ask for a workshop on stdin.
fn prompt_menu_choice() -> MenuChoice {
    println!("{}", workshop_menu());
    print!("Enter number (1-{}): ", WORKSHOPS.len() + 1);
    if let Err(e) = std::io::stdout().flush() {
        debug!("Failed to flush prompt: {}", e);
    }

    let mut line = String::new();
    if let Err(e) = std::io::stdin().read_line(&mut line) {
        warn!("Failed to read menu choice: {}", e);
    }

    parse_menu_choice(&line)
}

/// Batch workflow: load, select, build and save one report.
async fn run_report(args: Args, config: Config) -> Result<i32> {
    let Some(source) = resolve_source(&args, &config) else {
        bail!(
            "No survey source given. Use --input, --sheet-url or --sample, or set [source] in {}",
            DEFAULT_CONFIG_FILE
        );
    };

    // Step 1: Load and validate responses
    println!("📥 Loading responses from: {}", source.describe());
    let table = source
        .load(!args.quiet)
        .await
        .context("Failed to load survey data")?;
    let responses = match ingest(&table) {
        Ok(responses) => responses,
        Err(e) if e.is_schema_error() => {
            bail!("{} (is this an export of the workshop feedback form?)", e)
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "📋 Found {} responses for {} workshop(s)\n",
        responses.len(),
        workshops(&responses).len()
    );

    // Step 2: Pick the workshop
    let choice = match args.workshop {
        Some(ref answer) => parse_menu_choice(answer),
        None => prompt_menu_choice(),
    };

    let selection = match choice.workshop() {
        Some(workshop) => Selection::workshop(workshop),
        None => Selection::all(),
    }
    .with_background(args.background.clone());

    // Step 3: Filter
    let set = match select(&responses, &selection) {
        FilterOutcome::Matched(set) => set,
        outcome => {
            if let Some(message) = outcome.empty_message() {
                println!("❌ {}", message);
            }
            return Ok(0);
        }
    };

    // Step 4: Build the report
    println!(
        "📈 Analyzing {} responses for: {}",
        set.len(),
        set.scope.workshop_label()
    );
    let generated_at = Local::now();
    let report = report::build_report(&set, &source.describe(), generated_at, &config.report);

    // Step 5: Render and save
    let content = report::render(&report, args.format)?;
    let path = report::output_path(
        args.output.as_deref(),
        &config.output_dir(),
        &generated_at,
        args.format,
    );
    report::save_report(&path, &content)?;

    if args.print {
        println!("\n{}", "=".repeat(60));
        println!("{}", content);
        println!("{}", "=".repeat(60));
    }

    // Print summary
    println!("\n📊 Report Summary:");
    println!("   Responses: {}", report.metadata.total_responses);
    println!(
        "   Health score: {:.0}/100",
        report.assessment.health_score
    );
    println!("   Next step: {}", report.assessment.recommendation);
    println!("\n✅ Report saved to: {}", path.display());

    Ok(0)
}

/// Dashboard workflow. Falls back to the sample data when the source
/// cannot be read.
async fn run_dashboard(args: Args, config: Config) -> Result<i32> {
    let data = match resolve_source(&args, &config) {
        Some(SurveySource::Sample) => sample_data(None)?,
        Some(source) => match source.load(!args.quiet).await {
            Ok(table) => DashboardData {
                responses: ingest(&table)?,
                source: source.describe(),
                notice: None,
            },
            Err(e) => {
                warn!("Falling back to sample data: {}", e);
                sample_data(Some(format!(
                    "Could not load survey data ({}). Showing sample data.",
                    e
                )))?
            }
        },
        None => sample_data(Some(
            "No survey source configured. Showing sample data.".to_string(),
        ))?,
    };

    let mut session = DashboardSession::new(config.dashboard.theme, &data.responses);
    session.selection.background = args.background.clone();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    dashboard::run(
        stdin.lock(),
        stdout.lock(),
        &data,
        session,
        &config.dashboard,
    )?;

    Ok(0)
}

fn sample_data(notice: Option<String>) -> Result<DashboardData> {
    let source = SurveySource::Sample;
    Ok(DashboardData {
        responses: ingest(&survey::source::sample_table())?,
        source: source.describe(),
        notice,
    })
}
