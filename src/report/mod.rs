//! Report building and rendering.
//!
//! A [`Report`] is built once per run from the selected responses and
//! then handed to whichever renderer was asked for.

pub mod dashboard;
pub mod framing;
pub mod generator;
pub mod html;

pub use generator::{generate_json_report, generate_markdown_report};
pub use html::generate_html_report;

use crate::analysis::{
    compute_health_and_recommendation, compute_metrics, extract_quotes, tally_strengths,
    QuestionField,
};
use crate::cli::OutputFormat;
use crate::config::ReportConfig;
use crate::models::{Report, ReportMetadata, ResponseSet};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Build the shared report for a non-empty selection.
pub fn build_report(
    set: &ResponseSet,
    source: &str,
    generated_at: DateTime<Local>,
    config: &ReportConfig,
) -> Report {
    let metrics = compute_metrics(set);
    let assessment = compute_health_and_recommendation(&metrics);

    debug!(
        "Health score {:.1}, recommendation {:?}",
        assessment.health_score, assessment.recommendation
    );

    Report {
        metadata: ReportMetadata {
            workshop: set.scope.workshop_label().to_string(),
            background: set.scope.background.clone(),
            generated_at,
            source: source.to_string(),
            total_responses: metrics.total,
        },
        metrics,
        assessment,
        strengths: tally_strengths(set, config.strengths),
        testimonials: extract_quotes(set, QuestionField::Feedback, config.testimonials, None),
        action_items: extract_quotes(
            set,
            QuestionField::Commitment,
            config.action_items,
            None,
        ),
    }
}

/// Render a report in the requested format.
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(generate_markdown_report(report)),
        OutputFormat::Html => Ok(generate_html_report(report)),
        OutputFormat::Json => generate_json_report(report),
    }
}

/// Timestamped report file name, e.g. `workshop_report_20250114_093000.md`.
pub fn report_filename(generated_at: &DateTime<Local>, format: OutputFormat) -> String {
    format!(
        "workshop_report_{}.{}",
        generated_at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Path a report is written to: the explicit path, or a timestamped name
/// inside `output_dir`.
pub fn output_path(
    explicit: Option<&Path>,
    output_dir: &Path,
    generated_at: &DateTime<Local>,
    format: OutputFormat,
) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => output_dir.join(report_filename(generated_at, format)),
    }
}

/// Write rendered report content, creating the parent directory if needed.
pub fn save_report(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    Ok(())
}
