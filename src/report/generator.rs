//! Markdown report generation.
//!
//! This module generates facilitator-facing Markdown reports from a
//! built [`Report`].

use crate::models::{FacilitatorRating, Metrics, Report, ReportMetadata, StrengthTally};
use crate::report::framing::{
    confidence_status, facilitator_status, hands_on_status, insight_line, low_sample_note,
    pace_status,
};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    // Title and metadata
    output.push_str(&generate_metadata_section(&report.metadata));

    output.push_str(&generate_overview_section(report));
    output.push_str(&generate_facilitator_section(&report.metrics));
    output.push_str(&generate_pacing_section(&report.metrics));
    output.push_str(&generate_hands_on_section(&report.metrics));
    output.push_str(&generate_strengths_section(&report.strengths));
    output.push_str(&generate_testimonials_section(&report.testimonials));
    output.push_str(&generate_action_items_section(&report.action_items));
    output.push_str(&generate_recommendations_section(report));

    // Footer
    output.push_str(&generate_footer());

    output
}

/// Generate the title and metadata block.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str(&format!("# Workshop Report: {}\n\n", metadata.workshop));
    section.push_str(&format!(
        "**Generated:** {}  \n",
        metadata.generated_at.format("%B %d, %Y at %I:%M %p")
    ));
    if let Some(ref background) = metadata.background {
        section.push_str(&format!("**Background:** {}  \n", background));
    }
    section.push_str(&format!(
        "**Total Responses:** {}  \n",
        metadata.total_responses
    ));
    section.push_str(&format!("**Source:** {}\n\n", metadata.source));
    section.push_str("---\n\n");

    section
}

/// Health score, recommendation and confidence.
fn generate_overview_section(report: &Report) -> String {
    let mut section = String::new();
    let metrics = &report.metrics;

    section.push_str("## 📊 Overview\n\n");
    section.push_str(&format!(
        "**Health Score:** {:.0} / 100  \n",
        report.assessment.health_score
    ));
    section.push_str(&format!(
        "**Recommendation:** {}\n\n",
        report.assessment.recommendation
    ));
    section.push_str(&format!("*{}*\n\n", insight_line(&report.assessment)));

    section.push_str("### ⭐ Confidence Score\n\n");
    section.push_str(&format!(
        "**{:.1} / 5.0** - How confident builders feel implementing what they learned\n\n",
        metrics.confidence
    ));

    let status = confidence_status(metrics);
    section.push_str(&format!(
        "{} **{}** - {}\n\n",
        status.tone.emoji(),
        status.label,
        status.detail
    ));

    if let Some(note) = low_sample_note(metrics.total) {
        section.push_str(&format!("> {}\n\n", note));
    }

    section.push_str("---\n\n");
    section
}

fn generate_facilitator_section(metrics: &Metrics) -> String {
    let mut section = String::new();
    let counts = &metrics.counts;

    section.push_str("## 👩‍🏫 Facilitator Rating\n\n");
    section.push_str(&format!(
        "- {} **Excellent:** {} responses ({:.0}%)\n",
        FacilitatorRating::Excellent.emoji(),
        counts.excellent,
        metrics.excellent_pct
    ));
    section.push_str(&format!(
        "- {} **Good or higher:** {} responses ({:.0}%)\n\n",
        FacilitatorRating::Good.emoji(),
        counts.excellent + counts.good,
        metrics.good_pct
    ));

    let status = facilitator_status(metrics);
    section.push_str(&format!(
        "{} **{}** - {}\n\n",
        status.tone.emoji(),
        status.label,
        status.detail
    ));
    section.push_str("---\n\n");

    section
}

fn generate_pacing_section(metrics: &Metrics) -> String {
    let mut section = String::new();
    let counts = &metrics.counts;

    section.push_str("## ⏱️ Pacing\n\n");
    section.push_str("| Pace Feedback | Count | Percentage |\n");
    section.push_str("|:---|:---:|:---:|\n");
    section.push_str(&format!(
        "| **Just Right** | {} | {:.0}% |\n",
        counts.pace_just, metrics.pace_just
    ));
    section.push_str(&format!(
        "| **Too Fast** | {} | {:.0}% |\n",
        counts.pace_fast, metrics.pace_fast
    ));
    section.push_str(&format!(
        "| **Too Slow** | {} | {:.0}% |\n\n",
        counts.pace_slow, metrics.pace_slow
    ));

    let status = pace_status(metrics);
    section.push_str(&format!(
        "{} **{}** - {}\n\n",
        status.tone.emoji(),
        status.label,
        status.detail
    ));
    section.push_str("---\n\n");

    section
}

fn generate_hands_on_section(metrics: &Metrics) -> String {
    let mut section = String::new();
    let counts = &metrics.counts;

    section.push_str("## 🛠️ Hands-On\n\n");
    section.push_str(&format!(
        "**Deliverable Completion Rate:** {:.0}%\n\n",
        metrics.hands_completion
    ));
    section.push_str(&format!(
        "- ✅ **Created deliverable:** {} builders ({:.0}%)\n",
        counts.hands_created, metrics.hands_created
    ));
    section.push_str(&format!(
        "- 🔄 **Started but need to finish:** {} builders ({:.0}%)\n\n",
        counts.hands_followed, metrics.hands_followed
    ));

    let status = hands_on_status(metrics);
    section.push_str(&format!(
        "{} **{}** - {}\n\n",
        status.tone.emoji(),
        status.label,
        status.detail
    ));
    section.push_str("---\n\n");

    section
}

fn generate_strengths_section(strengths: &[StrengthTally]) -> String {
    let mut section = String::new();

    section.push_str("## 💪 Strengths\n\n");
    section.push_str("**Top facilitator strengths (from builder feedback):**\n\n");

    if strengths.is_empty() {
        section.push_str("*No facilitator strengths were selected.*\n\n");
    } else {
        for (i, tally) in strengths.iter().enumerate() {
            section.push_str(&format!(
                "{}. **{}** - {} mentions ({:.0}%)\n",
                i + 1,
                tally.strength,
                tally.count,
                tally.pct
            ));
        }
        section.push('\n');
    }
    section.push_str("---\n\n");

    section
}

fn generate_testimonials_section(testimonials: &[String]) -> String {
    let mut section = String::new();

    section.push_str("## 💬 Testimonials\n\n");
    if testimonials.is_empty() {
        section.push_str("*No written feedback yet.*\n\n");
    }
    for (i, quote) in testimonials.iter().enumerate() {
        section.push_str(&format!("{}. > \"{}\"\n\n", i + 1, quote));
    }
    section.push_str("---\n\n");

    section
}

fn generate_action_items_section(action_items: &[String]) -> String {
    let mut section = String::new();

    section.push_str("## 🎯 Action Items\n\n");
    section.push_str("**What builders plan to implement this week:**\n\n");
    if action_items.is_empty() {
        section.push_str("*No commitments recorded.*\n");
    }
    for (i, item) in action_items.iter().enumerate() {
        section.push_str(&format!("{}. \"{}\"\n", i + 1, item));
    }
    section.push_str("\n---\n\n");

    section
}

/// Generate the recommendations section.
fn generate_recommendations_section(report: &Report) -> String {
    let mut section = String::new();

    section.push_str("## 📈 Recommendations\n\n");
    section.push_str(&format!(
        "- **{}**\n",
        report.assessment.recommendation
    ));
    for insight in &report.assessment.insights {
        section.push_str(&format!("- {}\n", insight));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str("*Report generated by Workshop Pulse*\n");

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
