//! Status framing shared by every renderer.
//!
//! Markdown, HTML and the dashboard all describe metrics with the same
//! labels, so the thresholds live here and nowhere else.

use crate::analysis::recommend::{CONFIDENCE_STRONG, CONFIDENCE_TARGET};
use crate::models::{Assessment, Metrics, PaceBucket};

/// Shown when no insight rule fired.
pub const STEADY_PERFORMANCE: &str = "Steady performance across core metrics.";

/// Responses below this count get a low-sample note.
pub const LOW_SAMPLE_THRESHOLD: usize = 10;

/// Tone of a status, used for emoji and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Warn,
    Alert,
}

impl Tone {
    pub fn emoji(&self) -> &'static str {
        match self {
            Tone::Good => "✅",
            Tone::Warn => "⚠️",
            Tone::Alert => "🚨",
        }
    }

    /// CSS class name for HTML output.
    pub fn class(&self) -> &'static str {
        match self {
            Tone::Good => "good",
            Tone::Warn => "warn",
            Tone::Alert => "alert",
        }
    }
}

/// Short label plus one explanatory sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub label: &'static str,
    pub detail: String,
    pub tone: Tone,
}

impl Status {
    fn new(label: &'static str, detail: impl Into<String>, tone: Tone) -> Self {
        Self {
            label,
            detail: detail.into(),
            tone,
        }
    }
}

pub fn confidence_status(metrics: &Metrics) -> Status {
    if metrics.total == 0 {
        Status::new("No Responses", "No confidence scores yet", Tone::Warn)
    } else if metrics.confidence >= CONFIDENCE_STRONG {
        Status::new(
            "Excellent",
            "Builders feel confident applying skills",
            Tone::Good,
        )
    } else if metrics.confidence >= CONFIDENCE_TARGET {
        Status::new("Meets Target", "Confidence is at or above target", Tone::Good)
    } else if metrics.confidence >= 3.0 {
        Status::new(
            "Fair",
            "Builders need more support to apply skills",
            Tone::Warn,
        )
    } else {
        Status::new("Needs Work", "Significant confidence gap", Tone::Alert)
    }
}

/// Note attached to results drawn from very few responses.
pub fn low_sample_note(total: usize) -> Option<String> {
    if total > 0 && total < LOW_SAMPLE_THRESHOLD {
        Some(format!(
            "LOW SAMPLE: only {} response{}, interpret with care",
            total,
            if total == 1 { "" } else { "s" }
        ))
    } else {
        None
    }
}

pub fn facilitator_status(metrics: &Metrics) -> Status {
    let detail = format!(
        "{:.0}% rated Good or higher (Target: 80%)",
        metrics.good_pct
    );
    if metrics.excellent_pct >= 70.0 {
        Status::new("Outstanding", detail, Tone::Good)
    } else if metrics.excellent_pct >= 50.0 {
        Status::new("Strong", detail, Tone::Good)
    } else {
        Status::new("Developing", detail, Tone::Warn)
    }
}

/// Bucket most builders fell into. Fast or slow win only when strictly
/// larger than both other buckets.
pub fn dominant_pace(metrics: &Metrics) -> PaceBucket {
    if metrics.pace_fast > metrics.pace_just && metrics.pace_fast > metrics.pace_slow {
        PaceBucket::Fast
    } else if metrics.pace_slow > metrics.pace_just && metrics.pace_slow > metrics.pace_fast {
        PaceBucket::Slow
    } else {
        PaceBucket::Just
    }
}

pub fn pace_status(metrics: &Metrics) -> Status {
    let counts = &metrics.counts;
    match dominant_pace(metrics) {
        PaceBucket::Just => Status::new(
            "Just Right",
            format!("{:.0}% said the pace was just right", metrics.pace_just),
            Tone::Good,
        ),
        PaceBucket::Fast => Status::new(
            "Too Fast",
            format!(
                "{} felt rushed, {} wanted to go deeper",
                counts.pace_fast, counts.pace_slow
            ),
            Tone::Warn,
        ),
        PaceBucket::Slow => Status::new(
            "Too Slow",
            format!(
                "{} wanted to go deeper, {} felt rushed",
                counts.pace_slow, counts.pace_fast
            ),
            Tone::Warn,
        ),
    }
}

pub fn hands_on_status(metrics: &Metrics) -> Status {
    let detail = format!("{:.0}% completion", metrics.hands_completion);
    if metrics.hands_created >= 50.0 {
        Status::new("High Deliverable Rate", detail, Tone::Good)
    } else if metrics.hands_created >= 30.0 {
        Status::new("Good Participation", detail, Tone::Good)
    } else {
        Status::new("Increase Guided Practice", detail, Tone::Alert)
    }
}

/// Insights joined into one line, or the steady-performance filler.
pub fn insight_line(assessment: &Assessment) -> String {
    if assessment.insights.is_empty() {
        STEADY_PERFORMANCE.to_string()
    } else {
        assessment.insights.join(" · ")
    }
}
