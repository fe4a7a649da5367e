//! Data models for the workshop survey.
//!
//! This module contains the core data structures used throughout
//! the application for representing responses, derived metrics, and reports.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall facilitator rating given by a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilitatorRating {
    /// Clear, engaging, well-paced
    Excellent,
    /// Helpful and informative
    Good,
    /// Some parts were unclear
    Okay,
    /// Hard to follow
    NeedsImprovement,
    /// Label outside the known vocabulary
    Unknown,
}

impl fmt::Display for FacilitatorRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacilitatorRating::Excellent => write!(f, "Excellent"),
            FacilitatorRating::Good => write!(f, "Good"),
            FacilitatorRating::Okay => write!(f, "Okay"),
            FacilitatorRating::NeedsImprovement => write!(f, "Needs improvement"),
            FacilitatorRating::Unknown => write!(f, "Other"),
        }
    }
}

impl FacilitatorRating {
    /// Returns an emoji representation of the rating.
    pub fn emoji(&self) -> &'static str {
        match self {
            FacilitatorRating::Excellent => "🌟",
            FacilitatorRating::Good => "✅",
            FacilitatorRating::Okay => "😐",
            FacilitatorRating::NeedsImprovement => "📉",
            FacilitatorRating::Unknown => "❔",
        }
    }
}

/// Answer to the pace/level question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pace {
    JustRight,
    SlightlyTooFast,
    TooAdvanced,
    SlightlyTooSlow,
    TooBasic,
    Unknown,
}

/// Bucket a pace answer is tallied into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceBucket {
    Just,
    Fast,
    Slow,
}

impl Pace {
    /// Returns the bucket for this answer, `None` for unknown labels.
    pub fn bucket(&self) -> Option<PaceBucket> {
        match self {
            Pace::JustRight => Some(PaceBucket::Just),
            Pace::SlightlyTooFast | Pace::TooAdvanced => Some(PaceBucket::Fast),
            Pace::SlightlyTooSlow | Pace::TooBasic => Some(PaceBucket::Slow),
            Pace::Unknown => None,
        }
    }
}

impl fmt::Display for PaceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaceBucket::Just => write!(f, "just right"),
            PaceBucket::Fast => write!(f, "too fast"),
            PaceBucket::Slow => write!(f, "too slow"),
        }
    }
}

/// Answer to the hands-on deliverable question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandsOn {
    /// Created or started the deliverable
    Created,
    /// Followed along but still needs to finish
    Followed,
    /// Ran out of time
    NoTime,
    Unknown,
}

/// One survey submission after ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Workshop session the participant attended.
    pub session: String,
    /// Confidence score (1-5), `None` when missing or invalid.
    pub confidence: Option<f64>,
    /// Facilitator rating.
    pub facilitator: FacilitatorRating,
    /// Pace/level answer.
    pub pace: Pace,
    /// Hands-on deliverable answer.
    pub hands_on: HandsOn,
    /// Self-reported background level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Facilitator strengths (multi-select).
    #[serde(default)]
    pub strengths: Vec<String>,
    /// What the facilitator did well / suggestions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    /// One thing the participant will try this week.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commitment: Option<String>,
}

/// Workshop/background scope a response set was filtered by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    /// Workshop name, `None` for all workshops.
    pub workshop: Option<String>,
    /// Background level, `None` for all backgrounds.
    pub background: Option<String>,
}

impl Scope {
    /// Human-readable workshop label.
    pub fn workshop_label(&self) -> &str {
        self.workshop.as_deref().unwrap_or("All Workshops")
    }

    /// Human-readable background label.
    pub fn background_label(&self) -> &str {
        self.background.as_deref().unwrap_or("All backgrounds")
    }
}

/// Ordered collection of responses under a scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseSet {
    pub scope: Scope,
    pub responses: Vec<Response>,
}

impl ResponseSet {
    pub fn new(scope: Scope, responses: Vec<Response>) -> Self {
        Self { scope, responses }
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Response> {
        self.responses.iter()
    }
}

/// Raw bucket counts behind the metric percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    pub excellent: usize,
    pub good: usize,
    pub pace_just: usize,
    pub pace_fast: usize,
    pub pace_slow: usize,
    pub hands_created: usize,
    pub hands_followed: usize,
}

/// Derived numeric summary of a response set.
///
/// All percentages are in `[0, 100]` and every field is zero when
/// `total == 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Number of responses.
    pub total: usize,
    /// Mean confidence over valid values (0 when none).
    pub confidence: f64,
    /// Share rated Excellent.
    pub excellent_pct: f64,
    /// Share rated Excellent or Good.
    pub good_pct: f64,
    pub pace_just: f64,
    pub pace_fast: f64,
    pub pace_slow: f64,
    pub hands_created: f64,
    pub hands_followed: f64,
    /// `hands_created + hands_followed`.
    pub hands_completion: f64,
    /// Counts behind the percentages.
    pub counts: BucketCounts,
}

/// Recommendation selected by the rule chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    GuidedPractice,
    SlowDown,
    IncreaseDensity,
    Maintain,
    FocusOneMetric,
}

impl Recommendation {
    /// Returns the recommendation text shown to facilitators.
    pub fn text(&self) -> &'static str {
        match self {
            Recommendation::GuidedPractice => {
                "Add more structured, guided, hands-on time with a simpler, clear deliverable."
            }
            Recommendation::SlowDown => {
                "Slow down or add comprehension checkpoints after key concepts."
            }
            Recommendation::IncreaseDensity => {
                "Increase content density or add optional, deeper content for experts."
            }
            Recommendation::Maintain => {
                "Workshop performing excellently. Maintain current structure and content!"
            }
            Recommendation::FocusOneMetric => {
                "Solid foundation. Focus on improving one of the four key metrics below."
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Health score, recommendation and insights derived from metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Composite score in `[0, 100]`.
    pub health_score: f64,
    pub recommendation: Recommendation,
    /// Text of `recommendation`, carried so JSON exports read like the reports.
    pub recommendation_text: String,
    pub insights: Vec<String>,
}

/// A facilitator strength and how often it was selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthTally {
    pub strength: String,
    pub count: usize,
    /// Mentions as a share of all responses.
    pub pct: f64,
}

/// Metadata about the generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Workshop the report covers.
    pub workshop: String,
    /// Background filter, when one was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Time the report was generated.
    pub generated_at: DateTime<Local>,
    /// Where the responses came from.
    pub source: String,
    /// Number of responses analyzed.
    pub total_responses: usize,
}

/// The complete workshop report shared by every renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub metrics: Metrics,
    pub assessment: Assessment,
    /// Most selected facilitator strengths.
    pub strengths: Vec<StrengthTally>,
    /// Feedback quotes.
    pub testimonials: Vec<String>,
    /// Commitments participants will try this week.
    pub action_items: Vec<String>,
}
