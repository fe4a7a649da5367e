//! Survey schema and label normalization.
//!
//! Every piece of fragile string matching lives here: column labels,
//! categorical vocabularies, the numeric confidence parse and the
//! legacy multi-select format. The rest of the crate only sees typed values.

use crate::models::{FacilitatorRating, HandsOn, Pace};
use serde::{Deserialize, Serialize};

/// A raw cell value as delivered by a survey source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Plain text (numbers arrive as text too).
    Text(String),
    /// Already-structured multi-select answer.
    List(Vec<String>),
}

impl Cell {
    /// Returns the trimmed text, or `None` for lists and blank cells.
    pub fn text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed)
                }
            }
            Cell::List(_) => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// Survey questions the tool knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Session,
    Confidence,
    Facilitator,
    Pace,
    HandsOn,
    Background,
    Strengths,
    Feedback,
    Commitment,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Session,
        Column::Confidence,
        Column::Facilitator,
        Column::Pace,
        Column::HandsOn,
        Column::Background,
        Column::Strengths,
        Column::Feedback,
        Column::Commitment,
    ];

    /// Column header as it appears in the survey export, trimmed.
    ///
    /// The sheet carries a trailing space after the confidence question.
    /// Headers are trimmed once during ingestion, so the label here has none.
    pub fn label(&self) -> &'static str {
        match self {
            Column::Session => "Which session did you attend?",
            Column::Confidence => {
                "How confident do you feel implementing what you learned today?"
            }
            Column::Facilitator => "The facilitator today was:",
            Column::Pace => "Was the workshop pace/level right for you?",
            Column::HandsOn => "Did you create a hands-on deliverable today?",
            Column::Background => "Your background in this topic:",
            Column::Strengths => "The facilitator today: (Select all that apply)",
            Column::Feedback => {
                "What did the facilitator do especially well? Any suggestions for improvement?"
            }
            Column::Commitment => "What's ONE thing you'll try this week based on today's workshop?",
        }
    }

    /// Whether a missing column halts the run.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Column::Session
                | Column::Confidence
                | Column::Facilitator
                | Column::Pace
                | Column::HandsOn
        )
    }
}

/// The three named workshops offered in the report menu, as
/// (menu name, full session title).
pub const WORKSHOPS: [(&str, &str); 3] = [
    (
        "AI Agent",
        "Building a Production AI Agent : Women in Tech and Innovation",
    ),
    (
        "Confidence VISIBLE",
        "Making Your Confidence VISIBLE : Women Creators and Technologists",
    ),
    (
        "Voice & Pitch",
        "Voice & Pitch for Power: Communicating Technical Ideas With Clarity and Authority",
    ),
];

const RATING_LABELS: [(&str, FacilitatorRating); 4] = [
    (
        "Excellent - Clear, engaging, well-paced",
        FacilitatorRating::Excellent,
    ),
    ("Good - Helpful and informative", FacilitatorRating::Good),
    ("Okay - Some parts were unclear", FacilitatorRating::Okay),
    (
        "Needs improvement - Hard to follow",
        FacilitatorRating::NeedsImprovement,
    ),
];

const PACE_LABELS: [(&str, Pace); 5] = [
    ("Just right - Perfect pace for my level", Pace::JustRight),
    (
        "Slightly too fast - I could barely keep up",
        Pace::SlightlyTooFast,
    ),
    ("Too advanced - I felt lost", Pace::TooAdvanced),
    (
        "Slightly too slow - I wanted to go deeper",
        Pace::SlightlyTooSlow,
    ),
    ("Too basic - I already knew most of this", Pace::TooBasic),
];

const HANDS_ON_LABELS: [(&str, HandsOn); 5] = [
    (
        "Yes - I created/started [code sample / prototype / document / project file]",
        HandsOn::Created,
    ),
    (
        "Yes - I followed along but need to finish it",
        HandsOn::Followed,
    ),
    ("No - I ran out of time", HandsOn::NoTime),
    ("Created", HandsOn::Created),
    ("Followed", HandsOn::Followed),
];

/// Strip leading emoji (or mis-decoded emoji bytes) and whitespace.
fn strip_decoration(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches(|c: char| !c.is_ascii_alphanumeric())
        .trim_end()
}

/// Text before the first " - " separator.
fn short_name(label: &str) -> &str {
    label.split(" - ").next().unwrap_or(label)
}

/// Match a raw label against a vocabulary by full text or short name.
fn match_label<T: Copy>(raw: &str, vocabulary: &[(&str, T)], allow_short: bool) -> Option<T> {
    let text = strip_decoration(raw);
    if text.is_empty() {
        return None;
    }

    vocabulary
        .iter()
        .find(|(label, _)| *label == text || (allow_short && short_name(label) == text))
        .map(|(_, value)| *value)
}

/// Map a raw facilitator rating label to its enum.
pub fn parse_rating(raw: &str) -> FacilitatorRating {
    match_label(raw, &RATING_LABELS, true).unwrap_or(FacilitatorRating::Unknown)
}

/// Map a raw pace label to its enum.
pub fn parse_pace(raw: &str) -> Pace {
    match_label(raw, &PACE_LABELS, true).unwrap_or(Pace::Unknown)
}

/// Map a raw hands-on label to its enum.
///
/// Two labels share the "Yes" short name, so only full labels and the
/// explicit aliases are accepted.
pub fn parse_hands_on(raw: &str) -> HandsOn {
    match_label(raw, &HANDS_ON_LABELS, false).unwrap_or(HandsOn::Unknown)
}

/// Parse a confidence answer. Non-numeric, non-finite or out-of-range
/// values (outside 1..=5) are treated as missing.
///
/// Plain numeric coercion would keep a stray `9` or `0` and let it skew
/// the average; these are dropped instead, so the confidence mean stays
/// on the 1-5 scale and the health score within 0..=100.
pub fn parse_confidence(cell: &Cell) -> Option<f64> {
    let value: f64 = cell.text()?.parse().ok()?;
    if value.is_finite() && (1.0..=5.0).contains(&value) {
        Some(value)
    } else {
        None
    }
}

/// Parse the facilitator-strengths multi-select cell.
///
/// Structured list cells and JSON arrays are taken as-is. Anything else is
/// treated as the legacy export format, a Python list rendered to text
/// (`"['Clear examples', 'Good energy']"`), and split on commas.
pub fn parse_strengths(cell: &Cell) -> Vec<String> {
    let items: Vec<String> = match cell {
        Cell::List(items) => items.clone(),
        Cell::Text(text) => {
            let text = text.trim();
            match serde_json::from_str::<Vec<String>>(text) {
                Ok(items) => items,
                Err(_) => text
                    .trim_start_matches('[')
                    .trim_end_matches(']')
                    .split(',')
                    .map(|item| item.trim().trim_matches(|c: char| c == '"' || c == '\'').to_string())
                    .collect(),
            }
        }
    };

    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
