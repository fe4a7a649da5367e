//! Testimonial and action-item extraction.

use crate::models::{Response, ResponseSet};

/// Answers this short or shorter are skipped.
pub const MIN_QUOTE_CHARS: usize = 10;

/// Words that mark a feedback answer as a suggestion rather than praise.
pub const SUGGESTION_KEYWORDS: [&str; 4] = ["suggestion", "improve", "faster", "slower"];

/// Free-text question a quote is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionField {
    /// What the facilitator did well / suggestions.
    Feedback,
    /// One thing the participant will try this week.
    Commitment,
}

impl QuestionField {
    fn value<'a>(&self, response: &'a Response) -> Option<&'a str> {
        match self {
            QuestionField::Feedback => response.feedback.as_deref(),
            QuestionField::Commitment => response.commitment.as_deref(),
        }
    }
}

/// Keyword partition over free-text answers.
///
/// This is a plain case-insensitive substring test, not sentiment
/// analysis: a glowing comment that happens to say "faster" is filed
/// as a suggestion.
#[derive(Debug, Clone, Copy)]
pub struct KeywordFilter<'a> {
    pub keywords: &'a [&'a str],
    /// Keep answers containing a keyword (true) or answers without one (false).
    pub keep_matching: bool,
}

impl KeywordFilter<'static> {
    /// Answers with none of the suggestion keywords.
    pub fn praise() -> Self {
        Self {
            keywords: &SUGGESTION_KEYWORDS,
            keep_matching: false,
        }
    }

    /// Answers with at least one suggestion keyword.
    pub fn suggestions() -> Self {
        Self {
            keywords: &SUGGESTION_KEYWORDS,
            keep_matching: true,
        }
    }
}

impl KeywordFilter<'_> {
    pub fn accepts(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        let matched = self
            .keywords
            .iter()
            .any(|keyword| lowered.contains(&keyword.to_lowercase()));
        matched == self.keep_matching
    }
}

/// Return the first `max_count` usable answers to `field`, in original order.
pub fn extract_quotes(
    set: &ResponseSet,
    field: QuestionField,
    max_count: usize,
    filter: Option<&KeywordFilter<'_>>,
) -> Vec<String> {
    set.iter()
        .filter_map(|response| field.value(response))
        .map(str::trim)
        .filter(|text| text.chars().count() > MIN_QUOTE_CHARS)
        .filter(|text| filter.map_or(true, |f| f.accepts(text)))
        .take(max_count)
        .map(str::to_string)
        .collect()
}
