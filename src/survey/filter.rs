//! Workshop and background selection.

use crate::models::{Response, ResponseSet, Scope};
use std::collections::BTreeSet;
use tracing::debug;

/// Active filter: workshop (None = all workshops) and optional background.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub workshop: Option<String>,
    pub background: Option<String>,
}

impl Selection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn workshop(name: impl Into<String>) -> Self {
        Self {
            workshop: Some(name.into()),
            background: None,
        }
    }

    pub fn with_background(mut self, background: Option<String>) -> Self {
        self.background = background;
        self
    }

    fn scope(&self) -> Scope {
        Scope {
            workshop: self.workshop.clone(),
            background: self.background.clone(),
        }
    }
}

/// Result of applying a selection. Empty results are outcomes, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// At least one response matched.
    Matched(ResponseSet),
    /// The workshop has no responses at all.
    NoWorkshopResponses { workshop: String },
    /// The workshop has responses, but none with this background.
    NoBackgroundResponses { workshop: String, background: String },
}

impl FilterOutcome {
    /// User-facing "no data" message, `None` when responses matched.
    pub fn empty_message(&self) -> Option<String> {
        match self {
            FilterOutcome::Matched(_) => None,
            FilterOutcome::NoWorkshopResponses { workshop } => {
                Some(format!("No responses found for: {}", workshop))
            }
            FilterOutcome::NoBackgroundResponses {
                workshop,
                background,
            } => Some(format!(
                "No responses for {} with the background: {}",
                workshop, background
            )),
        }
    }
}

/// Apply a selection to the full response collection.
///
/// The source slice is never modified; matching responses are copied into
/// a new [`ResponseSet`].
pub fn select(responses: &[Response], selection: &Selection) -> FilterOutcome {
    let scope = selection.scope();

    let in_workshop: Vec<&Response> = responses
        .iter()
        .filter(|r| match selection.workshop {
            Some(ref workshop) => &r.session == workshop,
            None => true,
        })
        .collect();

    if in_workshop.is_empty() {
        return FilterOutcome::NoWorkshopResponses {
            workshop: scope.workshop_label().to_string(),
        };
    }

    let matched: Vec<Response> = in_workshop
        .into_iter()
        .filter(|r| match selection.background {
            Some(ref background) => r.background.as_ref() == Some(background),
            None => true,
        })
        .cloned()
        .collect();

    if matched.is_empty() {
        return FilterOutcome::NoBackgroundResponses {
            workshop: scope.workshop_label().to_string(),
            background: scope.background_label().to_string(),
        };
    }

    debug!(
        "Selected {} responses for {} / {}",
        matched.len(),
        scope.workshop_label(),
        scope.background_label()
    );

    FilterOutcome::Matched(ResponseSet::new(scope, matched))
}

/// Distinct workshop names, sorted.
pub fn workshops(responses: &[Response]) -> Vec<String> {
    responses
        .iter()
        .map(|r| r.session.clone())
        .filter(|s| !s.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct background levels, sorted.
pub fn backgrounds(responses: &[Response]) -> Vec<String> {
    responses
        .iter()
        .filter_map(|r| r.background.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
