//! Survey ingestion.
//!
//! Raw records come in from a source, are checked against the fixed
//! schema and normalized into typed [`Response`] values exactly once.

pub mod filter;
pub mod schema;
pub mod source;

pub use filter::{backgrounds, select, workshops, FilterOutcome, Selection};
pub use schema::{Cell, Column};
pub use source::SurveySource;

use crate::models::Response;
use schema::{parse_confidence, parse_hands_on, parse_pace, parse_rating, parse_strengths};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or validating survey data.
#[derive(Debug, Error)]
pub enum SurveyError {
    /// A required question column is absent from the export.
    #[error("expected column \"{column}\" was not found in the survey data")]
    MissingColumn { column: &'static str },

    /// The source contained no responses at all.
    #[error("the survey source returned no responses")]
    NoData,

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV export: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse JSON records: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("unsupported survey file format: {0} (expected .csv or .json)")]
    UnsupportedFormat(String),
}

impl SurveyError {
    /// Schema errors are configuration problems, not source outages.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, SurveyError::MissingColumn { .. })
    }
}

/// One raw survey row: question label to cell.
pub type RawRecord = HashMap<String, Cell>;

/// Raw tabular survey data with trimmed headers.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl RawTable {
    /// Build a table, trimming header labels and record keys.
    pub fn new(headers: Vec<String>, records: Vec<RawRecord>) -> Self {
        let headers = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let records = records
            .into_iter()
            .map(|record| {
                record
                    .into_iter()
                    .map(|(key, cell)| (key.trim().to_string(), cell))
                    .collect()
            })
            .collect();

        Self { headers, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check that every required column is present.
    pub fn validate(&self) -> Result<(), SurveyError> {
        for column in Column::ALL.iter().filter(|c| c.is_required()) {
            if !self.headers.iter().any(|h| h == column.label()) {
                return Err(SurveyError::MissingColumn {
                    column: column.label(),
                });
            }
        }
        Ok(())
    }
}

/// Validate the table and normalize every record into a [`Response`].
pub fn ingest(table: &RawTable) -> Result<Vec<Response>, SurveyError> {
    if table.is_empty() {
        return Err(SurveyError::NoData);
    }
    table.validate()?;
    debug!("Normalizing {} rows", table.len());

    let responses: Vec<Response> = table.records.iter().map(normalize_record).collect();
    debug!("Ingested {} responses", responses.len());
    Ok(responses)
}

fn normalize_record(record: &RawRecord) -> Response {
    let text = |column: Column| {
        record
            .get(column.label())
            .and_then(Cell::text)
            .map(str::to_string)
    };

    Response {
        session: text(Column::Session).unwrap_or_default(),
        confidence: record
            .get(Column::Confidence.label())
            .and_then(parse_confidence),
        facilitator: parse_rating(&text(Column::Facilitator).unwrap_or_default()),
        pace: parse_pace(&text(Column::Pace).unwrap_or_default()),
        hands_on: parse_hands_on(&text(Column::HandsOn).unwrap_or_default()),
        background: text(Column::Background),
        strengths: record
            .get(Column::Strengths.label())
            .map(parse_strengths)
            .unwrap_or_default(),
        feedback: text(Column::Feedback),
        commitment: text(Column::Commitment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FacilitatorRating, HandsOn, Pace};

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Cell::from(*v)))
            .collect()
    }

    fn required_headers() -> Vec<String> {
        Column::ALL
            .iter()
            .filter(|c| c.is_required())
            .map(|c| c.label().to_string())
            .collect()
    }

    #[test]
    fn test_headers_are_trimmed() {
        let table = RawTable::new(
            vec![format!("{} ", Column::Confidence.label())],
            vec![record(&[(
                "How confident do you feel implementing what you learned today? ",
                "4",
            )])],
        );
        assert_eq!(table.headers[0], Column::Confidence.label());
        assert!(table.records[0].contains_key(Column::Confidence.label()));
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let mut headers = required_headers();
        headers.retain(|h| h != Column::Pace.label());
        let table = RawTable::new(headers, vec![record(&[])]);

        let err = ingest(&table).unwrap_err();
        assert!(err.is_schema_error());
        assert!(err.to_string().contains(Column::Pace.label()));
    }

    #[test]
    fn test_empty_table_is_no_data() {
        let table = RawTable::new(required_headers(), vec![]);
        assert!(matches!(ingest(&table), Err(SurveyError::NoData)));
    }

    #[test]
    fn test_ingest_normalizes_record() {
        let table = RawTable::new(
            required_headers(),
            vec![record(&[
                (Column::Session.label(), "Advanced Python"),
                (Column::Confidence.label(), "not sure"),
                (Column::Facilitator.label(), "🌟 Excellent - Clear, engaging, well-paced"),
                (Column::Pace.label(), "Too basic - I already knew most of this"),
                (Column::HandsOn.label(), "No - I ran out of time"),
                (Column::Feedback.label(), "   "),
                (Column::Strengths.label(), "['Clear examples', 'Patient']"),
            ])],
        );

        let responses = ingest(&table).unwrap();
        let response = &responses[0];
        assert_eq!(response.session, "Advanced Python");
        assert_eq!(response.confidence, None);
        assert_eq!(response.facilitator, FacilitatorRating::Excellent);
        assert_eq!(response.pace, Pace::TooBasic);
        assert_eq!(response.hands_on, HandsOn::NoTime);
        assert_eq!(response.feedback, None);
        assert_eq!(response.background, None);
        assert_eq!(response.strengths, vec!["Clear examples", "Patient"]);
    }
}
