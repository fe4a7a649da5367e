//! Survey response sources.
//!
//! Responses can come from a local CSV or JSON export, a published CSV
//! export URL, or the small built-in illustrative dataset.

use super::{Cell, Column, RawRecord, RawTable, SurveyError};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Where survey responses are loaded from.
#[derive(Debug, Clone, PartialEq)]
pub enum SurveySource {
    /// Local `.csv` or `.json` export.
    File(PathBuf),
    /// Published CSV export URL.
    Remote { url: String, timeout_seconds: u64 },
    /// Built-in illustrative dataset.
    Sample,
}

impl SurveySource {
    /// Short description for report metadata.
    pub fn describe(&self) -> String {
        match self {
            SurveySource::File(path) => path.display().to_string(),
            SurveySource::Remote { url, .. } => url.clone(),
            SurveySource::Sample => "built-in sample data".to_string(),
        }
    }

    /// Load the raw survey table.
    pub async fn load(&self, show_progress: bool) -> Result<RawTable, SurveyError> {
        match self {
            SurveySource::File(path) => read_file(path),
            SurveySource::Remote {
                url,
                timeout_seconds,
            } => fetch_csv(url, *timeout_seconds, show_progress).await,
            SurveySource::Sample => Ok(sample_table()),
        }
    }
}

/// Read a local export, picking the parser from the file extension.
pub fn read_file(path: &Path) -> Result<RawTable, SurveyError> {
    info!("Reading survey export: {}", path.display());

    let io_err = |source| SurveyError::Io {
        path: path.display().to_string(),
        source,
    };

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).map_err(io_err)?;
            read_csv(file)
        }
        "json" => {
            let content = std::fs::read_to_string(path).map_err(io_err)?;
            read_json(&content)
        }
        other => Err(SurveyError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a CSV export whose header row holds the question labels.
pub fn read_csv<R: Read>(reader: R) -> Result<RawTable, SurveyError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let record: RawRecord = headers
            .iter()
            .zip(row.iter())
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(header, value)| (header.clone(), Cell::Text(value.to_string())))
            .collect();
        records.push(record);
    }

    debug!("Parsed {} CSV rows", records.len());
    Ok(RawTable::new(headers, records))
}

/// Parse a JSON array of record objects, as returned by spreadsheet APIs.
///
/// Numbers become text, arrays stay structured and nulls count as missing.
pub fn read_json(content: &str) -> Result<RawTable, SurveyError> {
    let rows: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(content)?;

    let mut headers: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let mut record = RawRecord::new();
        for (key, value) in row {
            if !headers.contains(&key) {
                headers.push(key.clone());
            }
            if let Some(cell) = json_cell(value) {
                record.insert(key, cell);
            }
        }
        records.push(record);
    }

    debug!("Parsed {} JSON records", records.len());
    Ok(RawTable::new(headers, records))
}

fn json_cell(value: serde_json::Value) -> Option<Cell> {
    use serde_json::Value;

    match value {
        Value::Null => None,
        Value::String(s) => Some(Cell::Text(s)),
        Value::Array(items) => Some(Cell::List(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
        )),
        other => Some(Cell::Text(other.to_string())),
    }
}

/// Fetch a published CSV export over HTTP.
pub async fn fetch_csv(
    url: &str,
    timeout_seconds: u64,
    show_progress: bool,
) -> Result<RawTable, SurveyError> {
    info!("Fetching survey export: {}", url);

    let spinner = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Downloading survey responses...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = download(url, timeout_seconds).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let body = result?;
    read_csv(body.as_bytes())
}

async fn download(url: &str, timeout_seconds: u64) -> Result<String, SurveyError> {
    let fetch_err = |message: String| SurveyError::Fetch {
        url: url.to_string(),
        message,
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| fetch_err(e.to_string()))?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            fetch_err(format!("request timed out after {}s", timeout_seconds))
        } else if e.is_connect() {
            fetch_err("could not connect".to_string())
        } else {
            fetch_err(e.to_string())
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(fetch_err(format!("server responded with {}", status)));
    }

    response.text().await.map_err(|e| fetch_err(e.to_string()))
}

/// Small illustrative dataset used when the dashboard cannot reach its source.
pub fn sample_table() -> RawTable {
    let rows: [[&str; 8]; 4] = [
        [
            "Data Viz Fundamentals",
            "5",
            "🌟 Excellent - Clear, engaging, well-paced",
            "Just right - Perfect pace for my level",
            "Yes - I created/started [code sample / prototype / document / project file]",
            "Beginner",
            "Very clear examples and great energy.",
            "Apply the Gestalt principles to my next report.",
        ],
        [
            "Data Viz Fundamentals",
            "4",
            "✅ Good - Helpful and informative",
            "Slightly too slow - I wanted to go deeper",
            "Yes - I followed along but need to finish it",
            "Intermediate",
            "I wish we had more time for Q&A.",
            "Refactor my old Python script with new functions.",
        ],
        [
            "Advanced Python",
            "3",
            "✅ Good - Helpful and informative",
            "Slightly too fast - I could barely keep up",
            "No - I ran out of time",
            "Expert",
            "Too fast for me, slow down!",
            "Nothing yet, need to review my notes.",
        ],
        [
            "Advanced Python",
            "5",
            "🌟 Excellent - Clear, engaging, well-paced",
            "Just right - Perfect pace for my level",
            "Yes - I created/started [code sample / prototype / document / project file]",
            "Beginner",
            "Pacing was spot-on. Solid content.",
            "Build a new dashboard with Streamlit.",
        ],
    ];

    let columns = [
        Column::Session,
        Column::Confidence,
        Column::Facilitator,
        Column::Pace,
        Column::HandsOn,
        Column::Background,
        Column::Feedback,
        Column::Commitment,
    ];

    let headers = columns.iter().map(|c| c.label().to_string()).collect();
    let records = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .zip(row.iter())
                .map(|(column, value)| (column.label().to_string(), Cell::from(*value)))
                .collect()
        })
        .collect();

    RawTable::new(headers, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::ingest;
    use std::io::Write;

    const CSV_EXPORT: &str = "\
Which session did you attend?,How confident do you feel implementing what you learned today? ,The facilitator today was:,Was the workshop pace/level right for you?,Did you create a hands-on deliverable today?
Advanced Python,4,Excellent,Just right,Created
Advanced Python,,Good,Too basic,No - I ran out of time
";

    #[test]
    fn test_read_csv_trims_headers_and_skips_blank_cells() {
        let table = read_csv(CSV_EXPORT.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table
            .headers
            .contains(&Column::Confidence.label().to_string()));
        assert!(!table.records[1].contains_key(Column::Confidence.label()));

        let responses = ingest(&table).unwrap();
        assert_eq!(responses[0].confidence, Some(4.0));
        assert_eq!(responses[1].confidence, None);
    }

    #[test]
    fn test_read_json_records() {
        let json = r#"[
            {
                "Which session did you attend?": "Advanced Python",
                "How confident do you feel implementing what you learned today? ": 4,
                "The facilitator today was:": "Good",
                "Was the workshop pace/level right for you?": "Just right",
                "Did you create a hands-on deliverable today?": "Followed",
                "The facilitator today: (Select all that apply)": ["Patient", "Clear"],
                "Your background in this topic:": null
            }
        ]"#;

        let table = read_json(json).unwrap();
        let responses = ingest(&table).unwrap();
        assert_eq!(responses[0].confidence, Some(4.0));
        assert_eq!(responses[0].strengths, vec!["Patient", "Clear"]);
        assert_eq!(responses[0].background, None);
    }

    #[test]
    fn test_read_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(CSV_EXPORT.as_bytes()).unwrap();

        let table = read_file(&path).unwrap();
        assert_eq!(table.len(), 2);

        let err = read_file(&dir.path().join("responses.xlsx")).unwrap_err();
        assert!(matches!(err, SurveyError::UnsupportedFormat(_)));

        let err = read_file(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, SurveyError::Io { .. }));
    }

    #[test]
    fn test_sample_table_ingests() {
        let responses = ingest(&sample_table()).unwrap();
        assert_eq!(responses.len(), 4);
        assert!(responses.iter().all(|r| r.feedback.is_some()));
    }

    #[tokio::test]
    async fn test_fetch_csv_from_published_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/export.csv")
            .with_status(200)
            .with_body(CSV_EXPORT)
            .create_async()
            .await;

        let url = format!("{}/export.csv", server.url());
        let source = SurveySource::Remote {
            url,
            timeout_seconds: 5,
        };
        let table = source.load(false).await.unwrap();

        mock.assert_async().await;
        assert_eq!(table.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_csv_reports_http_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/export.csv")
            .with_status(404)
            .create_async()
            .await;

        let url = format!("{}/export.csv", server.url());
        let err = fetch_csv(&url, 5, false).await.unwrap_err();
        assert!(matches!(err, SurveyError::Fetch { .. }));
        assert!(err.to_string().contains("404"));
    }
}
