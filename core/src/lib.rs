pub mod analyze_segment;
pub mod classifier;
pub mod cli;
pub mod ingest;
pub mod metrics;
pub mod models;
pub mod prefill;
pub mod signals;
pub mod statistics;
pub mod storage;
pub mod time_value;
pub mod types;

#[cfg(feature = "python")]
mod py;

use serde::Deserialize;
use thiserror::Error;

pub use analyze_segment::{analyze_segment, AnalysisTracker, Generation};
pub use classifier::{classify, classify_with};
pub use ingest::{ingest_rows, read_csv, read_csv_samples, Row};
pub use models::{Sample, SampleWindow, Section};
pub use statistics::{summarize, StatsError};
pub use time_value::{format_from_seconds, format_pace, parse_pace_label, parse_to_seconds, EventKind, Precision};
pub use types::{ClassificationResult, SegmentAnalysis, SegmentSummary, Thresholds, WorkoutStepDraft, WorkoutType};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("parse error at {path}: {message}")]
    Parse { path: String, message: String },
    #[error("no data in range")]
    EmptyWindow,
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<StatsError> for ApiError {
    fn from(e: StatsError) -> Self {
        match e {
            StatsError::EmptyWindow => ApiError::EmptyWindow,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnalyzeSegmentIn {
    rows: Vec<Row>,
    section: Section,
    #[serde(default = "window_all")]
    window: SampleWindow,
    #[serde(default)]
    thresholds: Option<Thresholds>,
}

fn window_all() -> SampleWindow {
    SampleWindow::All
}

/// JSON inn → JSON ut.
///
/// Inn: `{ "rows": [...], "section": "main", "window": {"mode": "time", "start": "..", "end": ".."}, "thresholds": {..} }`
/// (`window` og `thresholds` er valgfrie). Ut: serialisert `SegmentAnalysis`.
pub fn analyze_segment_json(json_in: &str) -> Result<String, ApiError> {
    let mut de = serde_json::Deserializer::from_str(json_in);
    let parsed: AnalyzeSegmentIn = serde_path_to_error::deserialize(&mut de).map_err(|e| ApiError::Parse {
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })?;

    // Vindusgrenser normaliseres som tidsstemplene
    let window = match parsed.window {
        SampleWindow::Time { start, end } => SampleWindow::time(&start, &end),
        other => other,
    };
    let thresholds = parsed.thresholds.unwrap_or_default();

    let samples = ingest_rows(&parsed.rows);
    let analysis = analyze_segment(&samples, &window, parsed.section, &thresholds)?;
    Ok(serde_json::to_string(&analysis)?)
}
