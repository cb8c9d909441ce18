//! Error types for the analysis pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised at the orchestrator boundary.
///
/// Per-row trace anomalies are deliberately absent: a malformed trace row is
/// counted and skipped by the reader/indexer, never surfaced as an error.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input in {path}: {detail}")]
    InputMalformed { path: PathBuf, detail: String },

    #[error("test '{0}' appears in ground truth but not in predicted links")]
    MissingPrediction(String),

    #[error("unknown technique name: {0}")]
    UnknownTechnique(String),

    #[error("unknown metric name: {0}")]
    UnknownMetric(String),

    #[error("failed to write {path}: {source}")]
    OutputFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
