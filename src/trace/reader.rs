//! Trace CSV reader
//!
//! Parses a tracer-produced CSV into typed records. Trace rows can carry
//! very large values in the textual columns (captured return values, stack
//! messages); the csv reader grows its buffers as needed and imposes no
//! per-field cap. Rows are allowed to omit trailing columns for event types
//! that do not populate them.

use crate::{AnalysisError, EventType, FunctionType, TestingMethod, TraceRecord};
use std::path::Path;

const DEPTH: &str = "Depth";
const FUNCTION_TYPE: &str = "Function Type";
const TESTING_METHOD: &str = "Testing Method";
const FUNCTION_NAME: &str = "Function Name";
const QUALIFIED_FUNCTION_NAME: &str = "Fully Qualified Function Name";
const CLASS_NAME: &str = "Class Name";
const QUALIFIED_CLASS_NAME: &str = "Fully Qualified Class Name";
const EVENT_TYPE: &str = "Event Type";

/// A parsed trace plus the number of rows that had to be skipped.
#[derive(Debug, Default)]
pub struct TraceLog {
    pub records: Vec<TraceRecord>,
    /// Rows dropped because they were malformed (bad CSV, unparseable
    /// depth). Never fatal; surfaced once as a warning by the engine.
    pub skipped_rows: usize,
}

/// Read a trace CSV into typed records.
///
/// A missing file or an absent required header column is fatal; a malformed
/// individual row is counted and skipped.
pub fn read_trace(path: &Path) -> Result<TraceLog, AnalysisError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| reader_error(path, e))?;

    let headers = reader.headers().map_err(|e| reader_error(path, e))?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let required = |name: &str| -> Result<usize, AnalysisError> {
        column(name).ok_or_else(|| AnalysisError::InputMalformed {
            path: path.to_path_buf(),
            detail: format!("missing required CSV header column '{name}'"),
        })
    };

    let depth_idx = required(DEPTH)?;
    let function_type_idx = required(FUNCTION_TYPE)?;
    let testing_method_idx = required(TESTING_METHOD)?;
    let event_type_idx = required(EVENT_TYPE)?;
    let function_name_idx = column(FUNCTION_NAME);
    let qualified_function_name_idx = column(QUALIFIED_FUNCTION_NAME);
    let class_name_idx = column(CLASS_NAME);
    let qualified_class_name_idx = column(QUALIFIED_CLASS_NAME);

    let field = |row: &csv::StringRecord, idx: Option<usize>| -> String {
        idx.and_then(|i| row.get(i)).unwrap_or("").to_string()
    };

    let mut log = TraceLog::default();
    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(_) => {
                log.skipped_rows += 1;
                continue;
            }
        };

        let depth = match field(&row, Some(depth_idx)).trim().parse::<u32>() {
            Ok(depth) => depth,
            Err(_) => {
                log.skipped_rows += 1;
                continue;
            }
        };

        log.records.push(TraceRecord {
            depth,
            function_type: FunctionType::from_trace(&field(&row, Some(function_type_idx))),
            testing_method: TestingMethod::from_trace(&field(&row, Some(testing_method_idx))),
            event_type: EventType::from_trace(&field(&row, Some(event_type_idx))),
            function_name: field(&row, function_name_idx),
            qualified_function_name: field(&row, qualified_function_name_idx),
            class_name: field(&row, class_name_idx),
            qualified_class_name: field(&row, qualified_class_name_idx),
        });
    }

    Ok(log)
}

fn reader_error(path: &Path, error: csv::Error) -> AnalysisError {
    match error.kind() {
        csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
            AnalysisError::InputNotFound(path.to_path_buf())
        }
        _ => AnalysisError::InputMalformed {
            path: path.to_path_buf(),
            detail: error.to_string(),
        },
    }
}
