//! JSON reporter for link and classification files
//!
//! All link-shaped structures are ordered maps, so serialization produces
//! key-sorted, pretty-printed JSON that diffs cleanly between runs.

use crate::AnalysisError;
use serde::Serialize;
use std::path::Path;

/// Write any serializable artifact as pretty-printed JSON.
pub fn write_json<T: Serialize>(artifact: &T, path: &Path) -> Result<(), AnalysisError> {
    let contents = serde_json::to_string_pretty(artifact).map_err(|e| {
        AnalysisError::OutputFailed {
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        }
    })?;
    std::fs::write(path, contents + "\n").map_err(|e| AnalysisError::OutputFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
