//! Link maps and threshold-based link extraction

use crate::score::ScoreSurface;
use crate::techniques::TechniqueMeta;
use crate::AnalysisError;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Test id -> code ids, ordered by descending confidence.
///
/// The same shape serves predicted links and ground-truth links; both are
/// exchanged as JSON objects mapping test names to lists of code names.
pub type LinkMap = BTreeMap<String, Vec<String>>;

/// Load a links JSON file (ground truth or predictions).
pub fn load_links(path: &Path) -> Result<LinkMap, AnalysisError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AnalysisError::InputNotFound(path.to_path_buf())
        } else {
            AnalysisError::InputUnreadable {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    serde_json::from_str(&contents).map_err(|e| AnalysisError::InputMalformed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

/// Extract predicted links from a score surface.
///
/// Thresholded techniques keep every pair scoring at or above their
/// threshold; binary techniques keep exactly the pairs scoring 1. Candidates
/// are sorted by descending score with a stable sort, so ties keep the
/// surface's iteration order. When `only_tests` is given, predictions are
/// restricted to those tests and every requested test receives an entry,
/// even if the trace never observed it.
pub fn predict_links(
    surface: &ScoreSurface,
    meta: &TechniqueMeta,
    only_tests: Option<&BTreeSet<String>>,
) -> LinkMap {
    let mut links = LinkMap::new();

    for (test, row) in surface.rows() {
        if let Some(only) = only_tests {
            if !only.contains(test) {
                continue;
            }
        }

        let mut candidates: Vec<(&String, f64)> = row
            .iter()
            .filter(|(_, &score)| {
                if meta.uses_threshold {
                    score >= meta.threshold
                } else {
                    score == 1.0
                }
            })
            .map(|(code, &score)| (code, score))
            .collect();
        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        links.insert(
            test.clone(),
            candidates.into_iter().map(|(code, _)| code.clone()).collect(),
        );
    }

    if let Some(only) = only_tests {
        for test in only {
            links.entry(test.clone()).or_default();
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::techniques::TechniqueMeta;

    fn thresholded(threshold: f64) -> TechniqueMeta {
        TechniqueMeta {
            full_name: "Test Technique",
            arg_name: "test",
            uses_threshold: true,
            threshold,
            normalise: true,
            depth_discount: true,
        }
    }

    fn binary() -> TechniqueMeta {
        TechniqueMeta {
            full_name: "Binary Technique",
            arg_name: "bin",
            uses_threshold: false,
            threshold: 0.0,
            normalise: false,
            depth_discount: false,
        }
    }

    #[test]
    fn thresholded_selection_keeps_scores_at_or_above() {
        let mut surface = ScoreSurface::new();
        surface.insert("t", "a", 0.9);
        surface.insert("t", "b", 0.65);
        surface.insert("t", "c", 0.64);
        let links = predict_links(&surface, &thresholded(0.65), None);
        assert_eq!(links["t"], vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn binary_selection_keeps_only_exact_ones() {
        let mut surface = ScoreSurface::new();
        surface.insert("t", "a", 1.0);
        surface.insert("t", "b", 0.999);
        let links = predict_links(&surface, &binary(), None);
        assert_eq!(links["t"], vec!["a".to_string()]);
    }

    #[test]
    fn links_are_sorted_by_descending_score() {
        let mut surface = ScoreSurface::new();
        surface.insert("t", "low", 0.7);
        surface.insert("t", "high", 1.0);
        surface.insert("t", "mid", 0.8);
        let links = predict_links(&surface, &thresholded(0.5), None);
        assert_eq!(
            links["t"],
            vec!["high".to_string(), "mid".to_string(), "low".to_string()]
        );
    }

    #[test]
    fn only_tests_filters_and_backfills_empty() {
        let mut surface = ScoreSurface::new();
        surface.insert("t1", "a", 1.0);
        surface.insert("t2", "a", 1.0);
        let only: BTreeSet<String> = ["t1".to_string(), "t3".to_string()].into();
        let links = predict_links(&surface, &thresholded(0.5), Some(&only));
        assert_eq!(links.len(), 2);
        assert_eq!(links["t1"], vec!["a".to_string()]);
        assert!(links["t3"].is_empty());
        assert!(!links.contains_key("t2"));
    }
}
