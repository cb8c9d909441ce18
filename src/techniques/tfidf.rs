//! TF-IDF techniques (tfidf, tfidf_multiset)
//!
//! Treats each test as a document and the code units it exercises as terms.
//! The set variant weighs every called unit equally; the multiset variant
//! weighs by call counts. All logarithms are natural.

use super::{score_called_pairs, Technique, TechniqueMeta};
use crate::score::ScoreSurface;
use crate::trace::TraceIndexes;
use std::collections::BTreeMap;

fn idf_scores(indexes: &TraceIndexes) -> BTreeMap<String, f64> {
    let number_of_tests = indexes.test_names.len() as f64;
    indexes
        .calls_test
        .iter()
        .map(|(code, callers)| {
            let idf = if callers.is_empty() {
                0.0
            } else {
                (1.0 + number_of_tests / callers.len() as f64).ln()
            };
            (code.clone(), idf)
        })
        .collect()
}

/// Set-based TF-IDF: `tf(t) = ln(1 + 1/|called_by(t)|)`.
pub struct Tfidf {
    meta: TechniqueMeta,
}

impl Tfidf {
    pub fn new(threshold: f64) -> Self {
        Self {
            meta: TechniqueMeta {
                full_name: "TF-IDF",
                arg_name: "tfidf",
                uses_threshold: true,
                threshold,
                normalise: true,
                depth_discount: true,
            },
        }
    }
}

impl Technique for Tfidf {
    fn meta(&self) -> &TechniqueMeta {
        &self.meta
    }

    fn score(&self, indexes: &TraceIndexes) -> ScoreSurface {
        let idf = idf_scores(indexes);
        score_called_pairs(indexes, |test, code| {
            let called = indexes
                .called_by
                .get(&test.qualified)
                .map_or(0, |set| set.len());
            if called == 0 {
                return 0.0;
            }
            let tf = (1.0 + 1.0 / called as f64).ln();
            tf * idf.get(&code.qualified).copied().unwrap_or(0.0)
        })
    }
}

/// Multiset TF-IDF: `tf(t, c) = ln(1 + count(t, c) / total_calls(t))`.
pub struct TfidfMultiset {
    meta: TechniqueMeta,
}

impl TfidfMultiset {
    pub fn new(threshold: f64) -> Self {
        Self {
            meta: TechniqueMeta {
                full_name: "TF-IDF (Multiset)",
                arg_name: "tfidf_multiset",
                uses_threshold: true,
                threshold,
                normalise: true,
                depth_discount: true,
            },
        }
    }
}

impl Technique for TfidfMultiset {
    fn meta(&self) -> &TechniqueMeta {
        &self.meta
    }

    fn score(&self, indexes: &TraceIndexes) -> ScoreSurface {
        let idf = idf_scores(indexes);
        score_called_pairs(indexes, |test, code| {
            let Some(counts) = indexes.called_by_count.get(&test.qualified) else {
                return 0.0;
            };
            let total: u64 = counts.values().sum();
            if total == 0 {
                return 0.0;
            }
            let count = counts.get(&code.qualified).copied().unwrap_or(0);
            let tf = (1.0 + count as f64 / total as f64).ln();
            tf * idf.get(&code.qualified).copied().unwrap_or(0.0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::techniques::testutil::indexes_from_calls;

    #[test]
    fn tfidf_matches_formula() {
        let indexes = indexes_from_calls(&[
            ("pkg.t.test_a", &["pkg.a", "pkg.shared"]),
            ("pkg.t.test_b", &["pkg.shared"]),
        ]);
        let surface = Tfidf::new(0.90).score(&indexes);

        // test_a calls 2 units: tf = ln(1 + 1/2). pkg.a called by 1 of 2
        // tests: idf = ln(1 + 2/1).
        let expected = (1.0f64 + 0.5).ln() * (1.0f64 + 2.0).ln();
        let score = surface.get("pkg.t.test_a", "pkg.a");
        assert!((score - expected).abs() < 1e-12, "got {score}");

        // pkg.shared called by both tests: idf = ln(1 + 2/2) = ln 2.
        let expected_shared = (1.0f64 + 0.5).ln() * 2.0f64.ln();
        let shared = surface.get("pkg.t.test_a", "pkg.shared");
        assert!((shared - expected_shared).abs() < 1e-12, "got {shared}");
    }

    #[test]
    fn multiset_weighs_by_call_counts() {
        let mut indexes = indexes_from_calls(&[
            ("pkg.t.test_a", &["pkg.hot", "pkg.cold"]),
            ("pkg.t.test_b", &["pkg.cold"]),
        ]);
        // test_a called pkg.hot three times.
        indexes
            .called_by_count
            .get_mut("pkg.t.test_a")
            .unwrap()
            .insert("pkg.hot".to_string(), 3);

        let surface = TfidfMultiset::new(0.90).score(&indexes);

        // total calls by test_a = 3 + 1; tf(hot) = ln(1 + 3/4).
        let expected_hot = (1.0f64 + 0.75).ln() * (1.0f64 + 2.0).ln();
        let hot = surface.get("pkg.t.test_a", "pkg.hot");
        assert!((hot - expected_hot).abs() < 1e-12, "got {hot}");

        let expected_cold = (1.0f64 + 0.25).ln() * (1.0f64 + 1.0).ln();
        let cold = surface.get("pkg.t.test_a", "pkg.cold");
        assert!((cold - expected_cold).abs() < 1e-12, "got {cold}");
    }

    #[test]
    fn multiset_ignores_units_seen_without_call_events() {
        let mut indexes = indexes_from_calls(&[("pkg.t.test_a", &["pkg.a"])]);
        // Observed via a RETURN only: present in called_by, absent from counts.
        indexes
            .called_by
            .get_mut("pkg.t.test_a")
            .unwrap()
            .insert("pkg.ret_only".to_string());
        indexes
            .code_names
            .insert(crate::NameRecord::new("pkg.ret_only", "ret_only"));
        indexes
            .calls_test
            .entry("pkg.ret_only".to_string())
            .or_default()
            .insert("pkg.t.test_a".to_string());

        let surface = TfidfMultiset::new(0.90).score(&indexes);
        assert_eq!(surface.get("pkg.t.test_a", "pkg.ret_only"), 0.0);
    }
}
