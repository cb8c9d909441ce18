//! Tarantula spectrum technique (tarantula)

use super::{score_called_pairs, Technique, TechniqueMeta};
use crate::score::ScoreSurface;
use crate::trace::TraceIndexes;

/// Spectrum-based scoring: code called by fewer tests is more suspicious of
/// being the subject of this one.
///
/// `score = 1 / ((callers - 1) / (tests - 1) + 1)`; with a single test the
/// denominator degenerates and the raw score is defined as 0.
pub struct Tarantula {
    meta: TechniqueMeta,
}

impl Tarantula {
    pub fn new(threshold: f64) -> Self {
        Self {
            meta: TechniqueMeta {
                full_name: "Tarantula",
                arg_name: "tarantula",
                uses_threshold: true,
                threshold,
                normalise: true,
                depth_discount: true,
            },
        }
    }
}

impl Technique for Tarantula {
    fn meta(&self) -> &TechniqueMeta {
        &self.meta
    }

    fn score(&self, indexes: &TraceIndexes) -> ScoreSurface {
        let number_of_tests = indexes.test_names.len();
        score_called_pairs(indexes, |_test, code| {
            if number_of_tests <= 1 {
                return 0.0;
            }
            let callers = indexes
                .calls_test
                .get(&code.qualified)
                .map_or(0, |tests| tests.len());
            1.0 / ((callers as f64 - 1.0) / (number_of_tests as f64 - 1.0) + 1.0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::techniques::testutil::indexes_from_calls;

    #[test]
    fn exclusive_caller_scores_one() {
        let indexes = indexes_from_calls(&[
            ("pkg.t.test_a", &["pkg.a"]),
            ("pkg.t.test_b", &["pkg.b"]),
        ]);
        let surface = Tarantula::new(0.95).score(&indexes);
        assert_eq!(surface.get("pkg.t.test_a", "pkg.a"), 1.0);
    }

    #[test]
    fn shared_code_scores_lower() {
        let indexes = indexes_from_calls(&[
            ("pkg.t.test_a", &["pkg.shared"]),
            ("pkg.t.test_b", &["pkg.shared"]),
            ("pkg.t.test_c", &["pkg.other"]),
        ]);
        let surface = Tarantula::new(0.95).score(&indexes);
        // callers = 2, tests = 3: 1 / ((2-1)/(3-1) + 1) = 2/3.
        let score = surface.get("pkg.t.test_a", "pkg.shared");
        assert!((score - 2.0 / 3.0).abs() < 1e-12, "got {score}");
    }

    #[test]
    fn single_test_degenerates_to_zero() {
        let indexes = indexes_from_calls(&[("pkg.t.test_only", &["pkg.a"])]);
        let surface = Tarantula::new(0.95).score(&indexes);
        assert_eq!(surface.get("pkg.t.test_only", "pkg.a"), 0.0);
    }
}
