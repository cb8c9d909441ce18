//! Longest-common-subsequence techniques (lcsb, lcsu)

use super::{score_called_pairs, Technique, TechniqueMeta};
use crate::score::ScoreSurface;
use crate::text::{lcs, strip_test_prefix, PairCache};
use crate::trace::TraceIndexes;

/// LCS length normalized by the longer of the two names.
pub struct LcsBoth {
    meta: TechniqueMeta,
}

impl LcsBoth {
    pub fn new(threshold: f64) -> Self {
        Self {
            meta: TechniqueMeta {
                full_name: "Longest Common Subsequence - Both",
                arg_name: "lcsb",
                uses_threshold: true,
                threshold,
                normalise: true,
                depth_discount: true,
            },
        }
    }
}

impl Technique for LcsBoth {
    fn meta(&self) -> &TechniqueMeta {
        &self.meta
    }

    fn score(&self, indexes: &TraceIndexes) -> ScoreSurface {
        let mut cache = PairCache::new();
        score_called_pairs(indexes, |test, code| {
            let stripped = strip_test_prefix(&test.short);
            cache.get_or_compute(stripped, &code.short, |stripped, code| {
                let longest = stripped.chars().count().max(code.chars().count());
                if longest == 0 {
                    return 0.0;
                }
                lcs(stripped, code) as f64 / longest as f64
            })
        })
    }
}

/// LCS length normalized by the code name alone.
pub struct LcsUnit {
    meta: TechniqueMeta,
}

impl LcsUnit {
    pub fn new(threshold: f64) -> Self {
        Self {
            meta: TechniqueMeta {
                full_name: "Longest Common Subsequence - Unit",
                arg_name: "lcsu",
                uses_threshold: true,
                threshold,
                normalise: true,
                depth_discount: true,
            },
        }
    }
}

impl Technique for LcsUnit {
    fn meta(&self) -> &TechniqueMeta {
        &self.meta
    }

    fn score(&self, indexes: &TraceIndexes) -> ScoreSurface {
        let mut cache = PairCache::new();
        score_called_pairs(indexes, |test, code| {
            let stripped = strip_test_prefix(&test.short);
            cache.get_or_compute(stripped, &code.short, |stripped, code| {
                let length = code.chars().count();
                if length == 0 {
                    return 0.0;
                }
                lcs(stripped, code) as f64 / length as f64
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::techniques::testutil::indexes_from_calls;

    #[test]
    fn identical_stripped_names_score_one() {
        let indexes = indexes_from_calls(&[("pkg.tests.test_bar", &["pkg.src.bar"])]);
        let surface = LcsBoth::new(0.65).score(&indexes);
        assert_eq!(surface.get("pkg.tests.test_bar", "pkg.src.bar"), 1.0);
    }

    #[test]
    fn lcsb_normalizes_by_longer_name() {
        // strip(test_validate) = "validate" (8), code "date" (4), lcs = 4.
        let indexes = indexes_from_calls(&[("pkg.tests.test_validate", &["pkg.src.date"])]);
        let surface = LcsBoth::new(0.65).score(&indexes);
        let score = surface.get("pkg.tests.test_validate", "pkg.src.date");
        assert!((score - 0.5).abs() < 1e-12, "got {score}");
    }

    #[test]
    fn lcsu_normalizes_by_code_name() {
        // Same pair: 4 / |"date"| = 1.0 under lcsu.
        let indexes = indexes_from_calls(&[("pkg.tests.test_validate", &["pkg.src.date"])]);
        let surface = LcsUnit::new(0.75).score(&indexes);
        assert_eq!(surface.get("pkg.tests.test_validate", "pkg.src.date"), 1.0);
    }

    #[test]
    fn uncalled_pairs_are_zero() {
        let indexes = indexes_from_calls(&[
            ("pkg.tests.test_bar", &["pkg.src.other"]),
            ("pkg.tests.test_two", &["pkg.src.bar"]),
        ]);
        let surface = LcsBoth::new(0.65).score(&indexes);
        assert_eq!(surface.get("pkg.tests.test_bar", "pkg.src.bar"), 0.0);
    }
}
