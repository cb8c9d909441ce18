//! Levenshtein-distance technique (leven)

use super::{score_called_pairs, Technique, TechniqueMeta};
use crate::score::ScoreSurface;
use crate::text::{levenshtein, strip_test_prefix, PairCache};
use crate::trace::TraceIndexes;

/// Edit-distance similarity: `1 - distance / max(|test'|, |code|)`.
pub struct Levenshtein {
    meta: TechniqueMeta,
}

impl Levenshtein {
    pub fn new(threshold: f64) -> Self {
        Self {
            meta: TechniqueMeta {
                full_name: "Levenshtein Distance",
                arg_name: "leven",
                uses_threshold: true,
                threshold,
                normalise: true,
                depth_discount: true,
            },
        }
    }
}

impl Technique for Levenshtein {
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
                1.0 - levenshtein(stripped, code) as f64 / longest as f64
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
        let surface = Levenshtein::new(0.95).score(&indexes);
        assert_eq!(surface.get("pkg.tests.test_bar", "pkg.src.bar"), 1.0);
    }

    #[test]
    fn distance_reduces_similarity() {
        // strip(test_bars) = "bars" vs "bar": distance 1, max length 4.
        let indexes = indexes_from_calls(&[("pkg.tests.test_bars", &["pkg.src.bar"])]);
        let surface = Levenshtein::new(0.95).score(&indexes);
        let score = surface.get("pkg.tests.test_bars", "pkg.src.bar");
        assert!((score - 0.75).abs() < 1e-12, "got {score}");
    }

    #[test]
    fn disjoint_names_score_zero() {
        let indexes = indexes_from_calls(&[("pkg.tests.test_abc", &["pkg.src.xyz"])]);
        let surface = Levenshtein::new(0.95).score(&indexes);
        assert_eq!(surface.get("pkg.tests.test_abc", "pkg.src.xyz"), 0.0);
    }
}
