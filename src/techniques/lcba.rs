//! Last-call-before-assert technique (lcba)

use super::{score_called_pairs, Technique, TechniqueMeta};
use crate::score::ScoreSurface;
use crate::trace::TraceIndexes;

/// Binary technique linking a test to the code units whose return was the
/// most recent one observed before an assert inside the test's window.
pub struct LastCallBeforeAssert {
    meta: TechniqueMeta,
}

impl LastCallBeforeAssert {
    pub fn new() -> Self {
        Self {
            meta: TechniqueMeta {
                full_name: "Last Call Before Assert",
                arg_name: "lcba",
                uses_threshold: false,
                threshold: 0.0,
                normalise: false,
                depth_discount: false,
            },
        }
    }
}

impl Default for LastCallBeforeAssert {
    fn default() -> Self {
        Self::new()
    }
}

impl Technique for LastCallBeforeAssert {
    fn meta(&self) -> &TechniqueMeta {
        &self.meta
    }

    fn score(&self, indexes: &TraceIndexes) -> ScoreSurface {
        score_called_pairs(indexes, |test, code| {
            let before_assert = indexes
                .called_before_assert
                .get(&test.qualified)
                .is_some_and(|set| set.contains(&code.qualified));
            if before_assert {
                1.0
            } else {
                0.0
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::techniques::testutil::indexes_from_calls;

    #[test]
    fn links_only_code_returned_before_assert() {
        let mut indexes = indexes_from_calls(&[("pkg.t.test_x", &["pkg.a", "pkg.b"])]);
        indexes
            .called_before_assert
            .entry("pkg.t.test_x".to_string())
            .or_default()
            .insert("pkg.b".to_string());

        let surface = LastCallBeforeAssert::new().score(&indexes);
        assert_eq!(surface.get("pkg.t.test_x", "pkg.a"), 0.0);
        assert_eq!(surface.get("pkg.t.test_x", "pkg.b"), 1.0);
    }

    #[test]
    fn no_asserts_means_no_links() {
        let indexes = indexes_from_calls(&[("pkg.t.test_x", &["pkg.a"])]);
        let surface = LastCallBeforeAssert::new().score(&indexes);
        assert_eq!(surface.get("pkg.t.test_x", "pkg.a"), 0.0);
    }
}
