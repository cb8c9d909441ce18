//! Traceability scoring techniques
//!
//! Each technique produces a raw [`ScoreSurface`] over the full
//! (tests x code) cross-product from the shared trace indexes. What
//! post-processing applies afterwards (call-depth discount, per-test
//! max-normalization) and how links are extracted (threshold vs binary) is
//! described by the technique's [`TechniqueMeta`] - the flags are data, not
//! behavior, and the engine interprets them.

pub mod combined;
pub mod lcba;
pub mod lcs;
pub mod levenshtein;
pub mod naming;
pub mod tarantula;
pub mod tfidf;

pub use combined::Combined;
pub use lcba::LastCallBeforeAssert;
pub use lcs::{LcsBoth, LcsUnit};
pub use levenshtein::Levenshtein;
pub use naming::{NamingConvention, NamingConventionContains};
pub use tarantula::Tarantula;
pub use tfidf::{Tfidf, TfidfMultiset};

use crate::config::Thresholds;
use crate::score::ScoreSurface;
use crate::trace::TraceIndexes;
use crate::NameRecord;

/// Per-technique metadata driving post-processing and link extraction.
#[derive(Debug, Clone)]
pub struct TechniqueMeta {
    pub full_name: &'static str,
    pub arg_name: &'static str,
    /// Thresholded techniques extract links at `score >= threshold`;
    /// binary techniques extract exactly the pairs scoring 1.
    pub uses_threshold: bool,
    pub threshold: f64,
    pub normalise: bool,
    pub depth_discount: bool,
}

/// A traceability scoring technique.
pub trait Technique: Sync {
    fn meta(&self) -> &TechniqueMeta;

    /// Compute the raw score surface. Post-processing is the engine's job.
    fn score(&self, indexes: &TraceIndexes) -> ScoreSurface;
}

/// Instantiate the technique registered under `arg_name`.
pub fn technique_for(arg_name: &str, thresholds: &Thresholds) -> Option<Box<dyn Technique>> {
    match arg_name {
        "nc" => Some(Box::new(NamingConvention::new())),
        "ncc" => Some(Box::new(NamingConventionContains::new())),
        "lcsb" => Some(Box::new(LcsBoth::new(thresholds.lcsb))),
        "lcsu" => Some(Box::new(LcsUnit::new(thresholds.lcsu))),
        "leven" => Some(Box::new(Levenshtein::new(thresholds.leven))),
        "lcba" => Some(Box::new(LastCallBeforeAssert::new())),
        "tarantula" => Some(Box::new(Tarantula::new(thresholds.tarantula))),
        "tfidf" => Some(Box::new(Tfidf::new(thresholds.tfidf))),
        "tfidf_multiset" => Some(Box::new(TfidfMultiset::new(thresholds.tfidf_multiset))),
        _ => None,
    }
}

/// Fill a dense surface: 0 for every pair outside the test's call set,
/// `raw(test, code)` for every pair inside it.
pub(crate) fn score_called_pairs<F>(indexes: &TraceIndexes, mut raw: F) -> ScoreSurface
where
    F: FnMut(&NameRecord, &NameRecord) -> f64,
{
    let mut surface = ScoreSurface::new();
    for test in &indexes.test_names {
        let called = indexes.called_by.get(&test.qualified);
        for code in &indexes.code_names {
            let score = match called {
                Some(set) if set.contains(&code.qualified) => raw(test, code),
                _ => 0.0,
            };
            surface.insert(&test.qualified, &code.qualified, score);
        }
    }
    surface
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SELECTABLE_TECHNIQUES;

    #[test]
    fn every_selectable_technique_resolves() {
        let thresholds = Thresholds::default();
        for arg_name in SELECTABLE_TECHNIQUES {
            let technique = technique_for(arg_name, &thresholds)
                .unwrap_or_else(|| panic!("technique '{arg_name}' not registered"));
            assert_eq!(technique.meta().arg_name, arg_name);
        }
        assert!(technique_for("bogus", &thresholds).is_none());
    }

    #[test]
    fn thresholds_flow_into_metadata() {
        let thresholds = Thresholds {
            lcsb: 0.42,
            ..Thresholds::default()
        };
        let technique = technique_for("lcsb", &thresholds).unwrap();
        assert_eq!(technique.meta().threshold, 0.42);
        assert!(technique.meta().uses_threshold);
    }
}
