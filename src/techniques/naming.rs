//! Naming-convention techniques (nc, ncc)
//!
//! Binary techniques that link a test to a called code unit when the code
//! unit's short name matches (or is contained in) the test's short name
//! after the conventional test prefix is stripped.

use super::{score_called_pairs, Technique, TechniqueMeta};
use crate::score::ScoreSurface;
use crate::text::strip_test_prefix;
use crate::trace::TraceIndexes;

/// Exact-match naming convention: `short(code) == strip(short(test))`.
pub struct NamingConvention {
    meta: TechniqueMeta,
}

impl NamingConvention {
    pub fn new() -> Self {
        Self {
            meta: TechniqueMeta {
                full_name: "Naming Conventions",
                arg_name: "nc",
                uses_threshold: false,
                threshold: 0.0,
                normalise: false,
                depth_discount: false,
            },
        }
    }
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::new()
    }
}

impl Technique for NamingConvention {
    fn meta(&self) -> &TechniqueMeta {
        &self.meta
    }

    fn score(&self, indexes: &TraceIndexes) -> ScoreSurface {
        score_called_pairs(indexes, |test, code| {
            if code.short == strip_test_prefix(&test.short) {
                1.0
            } else {
                0.0
            }
        })
    }
}

/// Containment naming convention: `short(code)` is a substring of
/// `strip(short(test))`.
pub struct NamingConventionContains {
    meta: TechniqueMeta,
}

impl NamingConventionContains {
    pub fn new() -> Self {
        Self {
            meta: TechniqueMeta {
                full_name: "Naming Conventions - Contains",
                arg_name: "ncc",
                uses_threshold: false,
                threshold: 0.0,
                normalise: false,
                depth_discount: false,
            },
        }
    }
}

impl Default for NamingConventionContains {
    fn default() -> Self {
        Self::new()
    }
}

impl Technique for NamingConventionContains {
    fn meta(&self) -> &TechniqueMeta {
        &self.meta
    }

    fn score(&self, indexes: &TraceIndexes) -> ScoreSurface {
        score_called_pairs(indexes, |test, code| {
            if strip_test_prefix(&test.short).contains(code.short.as_str()) {
                1.0
            } else {
                0.0
            }
        })
    }
}
