//! Score surfaces and their post-processors
//!
//! A [`ScoreSurface`] holds one traceability score per (test, code) pair.
//! Techniques produce raw surfaces; the engine then applies call-depth
//! discounting and per-test max-normalization according to each technique's
//! metadata flags, in that order.

use std::collections::BTreeMap;

/// Multiplier applied once per level of relative call depth beyond the
/// first.
pub const DISCOUNT_FACTOR: f64 = 0.5;

/// Dense per-technique score mapping: test id -> code id -> score.
///
/// Every technique defines a score for the full (tests x code)
/// cross-product; pairs outside the test's call set are 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSurface {
    rows: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ScoreSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, test: &str, code: &str, score: f64) {
        self.rows
            .entry(test.to_string())
            .or_default()
            .insert(code.to_string(), score);
    }

    /// Score for a pair; 0 when the pair was never scored.
    pub fn get(&self, test: &str, code: &str) -> f64 {
        self.rows
            .get(test)
            .and_then(|row| row.get(code))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn row(&self, test: &str) -> Option<&BTreeMap<String, f64>> {
        self.rows.get(test)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, f64>)> {
        self.rows.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Discount every scored pair by `DISCOUNT_FACTOR^(depth - 1)` where
    /// `depth` is the pair's minimum relative call depth. Pairs without a
    /// depth entry are left unchanged (they are 0 already).
    pub fn apply_depth_discount(&mut self, depths: &BTreeMap<String, BTreeMap<String, u32>>) {
        for (test, row) in &mut self.rows {
            let Some(test_depths) = depths.get(test) else {
                continue;
            };
            for (code, depth) in test_depths {
                if let Some(score) = row.get_mut(code) {
                    *score *= DISCOUNT_FACTOR.powi(depth.saturating_sub(1) as i32);
                }
            }
        }
    }

    /// Divide every row by its maximum score, when that maximum is
    /// positive. Afterwards each row with any positive score has maximum
    /// exactly 1.
    pub fn normalise_rows(&mut self) {
        for row in self.rows.values_mut() {
            let max = row.values().copied().fold(0.0f64, f64::max);
            if max > 0.0 {
                for score in row.values_mut() {
                    *score /= max;
                }
            }
        }
    }
}
