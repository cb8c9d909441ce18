//! Mean-of-techniques pseudo-technique (combined)

use super::TechniqueMeta;
use crate::score::ScoreSurface;

/// Averages the surfaces of the selected techniques into one, then applies
/// per-test max-normalization. It runs no scoring algorithm of its own, so
/// it does not implement the `Technique` trait; the engine invokes it over
/// the other techniques' finished surfaces.
pub struct Combined {
    meta: TechniqueMeta,
}

impl Combined {
    pub fn new(threshold: f64) -> Self {
        Self {
            meta: TechniqueMeta {
                full_name: "Combined (Simple Average)",
                arg_name: "combined",
                uses_threshold: true,
                threshold,
                normalise: true,
                depth_discount: false,
            },
        }
    }

    pub fn meta(&self) -> &TechniqueMeta {
        &self.meta
    }

    /// Mean of the input surfaces, normalized per test row.
    pub fn combine(&self, surfaces: &[ScoreSurface]) -> ScoreSurface {
        let mut combined = ScoreSurface::new();
        if surfaces.is_empty() {
            return combined;
        }

        let weight = 1.0 / surfaces.len() as f64;
        for surface in surfaces {
            for (test, row) in surface.rows() {
                for (code, score) in row {
                    let sum = combined.get(test, code) + score * weight;
                    combined.insert(test, code, sum);
                }
            }
        }

        combined.normalise_rows();
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(cells: &[(&str, &str, f64)]) -> ScoreSurface {
        let mut s = ScoreSurface::new();
        for (test, code, score) in cells {
            s.insert(test, code, *score);
        }
        s
    }

    #[test]
    fn averages_across_techniques() {
        let a = surface(&[("t", "x", 1.0), ("t", "y", 0.0)]);
        let b = surface(&[("t", "x", 0.0), ("t", "y", 0.5)]);
        let combined = Combined::new(0.85).combine(&[a, b]);
        // Means are 0.5 and 0.25; normalization scales the row max to 1.
        assert_eq!(combined.get("t", "x"), 1.0);
        assert_eq!(combined.get("t", "y"), 0.5);
    }

    #[test]
    fn identical_inputs_reduce_to_normalized_input() {
        let s = surface(&[("t", "x", 0.8), ("t", "y", 0.4)]);
        let combined = Combined::new(0.85).combine(&[s.clone(), s.clone(), s]);
        assert_eq!(combined.get("t", "x"), 1.0);
        assert_eq!(combined.get("t", "y"), 0.5);
    }

    #[test]
    fn empty_input_yields_empty_surface() {
        let combined = Combined::new(0.85).combine(&[]);
        assert!(combined.is_empty());
    }
}
