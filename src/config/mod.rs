//! Run configuration: selectable names and technique thresholds
//!
//! There is no global state; the resolved [`Thresholds`] value is built once
//! (defaults plus environment overrides) and passed down to the engine.

/// Technique arg names accepted on the command line, in default run order.
pub const SELECTABLE_TECHNIQUES: [&str; 9] = [
    "nc",
    "ncc",
    "lcsb",
    "lcsu",
    "leven",
    "lcba",
    "tarantula",
    "tfidf",
    "tfidf_multiset",
];

/// Metric arg names accepted on the command line, in default report order.
pub const SELECTABLE_METRICS: [&str; 8] =
    ["precision", "recall", "f1", "map", "auc", "tp", "fp", "fn"];

/// Arg name of the mean-of-techniques pseudo-technique.
pub const COMBINED_TECHNIQUE: &str = "combined";

/// Per-technique link-extraction thresholds, each in (0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    pub lcsb: f64,
    pub lcsu: f64,
    pub leven: f64,
    pub tarantula: f64,
    pub tfidf: f64,
    pub tfidf_multiset: f64,
    pub combined: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            lcsb: 0.65,
            lcsu: 0.75,
            leven: 0.95,
            tarantula: 0.95,
            tfidf: 0.90,
            tfidf_multiset: 0.90,
            combined: 0.85,
        }
    }
}

impl Thresholds {
    /// Defaults with `THRESHOLD_FOR_*` environment overrides applied.
    /// An unset or unparseable variable leaves the default in place.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            lcsb: env_threshold("THRESHOLD_FOR_LCSB", defaults.lcsb),
            lcsu: env_threshold("THRESHOLD_FOR_LCSU", defaults.lcsu),
            leven: env_threshold("THRESHOLD_FOR_LEVENSHTEIN", defaults.leven),
            tarantula: env_threshold("THRESHOLD_FOR_TARANTULA", defaults.tarantula),
            tfidf: env_threshold("THRESHOLD_FOR_TFIDF", defaults.tfidf),
            tfidf_multiset: env_threshold("THRESHOLD_FOR_TFIDF_MULTISET", defaults.tfidf_multiset),
            combined: env_threshold("THRESHOLD_FOR_COMBINED", defaults.combined),
        }
    }
}

fn env_threshold(variable: &str, default: f64) -> f64 {
    std::env::var(variable)
        .ok()
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| *value > 0.0 && *value <= 1.0)
        .unwrap_or(default)
}
