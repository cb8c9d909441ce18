//! Evaluation metrics over predicted links
//!
//! All rate metrics iterate ground-truth tests only: predictions for tests
//! outside the ground truth contribute to nothing. Precision and recall
//! default to 1 when their denominator is empty (no predictions means no
//! false positives).

use super::curve::precision_recall_auc;
use crate::links::LinkMap;
use crate::score::ScoreSurface;
use std::collections::BTreeSet;
use std::fmt;

/// A selectable evaluation metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Precision,
    Recall,
    F1,
    MeanAveragePrecision,
    AreaUnderCurve,
    TruePositives,
    FalsePositives,
    FalseNegatives,
}

impl Metric {
    pub fn from_arg(arg_name: &str) -> Option<Self> {
        match arg_name {
            "precision" => Some(Metric::Precision),
            "recall" => Some(Metric::Recall),
            "f1" => Some(Metric::F1),
            "map" => Some(Metric::MeanAveragePrecision),
            "auc" => Some(Metric::AreaUnderCurve),
            "tp" => Some(Metric::TruePositives),
            "fp" => Some(Metric::FalsePositives),
            "fn" => Some(Metric::FalseNegatives),
            _ => None,
        }
    }

    pub fn arg_name(&self) -> &'static str {
        match self {
            Metric::Precision => "precision",
            Metric::Recall => "recall",
            Metric::F1 => "f1",
            Metric::MeanAveragePrecision => "map",
            Metric::AreaUnderCurve => "auc",
            Metric::TruePositives => "tp",
            Metric::FalsePositives => "fp",
            Metric::FalseNegatives => "fn",
        }
    }
}

/// A computed metric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Score(f64),
    Count(u64),
    /// AUC for a technique without a threshold (or without scores).
    NotApplicable,
}

impl MetricValue {
    fn scaled(self, as_percentage: bool) -> Self {
        match self {
            MetricValue::Score(value) if as_percentage => MetricValue::Score(value * 100.0),
            other => other,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Score(value) => write!(f, "{value:.5}"),
            MetricValue::Count(value) => write!(f, "{value}"),
            MetricValue::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// Compute the selected metrics, in the caller's order.
///
/// `surface` feeds the threshold-independent AUC metric; it is reported as
/// not applicable for binary techniques (`uses_threshold == false`) and when
/// no surface exists (comparing externally produced links).
pub fn evaluate_predictions(
    predicted: &LinkMap,
    ground_truth: &LinkMap,
    metrics: &[Metric],
    surface: Option<&ScoreSurface>,
    uses_threshold: bool,
    as_percentage: bool,
) -> Vec<(Metric, MetricValue)> {
    metrics
        .iter()
        .map(|metric| {
            let value = match metric {
                Metric::Precision => MetricValue::Score(precision(predicted, ground_truth)),
                Metric::Recall => MetricValue::Score(recall(predicted, ground_truth)),
                Metric::F1 => MetricValue::Score(f1(predicted, ground_truth)),
                Metric::MeanAveragePrecision => {
                    MetricValue::Score(mean_average_precision(predicted, ground_truth))
                }
                Metric::AreaUnderCurve => match surface {
                    Some(surface) if uses_threshold => {
                        MetricValue::Score(area_under_curve(surface, ground_truth))
                    }
                    _ => MetricValue::NotApplicable,
                },
                Metric::TruePositives => MetricValue::Count(true_positives(predicted, ground_truth)),
                Metric::FalsePositives => {
                    MetricValue::Count(false_positives(predicted, ground_truth))
                }
                Metric::FalseNegatives => {
                    MetricValue::Count(false_negatives(predicted, ground_truth))
                }
            };
            (*metric, value.scaled(as_percentage))
        })
        .collect()
}

fn predicted_set<'a>(predicted: &'a LinkMap, test: &str) -> BTreeSet<&'a String> {
    predicted
        .get(test)
        .map(|links| links.iter().collect())
        .unwrap_or_default()
}

pub fn true_positives(predicted: &LinkMap, ground_truth: &LinkMap) -> u64 {
    ground_truth
        .iter()
        .map(|(test, expected)| {
            let predicted = predicted_set(predicted, test);
            expected.iter().filter(|link| predicted.contains(link)).count() as u64
        })
        .sum()
}

pub fn false_positives(predicted: &LinkMap, ground_truth: &LinkMap) -> u64 {
    ground_truth
        .iter()
        .map(|(test, expected)| {
            let expected: BTreeSet<&String> = expected.iter().collect();
            predicted_set(predicted, test)
                .iter()
                .filter(|link| !expected.contains(*link))
                .count() as u64
        })
        .sum()
}

pub fn false_negatives(predicted: &LinkMap, ground_truth: &LinkMap) -> u64 {
    ground_truth
        .iter()
        .map(|(test, expected)| {
            let predicted = predicted_set(predicted, test);
            expected.iter().filter(|link| !predicted.contains(link)).count() as u64
        })
        .sum()
}

pub fn precision(predicted: &LinkMap, ground_truth: &LinkMap) -> f64 {
    let tp = true_positives(predicted, ground_truth);
    let fp = false_positives(predicted, ground_truth);
    if tp + fp == 0 {
        1.0
    } else {
        tp as f64 / (tp + fp) as f64
    }
}

pub fn recall(predicted: &LinkMap, ground_truth: &LinkMap) -> f64 {
    let tp = true_positives(predicted, ground_truth);
    let fn_ = false_negatives(predicted, ground_truth);
    if tp + fn_ == 0 {
        1.0
    } else {
        tp as f64 / (tp + fn_) as f64
    }
}

pub fn f1(predicted: &LinkMap, ground_truth: &LinkMap) -> f64 {
    let p = precision(predicted, ground_truth);
    let r = recall(predicted, ground_truth);
    if p + r == 0.0 {
        0.0
    } else {
        2.0 * p * r / (p + r)
    }
}

/// Mean over ground-truth tests of the average precision of each ranked
/// prediction list.
pub fn mean_average_precision(predicted: &LinkMap, ground_truth: &LinkMap) -> f64 {
    if ground_truth.is_empty() {
        return 0.0;
    }

    let total_ap: f64 = ground_truth
        .iter()
        .map(|(test, expected)| {
            if expected.is_empty() {
                return 0.0;
            }
            let expected: BTreeSet<&String> = expected.iter().collect();
            let mut matched = 0usize;
            let mut precision_sum = 0.0;
            if let Some(links) = predicted.get(test) {
                for (rank, link) in links.iter().enumerate() {
                    if expected.contains(link) {
                        matched += 1;
                        precision_sum += matched as f64 / (rank + 1) as f64;
                    }
                }
            }
            precision_sum / expected.len() as f64
        })
        .sum();

    total_ap / ground_truth.len() as f64
}

/// PR-AUC over all (test, code) pairs the surface scores for ground-truth
/// tests.
pub fn area_under_curve(surface: &ScoreSurface, ground_truth: &LinkMap) -> f64 {
    let mut labels = Vec::new();
    let mut scores = Vec::new();

    for (test, expected) in ground_truth {
        let Some(row) = surface.row(test) else {
            continue;
        };
        let expected: BTreeSet<&String> = expected.iter().collect();
        for (code, score) in row {
            labels.push(expected.contains(code));
            scores.push(*score);
        }
    }

    precision_recall_auc(&labels, &scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(entries: &[(&str, &[&str])]) -> LinkMap {
        entries
            .iter()
            .map(|(test, codes)| {
                (
                    test.to_string(),
                    codes.iter().map(|c| c.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn counts_and_rates_match_worked_example() {
        // G = {t: [x, y, z]}, P = {t: [x, y, w]}.
        let ground_truth = links(&[("t", &["x", "y", "z"])]);
        let predicted = links(&[("t", &["x", "y", "w"])]);

        assert_eq!(true_positives(&predicted, &ground_truth), 2);
        assert_eq!(false_positives(&predicted, &ground_truth), 1);
        assert_eq!(false_negatives(&predicted, &ground_truth), 1);
        assert!((precision(&predicted, &ground_truth) - 2.0 / 3.0).abs() < 1e-12);
        assert!((recall(&predicted, &ground_truth) - 2.0 / 3.0).abs() < 1e-12);
        assert!((f1(&predicted, &ground_truth) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_predictions_are_vacuously_precise() {
        let ground_truth = links(&[("t", &[])]);
        let predicted = links(&[("t", &[])]);
        assert_eq!(precision(&predicted, &ground_truth), 1.0);
        assert_eq!(recall(&predicted, &ground_truth), 1.0);
        assert_eq!(f1(&predicted, &ground_truth), 1.0);
    }

    #[test]
    fn map_matches_worked_example() {
        // G = {t: [x, y]}, P = {t: [x, z, y]}: AP = (1/1 + 2/3) / 2.
        let ground_truth = links(&[("t", &["x", "y"])]);
        let predicted = links(&[("t", &["x", "z", "y"])]);
        let map = mean_average_precision(&predicted, &ground_truth);
        assert!((map - 5.0 / 6.0).abs() < 1e-12, "got {map}");
    }

    #[test]
    fn map_averages_over_all_ground_truth_tests() {
        let ground_truth = links(&[("t1", &["x"]), ("t2", &["y"])]);
        let predicted = links(&[("t1", &["x"]), ("t2", &[])]);
        let map = mean_average_precision(&predicted, &ground_truth);
        assert!((map - 0.5).abs() < 1e-12, "got {map}");
    }

    #[test]
    fn composition_invariants_hold() {
        let ground_truth = links(&[("t1", &["a", "b"]), ("t2", &["c"])]);
        let predicted = links(&[("t1", &["a", "d"]), ("t2", &["c", "e"])]);

        let tp = true_positives(&predicted, &ground_truth);
        let fp = false_positives(&predicted, &ground_truth);
        let fn_ = false_negatives(&predicted, &ground_truth);
        let total_expected: u64 = ground_truth.values().map(|v| v.len() as u64).sum();
        let total_predicted: u64 = predicted.values().map(|v| v.len() as u64).sum();

        assert_eq!(tp + fn_, total_expected);
        assert_eq!(tp + fp, total_predicted);
    }

    #[test]
    fn auc_not_applicable_for_binary_techniques() {
        let ground_truth = links(&[("t", &["x"])]);
        let predicted = links(&[("t", &["x"])]);
        let surface = ScoreSurface::new();

        let results = evaluate_predictions(
            &predicted,
            &ground_truth,
            &[Metric::AreaUnderCurve],
            Some(&surface),
            false,
            false,
        );
        assert_eq!(results[0].1, MetricValue::NotApplicable);

        let results = evaluate_predictions(
            &predicted,
            &ground_truth,
            &[Metric::AreaUnderCurve],
            None,
            true,
            false,
        );
        assert_eq!(results[0].1, MetricValue::NotApplicable);
    }

    #[test]
    fn percentage_scaling_applies_to_continuous_only() {
        let ground_truth = links(&[("t", &["x"])]);
        let predicted = links(&[("t", &["x"])]);
        let results = evaluate_predictions(
            &predicted,
            &ground_truth,
            &[Metric::Precision, Metric::TruePositives],
            None,
            true,
            true,
        );
        assert_eq!(results[0].1, MetricValue::Score(100.0));
        assert_eq!(results[1].1, MetricValue::Count(1));
    }

    #[test]
    fn auc_uses_surface_scores_over_ground_truth_tests() {
        let mut surface = ScoreSurface::new();
        surface.insert("t", "x", 0.9);
        surface.insert("t", "y", 0.1);
        surface.insert("ignored", "x", 1.0);
        let ground_truth = links(&[("t", &["x"])]);

        let auc = area_under_curve(&surface, &ground_truth);
        assert!((auc - 1.0).abs() < 1e-9, "got {auc}");
    }

    #[test]
    fn metric_arg_names_round_trip() {
        for arg in crate::config::SELECTABLE_METRICS {
            let metric = Metric::from_arg(arg).unwrap();
            assert_eq!(metric.arg_name(), arg);
        }
        assert!(Metric::from_arg("rmse").is_none());
    }
}
