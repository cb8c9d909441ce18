//! TP/FP/FN classification of predicted links

use crate::links::LinkMap;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Per-test link classification against the ground truth.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Classification {
    #[serde(rename = "True Positives")]
    pub true_positives: Vec<String>,
    #[serde(rename = "False Positives")]
    pub false_positives: Vec<String>,
    #[serde(rename = "False Negatives")]
    pub false_negatives: Vec<String>,
}

/// Classify predictions per ground-truth test.
///
/// Only tests present in the ground truth are classified; predictions for
/// tests outside it contribute nothing. A ground-truth test missing from the
/// predictions counts every expected link as a false negative.
pub fn classify_predictions(
    predicted: &LinkMap,
    ground_truth: &LinkMap,
) -> BTreeMap<String, Classification> {
    let mut classifications = BTreeMap::new();

    for (test, expected) in ground_truth {
        let predicted_set: BTreeSet<&String> =
            predicted.get(test).map(|links| links.iter().collect()).unwrap_or_default();
        let expected_set: BTreeSet<&String> = expected.iter().collect();

        classifications.insert(
            test.clone(),
            Classification {
                true_positives: predicted_set
                    .intersection(&expected_set)
                    .map(|link| (*link).clone())
                    .collect(),
                false_positives: predicted_set
                    .difference(&expected_set)
                    .map(|link| (*link).clone())
                    .collect(),
                false_negatives: expected_set
                    .difference(&predicted_set)
                    .map(|link| (*link).clone())
                    .collect(),
            },
        );
    }

    classifications
}
