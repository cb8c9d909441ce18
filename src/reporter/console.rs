//! Console reporter for links, classifications and evaluation results

use crate::evaluation::{Classification, Metric, MetricValue};
use colored::Colorize;
use std::collections::BTreeMap;

const BANNER: &str = "===============";
const SECTION: &str = "=====";

/// Renders pipeline artifacts to stdout.
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Ranked predicted links for one technique.
    pub fn report_predicted_links(&self, links: &BTreeMap<String, Vec<String>>, title: &str) {
        println!("{BANNER} {} {BANNER}\n", title.bold());
        for (test, predicted) in links {
            println!("{SECTION} {test} {SECTION}");
            for (rank, code) in predicted.iter().enumerate() {
                println!("{:<3}: {code}", rank + 1);
            }
            println!();
        }
        println!("{}\n", "=".repeat(50));
    }

    /// TP/FP/FN classifications for one technique.
    pub fn report_classifications(
        &self,
        classifications: &BTreeMap<String, Classification>,
        title: &str,
    ) {
        println!("{BANNER} {} {BANNER}\n", title.bold());
        for (test, classification) in classifications {
            println!("{SECTION} {test} {SECTION}");
            self.report_classified_list("True Positives", &classification.true_positives);
            self.report_classified_list("False Positives", &classification.false_positives);
            self.report_classified_list("False Negatives", &classification.false_negatives);
            println!();
        }
        println!("{}\n", "=".repeat(50));
    }

    fn report_classified_list(&self, label: &str, links: &[String]) {
        println!("{}:", label);
        for (rank, code) in links.iter().enumerate() {
            println!("{:<3}: {code}", rank + 1);
        }
        println!();
    }

    /// Metric table: one section per technique, metrics in request order.
    pub fn report_evaluation_results(
        &self,
        results: &[(String, Vec<(Metric, MetricValue)>)],
        title: &str,
    ) {
        println!("{BANNER} {} {BANNER}\n", title.bold());
        for (technique, metrics) in results {
            println!("{SECTION} {} {SECTION}", technique.cyan());
            for (metric, value) in metrics {
                println!("{}: {value}", metric.arg_name());
            }
            println!();
        }
        println!("{}\n", "=".repeat(50));
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
