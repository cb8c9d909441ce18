//! Orchestrates the pipeline: trace -> indexes -> techniques -> links ->
//! evaluation -> reports
//!
//! Data flows strictly forward. The indexes are built once per trace and
//! shared read-only; techniques are independent of each other and scored in
//! parallel, with the caller's technique order preserved in every output.

use crate::config::{Thresholds, COMBINED_TECHNIQUE};
use crate::evaluation::{
    classify_predictions, evaluate_predictions, Classification, Metric, MetricValue,
};
use crate::links::{load_links, predict_links, LinkMap};
use crate::reporter::{write_evaluation_metrics, write_json, ConsoleReporter};
use crate::score::ScoreSurface;
use crate::techniques::{technique_for, Combined, TechniqueMeta};
use crate::trace::{index_trace, read_trace};
use crate::{AnalysisError, Granularity};
use colored::Colorize;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

const EVALUATION_METRICS_TITLE: &str = "Evaluation Metrics";

/// One technique's finished artifacts for a trace.
struct TechniqueRun {
    arg_name: String,
    meta: TechniqueMeta,
    surface: ScoreSurface,
    links: LinkMap,
}

/// Options for `produce-links`.
pub struct ProduceOptions<'a> {
    pub trace_path: &'a Path,
    pub techniques: &'a [String],
    pub granularity: Granularity,
    pub add_combined: bool,
    pub output_directory: Option<&'a Path>,
}

/// Options for `evaluate-links`.
pub struct EvaluateOptions<'a> {
    pub trace_path: &'a Path,
    pub ground_truth_path: &'a Path,
    pub techniques: &'a [String],
    pub metrics: &'a [String],
    pub granularity: Granularity,
    pub add_combined: bool,
    pub as_percentage: bool,
    pub display_classifications: bool,
    pub classifications_output_directory: Option<&'a Path>,
    pub metrics_output_path: Option<&'a Path>,
}

/// Options for `compare-links`.
pub struct CompareOptions<'a> {
    pub predicted_links_path: &'a Path,
    pub ground_truth_path: &'a Path,
    pub metrics: &'a [String],
    pub as_percentage: bool,
    pub classifications_output_path: Option<&'a Path>,
    pub metrics_output_path: Option<&'a Path>,
}

/// Main engine for producing, evaluating and comparing traceability links.
pub struct AnalysisEngine {
    thresholds: Thresholds,
    reporter: ConsoleReporter,
}

impl AnalysisEngine {
    /// Engine with default thresholds plus environment overrides.
    pub fn new() -> Self {
        Self::with_thresholds(Thresholds::from_env())
    }

    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            reporter: ConsoleReporter::new(),
        }
    }

    /// Produce predicted links for a trace, printing them or writing one
    /// JSON file per technique.
    pub fn produce_links(&self, options: ProduceOptions<'_>) -> Result<(), AnalysisError> {
        let runs = self.predict(
            options.trace_path,
            options.techniques,
            options.granularity,
            options.add_combined,
            None,
        )?;

        match options.output_directory {
            None => {
                for run in &runs {
                    self.reporter
                        .report_predicted_links(&run.links, run.meta.full_name);
                }
            }
            Some(directory) => {
                for run in &runs {
                    let path = artifact_path(
                        directory,
                        &run.arg_name,
                        options.granularity,
                        "predicted_links",
                    );
                    write_json(&run.links, &path)?;
                }
            }
        }

        Ok(())
    }

    /// Produce links for a trace and evaluate them against a ground truth.
    pub fn evaluate_links(&self, options: EvaluateOptions<'_>) -> Result<(), AnalysisError> {
        let metrics = resolve_metrics(options.metrics)?;
        let ground_truth = load_links(options.ground_truth_path)?;
        let ground_truth_tests: BTreeSet<String> = ground_truth.keys().cloned().collect();

        let runs = self.predict(
            options.trace_path,
            options.techniques,
            options.granularity,
            options.add_combined,
            Some(&ground_truth_tests),
        )?;

        let evaluation: Vec<(String, Vec<(Metric, MetricValue)>)> = runs
            .iter()
            .map(|run| {
                (
                    run.arg_name.clone(),
                    evaluate_predictions(
                        &run.links,
                        &ground_truth,
                        &metrics,
                        Some(&run.surface),
                        run.meta.uses_threshold,
                        options.as_percentage,
                    ),
                )
            })
            .collect();

        let classifications: Vec<(&TechniqueRun, BTreeMap<String, Classification>)> = runs
            .iter()
            .map(|run| (run, classify_predictions(&run.links, &ground_truth)))
            .collect();

        if options.display_classifications {
            for (run, classification) in &classifications {
                self.reporter
                    .report_classifications(classification, run.meta.full_name);
            }
        }

        self.reporter
            .report_evaluation_results(&evaluation, EVALUATION_METRICS_TITLE);

        if let Some(directory) = options.classifications_output_directory {
            for (run, classification) in &classifications {
                let path = artifact_path(
                    directory,
                    &run.arg_name,
                    options.granularity,
                    "classifications",
                );
                write_json(classification, &path)?;
            }
        }

        if let Some(path) = options.metrics_output_path {
            write_evaluation_metrics(&evaluation, path)?;
        }

        Ok(())
    }

    /// Compare an externally produced predictions file against a ground
    /// truth.
    pub fn compare_links(&self, options: CompareOptions<'_>) -> Result<(), AnalysisError> {
        let metrics = resolve_metrics(options.metrics)?;
        let predicted = load_links(options.predicted_links_path)?;
        let ground_truth = load_links(options.ground_truth_path)?;

        // Every ground-truth test must have a prediction entry.
        for test in ground_truth.keys() {
            if !predicted.contains_key(test) {
                return Err(AnalysisError::MissingPrediction(test.clone()));
            }
        }

        let evaluation = vec![(
            options.predicted_links_path.display().to_string(),
            evaluate_predictions(
                &predicted,
                &ground_truth,
                &metrics,
                None,
                false,
                options.as_percentage,
            ),
        )];

        let classifications = classify_predictions(&predicted, &ground_truth);

        self.reporter
            .report_evaluation_results(&evaluation, EVALUATION_METRICS_TITLE);

        if let Some(path) = options.classifications_output_path {
            write_json(&classifications, path)?;
        }
        if let Some(path) = options.metrics_output_path {
            write_evaluation_metrics(&evaluation, path)?;
        }

        Ok(())
    }

    /// Score the chosen techniques over one trace and extract links.
    fn predict(
        &self,
        trace_path: &Path,
        techniques: &[String],
        granularity: Granularity,
        add_combined: bool,
        only_tests: Option<&BTreeSet<String>>,
    ) -> Result<Vec<TechniqueRun>, AnalysisError> {
        for arg_name in techniques {
            if technique_for(arg_name, &self.thresholds).is_none() {
                return Err(AnalysisError::UnknownTechnique(arg_name.clone()));
            }
        }

        let log = read_trace(trace_path)?;
        if log.skipped_rows > 0 {
            eprintln!(
                "{}: skipped {} malformed trace row(s)",
                "Warning".yellow(),
                log.skipped_rows
            );
        }

        let indexes = index_trace(&log.records, granularity);
        if indexes.anomalies > 0 {
            eprintln!(
                "{}: {} trace event(s) violated the test-window discipline",
                "Warning".yellow(),
                indexes.anomalies
            );
        }

        // Techniques only read the shared indexes; score them in parallel.
        // collect() preserves the caller's technique order.
        let mut runs: Vec<TechniqueRun> = techniques
            .par_iter()
            .map(|arg_name| {
                let technique = technique_for(arg_name, &self.thresholds)
                    .expect("technique validated above");
                let meta = technique.meta().clone();
                let mut surface = technique.score(&indexes);
                if meta.depth_discount {
                    surface.apply_depth_discount(&indexes.called_by_depth);
                }
                if meta.normalise {
                    surface.normalise_rows();
                }
                let links = predict_links(&surface, &meta, only_tests);
                TechniqueRun {
                    arg_name: arg_name.clone(),
                    meta,
                    surface,
                    links,
                }
            })
            .collect();

        if add_combined {
            let combined = Combined::new(self.thresholds.combined);
            let surfaces: Vec<ScoreSurface> =
                runs.iter().map(|run| run.surface.clone()).collect();
            let surface = combined.combine(&surfaces);
            let links = predict_links(&surface, combined.meta(), only_tests);
            runs.push(TechniqueRun {
                arg_name: COMBINED_TECHNIQUE.to_string(),
                meta: combined.meta().clone(),
                surface,
                links,
            });
        }

        Ok(runs)
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_metrics(arg_names: &[String]) -> Result<Vec<Metric>, AnalysisError> {
    arg_names
        .iter()
        .map(|arg_name| {
            Metric::from_arg(arg_name).ok_or_else(|| AnalysisError::UnknownMetric(arg_name.clone()))
        })
        .collect()
}

fn artifact_path(
    directory: &Path,
    technique: &str,
    granularity: Granularity,
    suffix: &str,
) -> PathBuf {
    directory.join(format!("{technique}_{granularity}_{suffix}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_paths_follow_naming_scheme() {
        let path = artifact_path(
            Path::new("out"),
            "tfidf_multiset",
            Granularity::Function,
            "predicted_links",
        );
        assert_eq!(
            path,
            Path::new("out/tfidf_multiset_function_predicted_links.json")
        );

        let path = artifact_path(Path::new("out"), "nc", Granularity::Class, "classifications");
        assert_eq!(path, Path::new("out/nc_class_classifications.json"));
    }

    #[test]
    fn unknown_metric_is_rejected() {
        let err = resolve_metrics(&["precision".to_string(), "rmse".to_string()]).unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownMetric(name) if name == "rmse"));
    }
}
