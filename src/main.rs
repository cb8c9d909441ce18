//! Tracelink CLI: produce, evaluate and compare test-to-code traceability
//! links

use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracelink::analyzer::{AnalysisEngine, CompareOptions, EvaluateOptions, ProduceOptions};
use tracelink::config::{SELECTABLE_METRICS, SELECTABLE_TECHNIQUES};
use tracelink::Granularity;

/// Produce, evaluate and compare test-to-code traceability links recovered
/// from dynamic test-suite traces.
#[derive(Parser, Debug)]
#[command(name = "tracelink")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Produce traceability links for a trace CSV using the selected
    /// techniques
    ProduceLinks {
        /// Trace CSV produced by the test tracer
        trace_csv: PathBuf,

        /// Technique to run (repeatable; all techniques when omitted)
        #[arg(long = "technique", value_parser = PossibleValuesParser::new(SELECTABLE_TECHNIQUES))]
        techniques: Vec<String>,

        /// Traceability level to link at
        #[arg(long, default_value = "function", value_parser = PossibleValuesParser::new([Granularity::FUNCTION, Granularity::CLASS]))]
        level: String,

        /// Also produce links from the mean of the selected techniques
        #[arg(long)]
        add_combined: bool,

        /// Write one predicted-links JSON per technique here instead of
        /// printing to stdout
        #[arg(long)]
        output_directory: Option<PathBuf>,
    },

    /// Produce links for a trace and evaluate them against a ground truth
    EvaluateLinks {
        /// Trace CSV produced by the test tracer
        trace_csv: PathBuf,

        /// Ground-truth links JSON
        ground_truth: PathBuf,

        /// Technique to run (repeatable; all techniques when omitted)
        #[arg(long = "technique", value_parser = PossibleValuesParser::new(SELECTABLE_TECHNIQUES))]
        techniques: Vec<String>,

        /// Metric to report (repeatable; all metrics when omitted)
        #[arg(long = "metric", value_parser = PossibleValuesParser::new(SELECTABLE_METRICS))]
        metrics: Vec<String>,

        /// Traceability level to link at
        #[arg(long, default_value = "function", value_parser = PossibleValuesParser::new([Granularity::FUNCTION, Granularity::CLASS]))]
        level: String,

        /// Also evaluate the mean of the selected techniques
        #[arg(long)]
        add_combined: bool,

        /// Report continuous metrics as percentages
        #[arg(long)]
        as_percentage: bool,

        /// Print per-test TP/FP/FN classifications for every technique
        #[arg(long)]
        display_classifications: bool,

        /// Write one classifications JSON per technique here
        #[arg(long)]
        classifications_output_directory: Option<PathBuf>,

        /// Write the evaluation-metrics CSV here
        #[arg(long)]
        metrics_output_path: Option<PathBuf>,
    },

    /// Compare a predicted-links JSON against a ground truth
    CompareLinks {
        /// Predicted links JSON
        predicted_links: PathBuf,

        /// Ground-truth links JSON
        ground_truth: PathBuf,

        /// Metric to report (repeatable; all metrics when omitted)
        #[arg(long = "metric", value_parser = PossibleValuesParser::new(SELECTABLE_METRICS))]
        metrics: Vec<String>,

        /// Report continuous metrics as percentages
        #[arg(long)]
        as_percentage: bool,

        /// Write the classifications JSON here
        #[arg(long)]
        classifications_output_path: Option<PathBuf>,

        /// Write the evaluation-metrics CSV here
        #[arg(long)]
        metrics_output_path: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let engine = AnalysisEngine::new();

    match args.command {
        Commands::ProduceLinks {
            trace_csv,
            techniques,
            level,
            add_combined,
            output_directory,
        } => {
            let techniques = resolve_techniques(techniques);
            engine.produce_links(ProduceOptions {
                trace_path: &trace_csv,
                techniques: &techniques,
                granularity: parse_level(&level),
                add_combined,
                output_directory: output_directory.as_deref(),
            })?;
        }

        Commands::EvaluateLinks {
            trace_csv,
            ground_truth,
            techniques,
            metrics,
            level,
            add_combined,
            as_percentage,
            display_classifications,
            classifications_output_directory,
            metrics_output_path,
        } => {
            let techniques = resolve_techniques(techniques);
            let metrics = resolve_metrics(metrics);
            engine.evaluate_links(EvaluateOptions {
                trace_path: &trace_csv,
                ground_truth_path: &ground_truth,
                techniques: &techniques,
                metrics: &metrics,
                granularity: parse_level(&level),
                add_combined,
                as_percentage,
                display_classifications,
                classifications_output_directory: classifications_output_directory.as_deref(),
                metrics_output_path: metrics_output_path.as_deref(),
            })?;
        }

        Commands::CompareLinks {
            predicted_links,
            ground_truth,
            metrics,
            as_percentage,
            classifications_output_path,
            metrics_output_path,
        } => {
            let metrics = resolve_metrics(metrics);
            engine.compare_links(CompareOptions {
                predicted_links_path: &predicted_links,
                ground_truth_path: &ground_truth,
                metrics: &metrics,
                as_percentage,
                classifications_output_path: classifications_output_path.as_deref(),
                metrics_output_path: metrics_output_path.as_deref(),
            })?;
        }
    }

    Ok(())
}

/// An empty selection means every selectable technique, in default order.
fn resolve_techniques(chosen: Vec<String>) -> Vec<String> {
    if chosen.is_empty() {
        SELECTABLE_TECHNIQUES.iter().map(|s| s.to_string()).collect()
    } else {
        chosen
    }
}

/// An empty selection means every selectable metric, in default order.
fn resolve_metrics(chosen: Vec<String>) -> Vec<String> {
    if chosen.is_empty() {
        SELECTABLE_METRICS.iter().map(|s| s.to_string()).collect()
    } else {
        chosen
    }
}

fn parse_level(level: &str) -> Granularity {
    // The value parser restricts input to the two valid spellings.
    level.parse().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selections_expand_to_defaults() {
        assert_eq!(resolve_techniques(vec![]).len(), 9);
        assert_eq!(resolve_metrics(vec![]).len(), 8);
        assert_eq!(
            resolve_techniques(vec!["nc".to_string()]),
            vec!["nc".to_string()]
        );
    }

    #[test]
    fn cli_declaration_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
