//! CSV reporter for evaluation metrics

use crate::evaluation::{Metric, MetricValue};
use crate::AnalysisError;
use std::path::Path;

/// Write the evaluation-metrics table: a `Technique` column followed by one
/// column per selected metric, in the caller's requested order. Continuous
/// metrics are rounded to one decimal; counts stay integral.
pub fn write_evaluation_metrics(
    results: &[(String, Vec<(Metric, MetricValue)>)],
    path: &Path,
) -> Result<(), AnalysisError> {
    let output_error = |source: std::io::Error| AnalysisError::OutputFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| output_error(std::io::Error::other(e)))?;

    let mut header = vec!["Technique".to_string()];
    if let Some((_, metrics)) = results.first() {
        header.extend(metrics.iter().map(|(metric, _)| metric.arg_name().to_string()));
    }
    writer
        .write_record(&header)
        .map_err(|e| output_error(std::io::Error::other(e)))?;

    for (technique, metrics) in results {
        let mut row = vec![technique.clone()];
        row.extend(metrics.iter().map(|(_, value)| render(value)));
        writer
            .write_record(&row)
            .map_err(|e| output_error(std::io::Error::other(e)))?;
    }

    writer.flush().map_err(output_error)
}

fn render(value: &MetricValue) -> String {
    match value {
        MetricValue::Score(score) => format!("{score:.1}"),
        MetricValue::Count(count) => count.to_string(),
        MetricValue::NotApplicable => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rounded_rows() {
        let results = vec![
            (
                "nc".to_string(),
                vec![
                    (Metric::Precision, MetricValue::Score(2.0 / 3.0)),
                    (Metric::TruePositives, MetricValue::Count(2)),
                    (Metric::AreaUnderCurve, MetricValue::NotApplicable),
                ],
            ),
            (
                "tfidf".to_string(),
                vec![
                    (Metric::Precision, MetricValue::Score(0.95)),
                    (Metric::TruePositives, MetricValue::Count(7)),
                    (Metric::AreaUnderCurve, MetricValue::Score(0.875)),
                ],
            ),
        ];

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("metrics.csv");
        write_evaluation_metrics(&results, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next().unwrap(), "Technique,precision,tp,auc");
        assert_eq!(lines.next().unwrap(), "nc,0.7,2,N/A");
        assert_eq!(lines.next().unwrap(), "tfidf,0.9,7,0.9");
    }

    #[test]
    fn percentage_values_keep_one_decimal() {
        let results = vec![(
            "leven".to_string(),
            vec![(Metric::Recall, MetricValue::Score(66.66666))],
        )];
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("metrics.csv");
        write_evaluation_metrics(&results, &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("leven,66.7"));
    }
}
