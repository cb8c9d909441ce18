//! Evaluation of predicted links against a ground truth

pub mod classify;
pub mod curve;
pub mod metrics;

pub use classify::{classify_predictions, Classification};
pub use metrics::{evaluate_predictions, Metric, MetricValue};
