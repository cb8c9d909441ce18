//! Analysis engine driving the traceability pipeline

pub mod engine;

pub use engine::{AnalysisEngine, CompareOptions, EvaluateOptions, ProduceOptions};
