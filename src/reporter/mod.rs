//! Output reporters: console display, JSON link files, metrics CSV

pub mod console;
pub mod csv;
pub mod json;

pub use console::ConsoleReporter;
pub use csv::write_evaluation_metrics;
pub use json::write_json;
