//! Trace ingestion: CSV reading and one-pass index construction

pub mod index;
pub mod reader;

pub use index::{index_trace, TraceIndexes};
pub use reader::{read_trace, TraceLog};
