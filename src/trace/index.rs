//! One-pass trace indexer
//!
//! A single walk over the event stream produces every aggregate the scoring
//! techniques need. The indexes are computed once per trace and shared
//! read-only across all techniques.

use crate::{
    EventType, FunctionType, Granularity, NameRecord, TestingMethod, TraceRecord,
};
use std::collections::{BTreeMap, BTreeSet};

/// Aggregates derived from one pass over the trace at a fixed granularity.
///
/// Maps are ordered so every downstream artifact (scores, links, JSON
/// output) is deterministic across runs.
#[derive(Debug, Default)]
pub struct TraceIndexes {
    /// Production code entities observed in the trace.
    pub code_names: BTreeSet<NameRecord>,
    /// Test entities observed entering their active window.
    pub test_names: BTreeSet<NameRecord>,
    /// Test id -> code ids it exercised (any event inside the window).
    pub called_by: BTreeMap<String, BTreeSet<String>>,
    /// Test id -> code id -> number of CALL events inside the window.
    pub called_by_count: BTreeMap<String, BTreeMap<String, u64>>,
    /// Test id -> code id -> minimum relative call depth (>= 1).
    pub called_by_depth: BTreeMap<String, BTreeMap<String, u32>>,
    /// Code id -> test ids that exercised it.
    pub calls_test: BTreeMap<String, BTreeSet<String>>,
    /// Test id -> code ids that were the most recent SOURCE return before
    /// an assert inside the window.
    pub called_before_assert: BTreeMap<String, BTreeSet<String>>,
    /// Events that violated the window discipline (e.g. a test return with
    /// no open window). Counted, never fatal.
    pub anomalies: usize,
}

/// One open test window on the stack.
struct OpenTest {
    /// None when the test record carried an empty id; the window still
    /// brackets events but they contribute to no aggregate.
    id: Option<String>,
    depth: u32,
    last_returned_source: Option<String>,
}

/// Build all indexes for the chosen granularity in a single pass.
///
/// Test windows follow a strict stack discipline: `TEST_METHOD_CALL`
/// pushes, `TEST_METHOD_RETURN` pops, and events between them are
/// attributed to the innermost open window.
pub fn index_trace(records: &[TraceRecord], granularity: Granularity) -> TraceIndexes {
    let mut indexes = TraceIndexes::default();
    let mut stack: Vec<OpenTest> = Vec::new();

    for record in records {
        match record.testing_method {
            TestingMethod::TestMethodCall => {
                let id = record.qualified_name(granularity).map(str::to_string);
                if let Some(id) = &id {
                    indexes
                        .test_names
                        .insert(NameRecord::new(id, record.short_name(granularity)));
                }
                stack.push(OpenTest {
                    id,
                    depth: record.depth,
                    last_returned_source: None,
                });
                continue;
            }
            TestingMethod::TestMethodReturn => {
                if stack.pop().is_none() {
                    indexes.anomalies += 1;
                }
                continue;
            }
            TestingMethod::None => {}
        }

        if record.function_type == FunctionType::Source {
            if let Some(id) = record.qualified_name(granularity) {
                indexes
                    .code_names
                    .insert(NameRecord::new(id, record.short_name(granularity)));
            }
        }

        let Some(active) = stack.last_mut() else {
            continue;
        };
        let Some(test_id) = active.id.clone() else {
            continue;
        };

        match record.function_type {
            FunctionType::Source => {
                let Some(code_id) = record.qualified_name(granularity) else {
                    continue;
                };

                indexes
                    .called_by
                    .entry(test_id.clone())
                    .or_default()
                    .insert(code_id.to_string());
                indexes
                    .calls_test
                    .entry(code_id.to_string())
                    .or_default()
                    .insert(test_id.clone());

                if record.event_type == EventType::Call {
                    *indexes
                        .called_by_count
                        .entry(test_id.clone())
                        .or_default()
                        .entry(code_id.to_string())
                        .or_insert(0) += 1;
                }

                let relative_depth = record.depth.saturating_sub(active.depth).max(1);
                indexes
                    .called_by_depth
                    .entry(test_id.clone())
                    .or_default()
                    .entry(code_id.to_string())
                    .and_modify(|d| *d = (*d).min(relative_depth))
                    .or_insert(relative_depth);

                if record.event_type == EventType::Return {
                    active.last_returned_source = Some(code_id.to_string());
                }
            }
            FunctionType::Assert => {
                if let Some(returned) = &active.last_returned_source {
                    indexes
                        .called_before_assert
                        .entry(test_id)
                        .or_default()
                        .insert(returned.clone());
                }
            }
            _ => {}
        }
    }

    indexes
}
