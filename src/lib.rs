//! Tracelink: test-to-code traceability link recovery
//!
//! This library recovers traceability links between unit tests and the
//! production code they exercise, from a dynamic execution trace captured
//! while the test suite ran. It scores every (test, code) pair under a
//! family of techniques, extracts ranked, thresholded link predictions,
//! and evaluates them against a ground truth with standard IR metrics.

pub mod analyzer;
pub mod config;
pub mod evaluation;
pub mod links;
pub mod reporter;
pub mod score;
pub mod techniques;
pub mod text;
pub mod trace;

mod error;

pub use error::AnalysisError;

use std::fmt;
use std::str::FromStr;

/// Granularity at which trace entities are identified.
///
/// Function-level traceability keys every structure by the fully qualified
/// function name; class-level by the fully qualified class name. The two
/// never mix within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    #[default]
    Function,
    Class,
}

impl Granularity {
    pub const FUNCTION: &'static str = "function";
    pub const CLASS: &'static str = "class";
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Function => write!(f, "{}", Self::FUNCTION),
            Granularity::Class => write!(f, "{}", Self::CLASS),
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::FUNCTION => Ok(Granularity::Function),
            Self::CLASS => Ok(Granularity::Class),
            other => Err(format!("unknown traceability level: {other}")),
        }
    }
}

/// Role of the traced frame, from the `Function Type` trace column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionType {
    Source,
    TestFunction,
    TestClass,
    TestHelper,
    Assert,
    /// Anything the tracer emitted that the core does not consume.
    Other,
}

impl FunctionType {
    pub fn from_trace(value: &str) -> Self {
        match value {
            "SOURCE" => FunctionType::Source,
            "TEST_FUNCTION" => FunctionType::TestFunction,
            "TEST_CLASS" => FunctionType::TestClass,
            "TEST_HELPER" => FunctionType::TestHelper,
            "ASSERT" => FunctionType::Assert,
            _ => FunctionType::Other,
        }
    }
}

/// Test lifecycle marker, from the `Testing Method` trace column.
///
/// Most rows carry no marker; only the entry and exit of a test method are
/// tagged, and those two events delimit the test's active window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestingMethod {
    TestMethodCall,
    TestMethodReturn,
    #[default]
    None,
}

impl TestingMethod {
    pub fn from_trace(value: &str) -> Self {
        match value {
            "TEST_METHOD_CALL" => TestingMethod::TestMethodCall,
            "TEST_METHOD_RETURN" => TestingMethod::TestMethodReturn,
            _ => TestingMethod::None,
        }
    }
}

/// Interpreter event kind, from the `Event Type` trace column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Call,
    Return,
    Line,
    Exception,
    Other,
}

impl EventType {
    pub fn from_trace(value: &str) -> Self {
        match value {
            "CALL" => EventType::Call,
            "RETURN" => EventType::Return,
            "LINE" => EventType::Line,
            "EXCEPTION" => EventType::Exception,
            _ => EventType::Other,
        }
    }
}

/// One event in the trace, restricted to the columns the core consumes.
#[derive(Debug, Clone)]
pub struct TraceRecord {
    pub depth: u32,
    pub function_type: FunctionType,
    pub testing_method: TestingMethod,
    pub event_type: EventType,
    pub function_name: String,
    pub qualified_function_name: String,
    pub class_name: String,
    pub qualified_class_name: String,
}

impl TraceRecord {
    /// Fully qualified entity id for the chosen granularity, or None when
    /// the field is empty (an empty id contributes to no aggregate).
    pub fn qualified_name(&self, granularity: Granularity) -> Option<&str> {
        let name = match granularity {
            Granularity::Function => &self.qualified_function_name,
            Granularity::Class => &self.qualified_class_name,
        };
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// Short entity name for the chosen granularity.
    pub fn short_name(&self, granularity: Granularity) -> &str {
        match granularity {
            Granularity::Function => &self.function_name,
            Granularity::Class => &self.class_name,
        }
    }
}

/// Pair of (fully qualified name, short name) identifying one entity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NameRecord {
    pub qualified: String,
    pub short: String,
}

impl NameRecord {
    pub fn new(qualified: impl Into<String>, short: impl Into<String>) -> Self {
        Self {
            qualified: qualified.into(),
            short: short.into(),
        }
    }
}
