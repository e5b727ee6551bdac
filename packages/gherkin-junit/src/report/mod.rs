//! JUnit report tree and its XML serialization.

mod builder;
mod writer;

pub use builder::{build_report, ReportBuilder};
pub use writer::{generate_xml, save_report};

use crate::outcome::Failure;
use crate::tags::TagSet;

/// One `<testcase>` of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCase {
    pub classname: String,
    pub name: String,

    /// Construction time, present only when timestamps are enabled.
    pub timestamp: Option<String>,

    pub tags: TagSet,

    /// Rendered step narration.
    pub output: String,

    pub failure: Option<Failure>,
}

impl ReportCase {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// The `<testsuite>` root of the report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSuite {
    pub name: String,

    /// Suite-level `system-out` text.
    pub description: Option<String>,

    pub cases: Vec<ReportCase>,

    /// Non-fatal problems found while building; not serialized.
    pub warnings: Vec<String>,
}

impl ReportSuite {
    /// Number of cases carrying a failure.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.cases.iter().filter(|case| case.is_failed()).count()
    }
}
