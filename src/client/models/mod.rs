//! TestRail API data models
//!
//! Response and request types for the endpoints the client wraps, grouped by
//! resource. Identifiers are plain integers as TestRail returns them.

mod case;
mod project;
mod result;
mod run;

pub use case::{CASE_TYPE_AUTOMATED, Case, CaseFilter, CaseStep, CaseUpdate, NewCase};
pub use project::{NewSection, Project, Section, Suite};
pub use result::{NewResult, Status, TestResult, status};
pub use run::{NewRun, Plan, PlanEntry, Run, Test};

/// Project identifier
pub type ProjectId = u64;
/// Test suite identifier
pub type SuiteId = u64;
/// Section identifier
pub type SectionId = u64;
/// Test case identifier, the value of a `testrailid=` tag
pub type CaseId = u64;
/// Test run identifier
pub type RunId = u64;
/// Test plan identifier
pub type PlanId = u64;
/// Result status identifier
pub type StatusId = u64;
