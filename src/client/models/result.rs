//! Result and status models

use serde::{Deserialize, Serialize};

use super::StatusId;

/// Ids of TestRail's built-in statuses
pub mod status {
    use super::StatusId;

    pub const PASSED: StatusId = 1;
    pub const BLOCKED: StatusId = 2;
    pub const UNTESTED: StatusId = 3;
    pub const RETEST: StatusId = 4;
    pub const FAILED: StatusId = 5;
}

/// Result status, built-in or custom
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Status {
    pub id: StatusId,

    /// System name, e.g. `passed` or `custom_status1`
    pub name: String,

    /// Display label, e.g. `Passed`
    pub label: String,

    #[serde(default)]
    pub is_system: bool,

    #[serde(default)]
    pub is_untested: bool,

    #[serde(default)]
    pub is_final: bool,
}

impl Status {
    /// Case-insensitive match against the label or the system name
    pub fn matches(&self, label: &str) -> bool {
        let label = label.trim();
        self.label.eq_ignore_ascii_case(label) || self.name.eq_ignore_ascii_case(label)
    }
}

/// A result recorded for a test
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestResult {
    pub id: u64,

    pub test_id: u64,

    /// Null for comment-only results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_id: Option<StatusId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defects: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Unix timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<i64>,
}

/// Request body for `add_result_for_case`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewResult {
    pub status_id: StatusId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Timespan such as `30s` or `1m 45s`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<String>,

    /// Comma-separated defect ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defects: Option<String>,

    /// Build or version tested against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}
