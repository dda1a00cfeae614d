//! Test case models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{CaseId, SectionId, SuiteId};

/// `type_id` of the built-in "Automated" case type
pub const CASE_TYPE_AUTOMATED: u64 = 1;

/// TestRail test case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    pub id: CaseId,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<SectionId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite_id: Option<SuiteId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<u64>,

    /// Comma-separated references/requirements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refs: Option<String>,

    /// Custom text field holding the automated test's documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_case_description: Option<String>,

    /// Remaining fields, mostly `custom_*` ones defined per installation
    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

/// One step of a "steps separated" case template
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CaseStep {
    pub content: String,

    #[serde(default)]
    pub expected: String,
}

/// Request body for `add_case`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewCase {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refs: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_case_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_steps_separated: Option<Vec<CaseStep>>,

    /// Extra fields sent as-is, e.g. `custom_automation_type`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request body for `update_case`; unset fields are left untouched remotely
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CaseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refs: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_case_description: Option<String>,
}

/// Narrowing options for `get_cases`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseFilter {
    /// Required unless the project runs in single suite mode
    pub suite_id: Option<SuiteId>,
    pub section_id: Option<SectionId>,
}
