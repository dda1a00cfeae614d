//! Project, suite and section models

use serde::{Deserialize, Serialize};

use super::{ProjectId, SectionId, SuiteId};

/// TestRail project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement: Option<String>,

    #[serde(default)]
    pub is_completed: bool,

    /// 1 = single suite, 2 = single suite with baselines, 3 = multiple suites
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite_mode: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Test suite inside a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suite {
    pub id: SuiteId,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Section (folder) of test cases
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite_id: Option<SuiteId>,

    /// Parent section for nested hierarchies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<SectionId>,

    /// Nesting level, 0 for top-level sections
    #[serde(default)]
    pub depth: u32,
}

/// Request body for `add_section`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewSection {
    pub name: String,

    /// Ignored by TestRail when the project runs in single suite mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite_id: Option<SuiteId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<SectionId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
