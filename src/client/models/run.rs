//! Run, plan and test models

use serde::{Deserialize, Serialize};

use super::{CaseId, PlanId, ProjectId, RunId, StatusId, SuiteId};

/// Test run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub id: RunId,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite_id: Option<SuiteId>,

    /// Set when the run is an entry of a test plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<PlanId>,

    #[serde(default)]
    pub is_completed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Test plan grouping several runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,

    pub name: String,

    #[serde(default)]
    pub entries: Vec<PlanEntry>,
}

impl Plan {
    /// Every run of every entry, in plan order
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.entries.iter().flat_map(|entry| entry.runs.iter())
    }
}

/// One suite entry of a plan; holds a run per configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Entry ids are GUID strings
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite_id: Option<SuiteId>,

    #[serde(default)]
    pub runs: Vec<Run>,
}

/// A case instantiated inside a run, with its current status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Test {
    pub id: u64,

    pub case_id: CaseId,

    pub status_id: StatusId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<RunId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Request body for `add_run`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewRun {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite_id: Option<SuiteId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignedto_id: Option<u64>,

    /// Include every case of the suite; `case_ids` is used when false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_ids: Option<Vec<CaseId>>,
}
