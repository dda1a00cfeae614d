//! Table rows for TestRail models

use tabled::Tabled;

use super::formatters::{format_timestamp, or_dash, truncate};
use crate::client::models::{Case, Project, Run, Section, Status, Suite, Test, TestResult};

const TITLE_WIDTH: usize = 60;

fn opt_id(id: Option<u64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}

#[derive(Tabled)]
pub struct ProjectDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "COMPLETED")]
    pub completed: String,
}

impl From<&Project> for ProjectDisplay {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            completed: if project.is_completed { "yes" } else { "no" }.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct SuiteDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "PROJECT")]
    pub project: String,
}

impl From<&Suite> for SuiteDisplay {
    fn from(suite: &Suite) -> Self {
        Self {
            id: suite.id,
            name: suite.name.clone(),
            project: opt_id(suite.project_id),
        }
    }
}

#[derive(Tabled)]
pub struct SectionDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "SUITE")]
    pub suite: String,
    #[tabled(rename = "PARENT")]
    pub parent: String,
}

impl From<&Section> for SectionDisplay {
    fn from(section: &Section) -> Self {
        // Indent by depth so the tree shows in a flat listing
        let indent = "  ".repeat(section.depth as usize);
        Self {
            id: section.id,
            name: format!("{}{}", indent, section.name),
            suite: opt_id(section.suite_id),
            parent: opt_id(section.parent_id),
        }
    }
}

#[derive(Tabled)]
pub struct CaseDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "TITLE")]
    pub title: String,
    #[tabled(rename = "SECTION")]
    pub section: String,
    #[tabled(rename = "TYPE")]
    pub type_id: String,
    #[tabled(rename = "REFS")]
    pub refs: String,
}

impl From<&Case> for CaseDisplay {
    fn from(case: &Case) -> Self {
        Self {
            id: case.id,
            title: truncate(&case.title, TITLE_WIDTH),
            section: opt_id(case.section_id),
            type_id: opt_id(case.type_id),
            refs: or_dash(case.refs.as_deref()),
        }
    }
}

#[derive(Tabled)]
pub struct RunDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "SUITE")]
    pub suite: String,
    #[tabled(rename = "PLAN")]
    pub plan: String,
    #[tabled(rename = "COMPLETED")]
    pub completed: String,
}

impl From<&Run> for RunDisplay {
    fn from(run: &Run) -> Self {
        Self {
            id: run.id,
            name: run.name.clone(),
            suite: opt_id(run.suite_id),
            plan: opt_id(run.plan_id),
            completed: if run.is_completed { "yes" } else { "no" }.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct TestDisplay {
    #[tabled(rename = "TEST")]
    pub id: u64,
    #[tabled(rename = "CASE")]
    pub case_id: u64,
    #[tabled(rename = "STATUS")]
    pub status_id: u64,
    #[tabled(rename = "TITLE")]
    pub title: String,
}

impl From<&Test> for TestDisplay {
    fn from(test: &Test) -> Self {
        Self {
            id: test.id,
            case_id: test.case_id,
            status_id: test.status_id,
            title: truncate(test.title.as_deref().unwrap_or("-"), TITLE_WIDTH),
        }
    }
}

#[derive(Tabled)]
pub struct StatusDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "LABEL")]
    pub label: String,
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "SYSTEM")]
    pub system: String,
}

impl From<&Status> for StatusDisplay {
    fn from(status: &Status) -> Self {
        Self {
            id: status.id,
            label: status.label.clone(),
            name: status.name.clone(),
            system: if status.is_system { "yes" } else { "no" }.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct ResultDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "STATUS")]
    pub status: String,
    #[tabled(rename = "ELAPSED")]
    pub elapsed: String,
    #[tabled(rename = "DEFECTS")]
    pub defects: String,
    #[tabled(rename = "CREATED")]
    pub created: String,
    #[tabled(rename = "COMMENT")]
    pub comment: String,
}

impl From<&TestResult> for ResultDisplay {
    fn from(result: &TestResult) -> Self {
        Self {
            id: result.id,
            status: opt_id(result.status_id),
            elapsed: or_dash(result.elapsed.as_deref()),
            defects: or_dash(result.defects.as_deref()),
            created: format_timestamp(result.created_on),
            comment: truncate(result.comment.as_deref().unwrap_or("-"), TITLE_WIDTH),
        }
    }
}
