//! Project, suite and section API trait

use async_trait::async_trait;

use crate::client::models::{NewSection, Project, ProjectId, Section, SectionId, Suite, SuiteId};
use crate::client::pagination::Page;
use crate::error::Result;

/// Project structure operations for the TestRail API
#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// Get a project by id
    async fn get_project(&self, project_id: ProjectId) -> Result<Project>;

    /// Get a test suite by id
    async fn get_suite(&self, suite_id: SuiteId) -> Result<Suite>;

    /// Get a section by id
    async fn get_section(&self, section_id: SectionId) -> Result<Section>;

    /// List the sections of a project.
    ///
    /// `suite_id` is required unless the project runs in single suite mode.
    async fn get_sections(
        &self,
        project_id: ProjectId,
        suite_id: Option<SuiteId>,
    ) -> Result<Page<Section>>;

    /// Create a section, optionally nested under `parent_id`
    async fn add_section(&self, project_id: ProjectId, section: &NewSection) -> Result<Section>;
}
