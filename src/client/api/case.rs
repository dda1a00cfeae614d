//! Test case API trait

use async_trait::async_trait;

use crate::client::models::{Case, CaseFilter, CaseId, CaseUpdate, NewCase, ProjectId, SectionId};
use crate::client::pagination::{Page, PageParams};
use crate::error::Result;

/// Test case operations for the TestRail API
#[async_trait]
pub trait CaseApi: Send + Sync {
    /// Get a case by id
    async fn get_case(&self, case_id: CaseId) -> Result<Case>;

    /// List the cases of a project, narrowed to a suite and/or section
    async fn get_cases(
        &self,
        project_id: ProjectId,
        filter: &CaseFilter,
        page: &PageParams,
    ) -> Result<Page<Case>>;

    /// Create a case in a section
    async fn add_case(&self, section_id: SectionId, case: &NewCase) -> Result<Case>;

    /// Update a case. Only the fields set in `update` change.
    async fn update_case(&self, case_id: CaseId, update: &CaseUpdate) -> Result<Case>;
}
