//! Run, plan, status and result API trait

use async_trait::async_trait;

use crate::client::models::{
    CaseId, NewResult, NewRun, Plan, PlanId, ProjectId, Run, RunId, Status, StatusId, Test,
    TestResult,
};
use crate::client::pagination::{Page, PageParams};
use crate::error::{ConfigError, Result};

/// Run and result operations for the TestRail API
#[async_trait]
pub trait RunApi: Send + Sync {
    /// Get a run by id
    async fn get_run(&self, run_id: RunId) -> Result<Run>;

    /// Create a run in a project
    async fn add_run(&self, project_id: ProjectId, run: &NewRun) -> Result<Run>;

    /// Get a test plan with its entries and their runs
    async fn get_plan(&self, plan_id: PlanId) -> Result<Plan>;

    /// List the tests of a run.
    ///
    /// An empty `status_ids` returns tests in every status.
    async fn get_tests(
        &self,
        run_id: RunId,
        status_ids: &[StatusId],
        page: &PageParams,
    ) -> Result<Page<Test>>;

    /// List every result status, built-in and custom
    async fn get_statuses(&self) -> Result<Vec<Status>>;

    /// Record a result for the test of `case_id` in `run_id`
    async fn add_result_for_case(
        &self,
        run_id: RunId,
        case_id: CaseId,
        result: &NewResult,
    ) -> Result<TestResult>;

    /// Results of a case in a run, newest first
    async fn get_results_for_case(
        &self,
        run_id: RunId,
        case_id: CaseId,
        limit: Option<usize>,
    ) -> Result<Page<TestResult>>;

    /// Resolve a status label (or system name) to its id, ignoring case.
    async fn status_id_by_label(&self, label: &str) -> Result<StatusId> {
        self.get_statuses()
            .await?
            .iter()
            .find(|status| status.matches(label))
            .map(|status| status.id)
            .ok_or_else(|| ConfigError::UnknownStatus(label.to_string()).into())
    }

    /// Status of the newest result of a case in a run, if it has one.
    async fn last_status_for_case(&self, run_id: RunId, case_id: CaseId) -> Result<Option<StatusId>> {
        let page = self.get_results_for_case(run_id, case_id, Some(1)).await?;
        Ok(page.items.first().and_then(|result| result.status_id))
    }

    /// Runs nested with `run_id`.
    ///
    /// TestRail nests runs only inside test plans: a run that is a plan entry
    /// has the plan's other runs as sub-runs, a standalone run has none.
    async fn get_sub_runs(&self, run_id: RunId) -> Result<Vec<RunId>> {
        let run = self.get_run(run_id).await?;
        let Some(plan_id) = run.plan_id else {
            return Ok(Vec::new());
        };

        let plan = self.get_plan(plan_id).await?;
        Ok(plan
            .runs()
            .map(|r| r.id)
            .filter(|id| *id != run_id)
            .collect())
    }
}
