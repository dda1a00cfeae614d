//! Mock TestRail API client for testing
//!
//! Provides an in-memory implementation of the API traits for unit testing
//! the listener and the pre-run filter without making real API calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::api::{CaseApi, ProjectApi, RunApi};
use super::models::{
    Case, CaseFilter, CaseId, CaseUpdate, NewCase, NewResult, NewRun, NewSection, Plan, PlanEntry,
    PlanId, Project, ProjectId, Run, RunId, Section, SectionId, Status, StatusId, Suite, SuiteId,
    Test, TestResult, status,
};
use super::pagination::{Page, PageParams};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure remote state via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockTestRailClient::new()
///     .with_run_tests(20, vec![(10, status::FAILED), (11, status::PASSED)])
///     .await;
///
/// let page = mock.get_tests(20, &[], &PageParams::new()).await?;
/// assert_eq!(page.items.len(), 2);
/// ```
pub struct MockTestRailClient {
    /// Projects returned by get_project
    projects: Arc<Mutex<HashMap<ProjectId, Project>>>,
    /// Sections returned by get_section/get_sections
    sections: Arc<Mutex<Vec<Section>>>,
    /// Cases by id; update_case mutates them in place
    cases: Arc<Mutex<HashMap<CaseId, Case>>>,
    /// Runs by id
    runs: Arc<Mutex<HashMap<RunId, Run>>>,
    /// Plans by id
    plans: Arc<Mutex<HashMap<PlanId, Plan>>>,
    /// Tests of each run
    tests: Arc<Mutex<HashMap<RunId, Vec<Test>>>>,
    /// Statuses returned by get_statuses
    statuses: Arc<Mutex<Vec<Status>>>,
    /// Result history per (run, case), newest first
    results: Arc<Mutex<HashMap<(RunId, CaseId), Vec<TestResult>>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Errors for specific methods - each consumed on first use
    method_errors: Arc<Mutex<Vec<(&'static str, ApiError)>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl Default for MockTestRailClient {
    fn default() -> Self {
        Self {
            projects: Arc::new(Mutex::new(HashMap::new())),
            sections: Arc::new(Mutex::new(Vec::new())),
            cases: Arc::new(Mutex::new(HashMap::new())),
            runs: Arc::new(Mutex::new(HashMap::new())),
            plans: Arc::new(Mutex::new(HashMap::new())),
            tests: Arc::new(Mutex::new(HashMap::new())),
            statuses: Arc::new(Mutex::new(system_statuses())),
            results: Arc::new(Mutex::new(HashMap::new())),
            error: Arc::new(Mutex::new(None)),
            method_errors: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// TestRail's five built-in statuses
pub fn system_statuses() -> Vec<Status> {
    [
        (status::PASSED, "passed", "Passed"),
        (status::BLOCKED, "blocked", "Blocked"),
        (status::UNTESTED, "untested", "Untested"),
        (status::RETEST, "retest", "Retest"),
        (status::FAILED, "failed", "Failed"),
    ]
    .into_iter()
    .map(|(id, name, label)| Status {
        id,
        name: name.to_string(),
        label: label.to_string(),
        is_system: true,
        is_untested: id == status::UNTESTED,
        is_final: id != status::UNTESTED && id != status::RETEST,
    })
    .collect()
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub get_project: usize,
    pub get_suite: usize,
    pub get_section: usize,
    pub get_sections: usize,
    pub add_section: usize,
    pub get_case: usize,
    pub get_cases: usize,
    pub add_case: usize,
    pub update_case: usize,
    pub get_run: usize,
    pub add_run: usize,
    pub get_plan: usize,
    pub get_tests: usize,
    pub get_statuses: usize,
    pub add_result_for_case: usize,
    pub get_results_for_case: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.get_project
            + self.get_suite
            + self.get_section
            + self.get_sections
            + self.add_section
            + self.get_case
            + self.get_cases
            + self.add_case
            + self.update_case
            + self.get_run
            + self.add_run
            + self.get_plan
            + self.get_tests
            + self.get_statuses
            + self.add_result_for_case
            + self.get_results_for_case
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum CapturedRequest {
    GetTests {
        run_id: RunId,
        status_ids: Vec<StatusId>,
    },
    AddResult {
        run_id: RunId,
        case_id: CaseId,
        result: NewResult,
    },
    UpdateCase {
        case_id: CaseId,
        update: CaseUpdate,
    },
}

impl MockTestRailClient {
    /// Create a new mock client knowing only the built-in statuses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a project returned by get_project.
    pub async fn with_project(self, project: Project) -> Self {
        self.projects.lock().await.insert(project.id, project);
        self
    }

    /// Configure a case returned by get_case.
    pub async fn with_case(self, case: Case) -> Self {
        self.cases.lock().await.insert(case.id, case);
        self
    }

    /// Configure a standalone run and its tests as `(case_id, status_id)` pairs.
    pub async fn with_run_tests(self, run_id: RunId, tests: Vec<(CaseId, StatusId)>) -> Self {
        self.insert_run(run_id, None, tests).await;
        self
    }

    /// Configure a plan whose entry holds the given runs with their tests.
    pub async fn with_plan(
        self,
        plan_id: PlanId,
        runs: Vec<(RunId, Vec<(CaseId, StatusId)>)>,
    ) -> Self {
        let mut plan_runs = Vec::new();
        for (run_id, tests) in runs {
            plan_runs.push(self.insert_run(run_id, Some(plan_id), tests).await);
        }
        self.plans.lock().await.insert(
            plan_id,
            Plan {
                id: plan_id,
                name: format!("Plan {}", plan_id),
                entries: vec![PlanEntry {
                    id: format!("entry-{}", plan_id),
                    suite_id: None,
                    runs: plan_runs,
                }],
            },
        );
        self
    }

    /// Configure the statuses returned by get_statuses.
    pub async fn with_statuses(self, statuses: Vec<Status>) -> Self {
        *self.statuses.lock().await = statuses;
        self
    }

    /// Record a previous result so last_status_for_case finds it.
    pub async fn with_previous_result(
        self,
        run_id: RunId,
        case_id: CaseId,
        status_id: StatusId,
    ) -> Self {
        self.push_result(run_id, case_id, Some(status_id), None)
            .await;
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Configure an error for the next call of one method, e.g. "add_result_for_case".
    pub async fn with_error_on(self, method: &'static str, error: ApiError) -> Self {
        self.method_errors.lock().await.push((method, error));
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Results submitted through add_result_for_case, in order.
    pub async fn submitted_results(&self) -> Vec<(RunId, CaseId, NewResult)> {
        self.captured_requests
            .lock()
            .await
            .iter()
            .filter_map(|req| match req {
                CapturedRequest::AddResult {
                    run_id,
                    case_id,
                    result,
                } => Some((*run_id, *case_id, result.clone())),
                _ => None,
            })
            .collect()
    }

    async fn insert_run(
        &self,
        run_id: RunId,
        plan_id: Option<PlanId>,
        tests: Vec<(CaseId, StatusId)>,
    ) -> Run {
        let run = Run {
            id: run_id,
            name: format!("Run {}", run_id),
            description: None,
            project_id: Some(1),
            suite_id: Some(1),
            plan_id,
            is_completed: false,
            url: None,
        };
        self.runs.lock().await.insert(run_id, run.clone());
        let tests = tests
            .into_iter()
            .enumerate()
            .map(|(i, (case_id, status_id))| Test {
                id: run_id * 1000 + i as u64,
                case_id,
                status_id,
                run_id: Some(run_id),
                title: None,
            })
            .collect();
        self.tests.lock().await.insert(run_id, tests);
        run
    }

    async fn push_result(
        &self,
        run_id: RunId,
        case_id: CaseId,
        status_id: Option<StatusId>,
        comment: Option<String>,
    ) -> TestResult {
        let mut results = self.results.lock().await;
        let history = results.entry((run_id, case_id)).or_default();
        let result = TestResult {
            id: history.len() as u64 + 1,
            test_id: case_id,
            status_id,
            comment,
            elapsed: None,
            defects: None,
            version: None,
            created_on: None,
        };
        history.insert(0, result.clone());
        result
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self, method: &'static str) -> Result<()> {
        {
            let mut error = self.error.lock().await;
            if let Some(e) = error.take() {
                return Err(e.into());
            }
        }

        let mut method_errors = self.method_errors.lock().await;
        if let Some(pos) = method_errors.iter().position(|(m, _)| *m == method) {
            let (_, e) = method_errors.remove(pos);
            return Err(e.into());
        }

        Ok(())
    }

    async fn capture_request(&self, request: CapturedRequest) {
        self.captured_requests.lock().await.push(request);
    }
}

fn not_found(what: &str, id: u64) -> crate::error::Error {
    ApiError::NotFound(format!("{} {} does not exist", what, id)).into()
}

// ============================================================================
// ProjectApi Implementation
// ============================================================================

#[async_trait]
impl ProjectApi for MockTestRailClient {
    async fn get_project(&self, project_id: ProjectId) -> Result<Project> {
        self.check_error("get_project").await?;
        self.call_count.lock().await.get_project += 1;

        self.projects
            .lock()
            .await
            .get(&project_id)
            .cloned()
            .ok_or_else(|| not_found("Project", project_id))
    }

    async fn get_suite(&self, suite_id: SuiteId) -> Result<Suite> {
        self.check_error("get_suite").await?;
        self.call_count.lock().await.get_suite += 1;

        Ok(Suite {
            id: suite_id,
            name: format!("Suite {}", suite_id),
            description: None,
            project_id: Some(1),
            url: None,
        })
    }

    async fn get_section(&self, section_id: SectionId) -> Result<Section> {
        self.check_error("get_section").await?;
        self.call_count.lock().await.get_section += 1;

        self.sections
            .lock()
            .await
            .iter()
            .find(|s| s.id == section_id)
            .cloned()
            .ok_or_else(|| not_found("Section", section_id))
    }

    async fn get_sections(
        &self,
        _project_id: ProjectId,
        suite_id: Option<SuiteId>,
    ) -> Result<Page<Section>> {
        self.check_error("get_sections").await?;
        self.call_count.lock().await.get_sections += 1;

        let sections = self
            .sections
            .lock()
            .await
            .iter()
            .filter(|s| suite_id.is_none() || s.suite_id == suite_id)
            .cloned()
            .collect();
        Ok(Page::complete(sections))
    }

    async fn add_section(&self, _project_id: ProjectId, section: &NewSection) -> Result<Section> {
        self.check_error("add_section").await?;
        self.call_count.lock().await.add_section += 1;

        let mut sections = self.sections.lock().await;
        let created = Section {
            id: sections.len() as u64 + 1,
            name: section.name.clone(),
            description: section.description.clone(),
            suite_id: section.suite_id,
            parent_id: section.parent_id,
            depth: if section.parent_id.is_some() { 1 } else { 0 },
        };
        sections.push(created.clone());
        Ok(created)
    }
}

// ============================================================================
// CaseApi Implementation
// ============================================================================

#[async_trait]
impl CaseApi for MockTestRailClient {
    async fn get_case(&self, case_id: CaseId) -> Result<Case> {
        self.check_error("get_case").await?;
        self.call_count.lock().await.get_case += 1;

        self.cases
            .lock()
            .await
            .get(&case_id)
            .cloned()
            .ok_or_else(|| not_found("Case", case_id))
    }

    async fn get_cases(
        &self,
        _project_id: ProjectId,
        filter: &CaseFilter,
        _page: &PageParams,
    ) -> Result<Page<Case>> {
        self.check_error("get_cases").await?;
        self.call_count.lock().await.get_cases += 1;

        let mut cases: Vec<Case> = self
            .cases
            .lock()
            .await
            .values()
            .filter(|c| filter.section_id.is_none() || c.section_id == filter.section_id)
            .cloned()
            .collect();
        cases.sort_by_key(|c| c.id);
        Ok(Page::complete(cases))
    }

    async fn add_case(&self, section_id: SectionId, case: &NewCase) -> Result<Case> {
        self.check_error("add_case").await?;
        self.call_count.lock().await.add_case += 1;

        let mut cases = self.cases.lock().await;
        let id = cases.keys().max().copied().unwrap_or(0) + 1;
        let created = Case {
            id,
            title: case.title.clone(),
            section_id: Some(section_id),
            suite_id: None,
            type_id: case.type_id,
            priority_id: case.priority_id,
            refs: case.refs.clone(),
            custom_case_description: case.custom_case_description.clone(),
            custom: case.extra.clone(),
        };
        cases.insert(id, created.clone());
        Ok(created)
    }

    async fn update_case(&self, case_id: CaseId, update: &CaseUpdate) -> Result<Case> {
        self.capture_request(CapturedRequest::UpdateCase {
            case_id,
            update: update.clone(),
        })
        .await;
        self.check_error("update_case").await?;
        self.call_count.lock().await.update_case += 1;

        let mut cases = self.cases.lock().await;
        let case = cases
            .get_mut(&case_id)
            .ok_or_else(|| not_found("Case", case_id))?;
        if let Some(ref title) = update.title {
            case.title = title.clone();
        }
        if update.type_id.is_some() {
            case.type_id = update.type_id;
        }
        if update.priority_id.is_some() {
            case.priority_id = update.priority_id;
        }
        if update.refs.is_some() {
            case.refs = update.refs.clone();
        }
        if update.custom_case_description.is_some() {
            case.custom_case_description = update.custom_case_description.clone();
        }
        Ok(case.clone())
    }
}

// ============================================================================
// RunApi Implementation
// ============================================================================

#[async_trait]
impl RunApi for MockTestRailClient {
    async fn get_run(&self, run_id: RunId) -> Result<Run> {
        self.check_error("get_run").await?;
        self.call_count.lock().await.get_run += 1;

        self.runs
            .lock()
            .await
            .get(&run_id)
            .cloned()
            .ok_or_else(|| not_found("Run", run_id))
    }

    async fn add_run(&self, project_id: ProjectId, run: &NewRun) -> Result<Run> {
        self.check_error("add_run").await?;
        self.call_count.lock().await.add_run += 1;

        let mut runs = self.runs.lock().await;
        let id = runs.keys().max().copied().unwrap_or(0) + 1;
        let created = Run {
            id,
            name: run.name.clone().unwrap_or_else(|| format!("Run {}", id)),
            description: run.description.clone(),
            project_id: Some(project_id),
            suite_id: run.suite_id,
            plan_id: None,
            is_completed: false,
            url: None,
        };
        runs.insert(id, created.clone());
        Ok(created)
    }

    async fn get_plan(&self, plan_id: PlanId) -> Result<Plan> {
        self.check_error("get_plan").await?;
        self.call_count.lock().await.get_plan += 1;

        self.plans
            .lock()
            .await
            .get(&plan_id)
            .cloned()
            .ok_or_else(|| not_found("Plan", plan_id))
    }

    async fn get_tests(
        &self,
        run_id: RunId,
        status_ids: &[StatusId],
        _page: &PageParams,
    ) -> Result<Page<Test>> {
        self.capture_request(CapturedRequest::GetTests {
            run_id,
            status_ids: status_ids.to_vec(),
        })
        .await;
        self.check_error("get_tests").await?;
        self.call_count.lock().await.get_tests += 1;

        let tests = self.tests.lock().await;
        let run_tests = tests.get(&run_id).ok_or_else(|| not_found("Run", run_id))?;
        let items = run_tests
            .iter()
            .filter(|t| status_ids.is_empty() || status_ids.contains(&t.status_id))
            .cloned()
            .collect();
        Ok(Page::complete(items))
    }

    async fn get_statuses(&self) -> Result<Vec<Status>> {
        self.check_error("get_statuses").await?;
        self.call_count.lock().await.get_statuses += 1;

        Ok(self.statuses.lock().await.clone())
    }

    async fn add_result_for_case(
        &self,
        run_id: RunId,
        case_id: CaseId,
        result: &NewResult,
    ) -> Result<TestResult> {
        self.capture_request(CapturedRequest::AddResult {
            run_id,
            case_id,
            result: result.clone(),
        })
        .await;
        self.check_error("add_result_for_case").await?;
        self.call_count.lock().await.add_result_for_case += 1;

        Ok(self
            .push_result(run_id, case_id, Some(result.status_id), result.comment.clone())
            .await)
    }

    async fn get_results_for_case(
        &self,
        run_id: RunId,
        case_id: CaseId,
        limit: Option<usize>,
    ) -> Result<Page<TestResult>> {
        self.check_error("get_results_for_case").await?;
        self.call_count.lock().await.get_results_for_case += 1;

        let results = self.results.lock().await;
        let history = results.get(&(run_id, case_id)).cloned().unwrap_or_default();
        let items = match limit {
            Some(limit) => history.into_iter().take(limit).collect(),
            None => history,
        };
        Ok(Page::complete(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_default_statuses() {
        let mock = MockTestRailClient::new();
        let statuses = mock.get_statuses().await.unwrap();
        assert_eq!(statuses.len(), 5);
        assert_eq!(mock.status_id_by_label("FAILED").await.unwrap(), status::FAILED);
    }

    #[tokio::test]
    async fn test_mock_client_unknown_status_label() {
        let mock = MockTestRailClient::new();
        let err = mock.status_id_by_label("flaky").await.unwrap_err();
        assert!(err.to_string().contains("'flaky'"));
    }

    #[tokio::test]
    async fn test_mock_client_filters_tests_by_status() {
        let mock = MockTestRailClient::new()
            .with_run_tests(
                20,
                vec![(10, status::FAILED), (11, status::PASSED), (12, status::BLOCKED)],
            )
            .await;

        let page = mock
            .get_tests(20, &[status::FAILED, status::BLOCKED], &PageParams::new())
            .await
            .unwrap();
        let case_ids: Vec<CaseId> = page.items.iter().map(|t| t.case_id).collect();
        assert_eq!(case_ids, vec![10, 12]);
    }

    #[tokio::test]
    async fn test_mock_client_sub_runs_come_from_plan() {
        let mock = MockTestRailClient::new()
            .with_plan(100, vec![(1, vec![(10, status::PASSED)]), (2, vec![(99, status::FAILED)])])
            .await
            .with_run_tests(3, vec![])
            .await;

        assert_eq!(mock.get_sub_runs(1).await.unwrap(), vec![2]);
        assert_eq!(mock.get_sub_runs(2).await.unwrap(), vec![1]);
        assert!(mock.get_sub_runs(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mock_client_last_status() {
        let mock = MockTestRailClient::new()
            .with_previous_result(20, 10, status::PASSED)
            .await
            .with_previous_result(20, 10, status::BLOCKED)
            .await;

        assert_eq!(
            mock.last_status_for_case(20, 10).await.unwrap(),
            Some(status::BLOCKED)
        );
        assert_eq!(mock.last_status_for_case(20, 11).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_mock_client_with_error() {
        let mock = MockTestRailClient::new()
            .with_error(ApiError::Unauthorized("bad password".to_string()))
            .await;

        let result = mock.get_statuses().await;
        assert!(result.is_err());

        // Error is consumed, second call succeeds
        assert!(mock.get_statuses().await.is_ok());
        assert_eq!(mock.call_counts().await.get_statuses, 1);
    }

    #[tokio::test]
    async fn test_mock_client_method_error_only_hits_that_method() {
        let mock = MockTestRailClient::new()
            .with_error_on(
                "add_result_for_case",
                ApiError::BadRequest("no such test".to_string()),
            )
            .await;

        assert!(mock.get_statuses().await.is_ok());
        let result = NewResult {
            status_id: status::PASSED,
            ..Default::default()
        };
        assert!(mock.add_result_for_case(1, 2, &result).await.is_err());
        assert!(mock.add_result_for_case(1, 2, &result).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_client_add_case_then_update() {
        let mock = MockTestRailClient::new();
        let created = mock
            .add_case(
                5,
                &NewCase {
                    title: "Draft".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        mock.update_case(
            created.id,
            &CaseUpdate {
                title: Some("Final".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let fetched = mock.get_case(created.id).await.unwrap();
        assert_eq!(fetched.title, "Final");
        assert_eq!(fetched.section_id, Some(5));
    }
}
