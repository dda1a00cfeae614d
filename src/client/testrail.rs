//! TestRail API client implementation

use async_trait::async_trait;
use log::debug;
use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client as HttpClient, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use super::api::{CaseApi, ProjectApi, RunApi};
use super::models::{
    Case, CaseFilter, CaseId, CaseUpdate, NewCase, NewResult, NewRun, NewSection, Plan, PlanId,
    Project, ProjectId, Run, RunId, Section, SectionId, Status, StatusId, Suite, SuiteId, Test,
    TestResult,
};
use super::pagination::{Page, PageParams};
use crate::config::ServerConfig;
use crate::error::{ApiError, Result};

/// HTTP client for TestRail's REST API v2.
///
/// Authenticates every request with HTTP basic auth. Building the client
/// does not touch the network; the first request does.
pub struct TestRailClient {
    http: HttpClient,
    base_url: String,
    user: String,
    password: String,
}

impl TestRailClient {
    /// Create a new client for the given server
    pub fn new(server: &ServerConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: server.base_url(),
            user: server.user.clone(),
            password: server.password.clone(),
        })
    }

    /// URL every endpoint path is appended to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, uri: &str) -> Result<T> {
        let request = self.http.request(Method::GET, self.url(uri));
        self.send(request, Method::GET, uri).await
    }

    async fn post<B, T>(&self, uri: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.request(Method::POST, self.url(uri)).json(body);
        self.send(request, Method::POST, uri).await
    }

    fn url(&self, uri: &str) -> String {
        format!("{}{}", self.base_url, uri)
    }

    /// Send a request and decode the JSON body, mapping failures to `ApiError`
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method: Method,
        uri: &str,
    ) -> Result<T> {
        debug!("{} {}", method, uri);

        let response = request
            .basic_auth(&self.user, Some(&self.password))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);
            let body = response.text().await.unwrap_or_default();
            debug!("{} {} failed with {}", method, uri, status);
            return Err(ApiError::from_status(status.as_u16(), &body, retry_after).into());
        }

        let body = response.text().await.map_err(ApiError::from)?;
        let data = serde_json::from_str(&body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response of {}: {}", uri, e))
        })?;
        Ok(data)
    }

    async fn get_page<T: DeserializeOwned>(&self, uri: &str, key: &str) -> Result<Page<T>> {
        let value: Value = self.get(uri).await?;
        Ok(Page::from_value(value, key)?)
    }
}

#[async_trait]
impl ProjectApi for TestRailClient {
    async fn get_project(&self, project_id: ProjectId) -> Result<Project> {
        self.get(&format!("get_project/{}", project_id)).await
    }

    async fn get_suite(&self, suite_id: SuiteId) -> Result<Suite> {
        self.get(&format!("get_suite/{}", suite_id)).await
    }

    async fn get_section(&self, section_id: SectionId) -> Result<Section> {
        self.get(&format!("get_section/{}", section_id)).await
    }

    async fn get_sections(
        &self,
        project_id: ProjectId,
        suite_id: Option<SuiteId>,
    ) -> Result<Page<Section>> {
        let mut uri = format!("get_sections/{}", project_id);
        if let Some(suite_id) = suite_id {
            uri.push_str(&format!("&suite_id={}", suite_id));
        }
        self.get_page(&uri, "sections").await
    }

    async fn add_section(&self, project_id: ProjectId, section: &NewSection) -> Result<Section> {
        self.post(&format!("add_section/{}", project_id), section)
            .await
    }
}

#[async_trait]
impl CaseApi for TestRailClient {
    async fn get_case(&self, case_id: CaseId) -> Result<Case> {
        self.get(&format!("get_case/{}", case_id)).await
    }

    async fn get_cases(
        &self,
        project_id: ProjectId,
        filter: &CaseFilter,
        page: &PageParams,
    ) -> Result<Page<Case>> {
        let mut uri = format!("get_cases/{}", project_id);
        if let Some(suite_id) = filter.suite_id {
            uri.push_str(&format!("&suite_id={}", suite_id));
        }
        if let Some(section_id) = filter.section_id {
            uri.push_str(&format!("&section_id={}", section_id));
        }
        uri.push_str(&page.to_query());
        self.get_page(&uri, "cases").await
    }

    async fn add_case(&self, section_id: SectionId, case: &NewCase) -> Result<Case> {
        self.post(&format!("add_case/{}", section_id), case).await
    }

    async fn update_case(&self, case_id: CaseId, update: &CaseUpdate) -> Result<Case> {
        self.post(&format!("update_case/{}", case_id), update).await
    }
}

#[async_trait]
impl RunApi for TestRailClient {
    async fn get_run(&self, run_id: RunId) -> Result<Run> {
        self.get(&format!("get_run/{}", run_id)).await
    }

    async fn add_run(&self, project_id: ProjectId, run: &NewRun) -> Result<Run> {
        self.post(&format!("add_run/{}", project_id), run).await
    }

    async fn get_plan(&self, plan_id: PlanId) -> Result<Plan> {
        self.get(&format!("get_plan/{}", plan_id)).await
    }

    async fn get_tests(
        &self,
        run_id: RunId,
        status_ids: &[StatusId],
        page: &PageParams,
    ) -> Result<Page<Test>> {
        let mut uri = format!("get_tests/{}", run_id);
        if !status_ids.is_empty() {
            let ids: Vec<String> = status_ids.iter().map(|id| id.to_string()).collect();
            uri.push_str(&format!("&status_id={}", ids.join(",")));
        }
        uri.push_str(&page.to_query());
        self.get_page(&uri, "tests").await
    }

    async fn get_statuses(&self) -> Result<Vec<Status>> {
        self.get("get_statuses").await
    }

    async fn add_result_for_case(
        &self,
        run_id: RunId,
        case_id: CaseId,
        result: &NewResult,
    ) -> Result<TestResult> {
        self.post(
            &format!("add_result_for_case/{}/{}", run_id, case_id),
            result,
        )
        .await
    }

    async fn get_results_for_case(
        &self,
        run_id: RunId,
        case_id: CaseId,
        limit: Option<usize>,
    ) -> Result<Page<TestResult>> {
        let mut uri = format!("get_results_for_case/{}/{}", run_id, case_id);
        if let Some(limit) = limit {
            uri.push_str(&format!("&limit={}", limit));
        }
        self.get_page(&uri, "results").await
    }
}
