//! Result-reporting listener
//!
//! Mirrors each finished test to a TestRail run: the `testrailid` tag names
//! the case, the outcome becomes a result, and in update mode the case's
//! title, description and references follow the test.
//!
//! API failures are logged and counted, never raised. One test failing to
//! report leaves every later test unaffected.

use async_trait::async_trait;
use log::{error, info, warn};
use serde::Serialize;
use std::fmt;

use crate::client::models::{CASE_TYPE_AUTOMATED, CaseId, CaseUpdate, NewResult, RunId, StatusId, status};
use crate::client::{TestRailApi, TestRailClient};
use crate::config::ListenerConfig;
use crate::error::Result;
use crate::runner::{Listener, TestItem, TestOutcome, TestStatus};
use crate::tags::TestTags;

/// Where the listener is in a test's lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Idle,
    /// A test named here has started and not yet ended
    TestStarted(String),
    /// The last test ended with this submission
    TestEnded(Submission),
}

/// What happened to the result of one test
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Submitted { case_id: CaseId, status_id: StatusId },
    Skipped(SkipReason),
    Failed { case_id: CaseId, error: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The test has no usable `testrailid` tag
    Untracked,
    /// The runner skipped the test; there is no outcome to report
    NotRun,
}

/// Counters over the submissions of a listener
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub submitted: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Case updates that failed; counted apart from result submissions
    pub update_failed: usize,
}

impl ReportSummary {
    fn record(&mut self, submission: &Submission) {
        match submission {
            Submission::Submitted { .. } => self.submitted += 1,
            Submission::Skipped(_) => self.skipped += 1,
            Submission::Failed { .. } => self.failed += 1,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.update_failed > 0
    }
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} submitted, {} skipped, {} failed",
            self.submitted, self.skipped, self.failed
        )?;
        if self.update_failed > 0 {
            write!(f, ", {} case updates failed", self.update_failed)?;
        }
        Ok(())
    }
}

/// Listener that reports test outcomes to a TestRail run.
///
/// # Example
/// ```ignore
/// let config: ListenerConfig = "tr.local:tester:pw:20:https:update".parse()?;
/// let mut listener = ResultListener::from_config(&config)?;
/// runner::replay(&mut listener, &outcomes).await;
/// println!("{}", listener.summary());
/// ```
pub struct ResultListener<C> {
    client: C,
    run_id: RunId,
    update: bool,
    juggler: bool,
    state: State,
    summary: ReportSummary,
    suite_summary: ReportSummary,
}

impl ResultListener<TestRailClient> {
    /// Build a listener talking to the server in `config`. No request is made.
    pub fn from_config(config: &ListenerConfig) -> Result<Self> {
        let client = TestRailClient::new(&config.server)?;
        info!("TestRail url: {}", client.base_url());
        info!("TestRail user: {}", config.server.user);
        info!("TestRail run: {}", config.run_id);

        Ok(Self::new(client, config.run_id)
            .with_update(config.update)
            .with_juggler(config.juggler))
    }
}

impl<C: TestRailApi> ResultListener<C> {
    pub fn new(client: C, run_id: RunId) -> Self {
        Self {
            client,
            run_id,
            update: false,
            juggler: false,
            state: State::Idle,
            summary: ReportSummary::default(),
            suite_summary: ReportSummary::default(),
        }
    }

    /// Overwrite case title, description and references after each result
    pub fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    /// Keep a blocked/retest status when a test fails again
    pub fn with_juggler(mut self, juggler: bool) -> Self {
        self.juggler = juggler;
        self
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Counters over every test seen so far
    pub fn summary(&self) -> ReportSummary {
        self.summary
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    async fn report(&mut self, outcome: &TestOutcome) -> Submission {
        let test = &outcome.test;
        let tags = TestTags::parse(&test.tags);
        let Some(case_id) = tags.case_id else {
            warn!("No case id presented for test '{}'", test.name);
            return Submission::Skipped(SkipReason::Untracked);
        };

        let status_id = match outcome.status {
            TestStatus::Pass => status::PASSED,
            TestStatus::Fail => self.failed_status(case_id).await,
            TestStatus::Skip => {
                info!("Test '{}' (case {}) did not run, nothing reported", test.name, case_id);
                return Submission::Skipped(SkipReason::NotRun);
            }
        };

        let result = build_result(outcome, status_id, &tags);
        let submission = match self
            .client
            .add_result_for_case(self.run_id, case_id, &result)
            .await
        {
            Ok(_) => {
                info!(
                    "Result for case {} in run {}: status {}",
                    case_id, self.run_id, status_id
                );
                Submission::Submitted { case_id, status_id }
            }
            Err(err) => {
                error!("Failed to add result for case {}: {}", case_id, err);
                Submission::Failed {
                    case_id,
                    error: err.to_string(),
                }
            }
        };

        if self.update {
            self.update_case(case_id, test, &tags).await;
        }

        submission
    }

    /// Status to submit for a failed test
    async fn failed_status(&self, case_id: CaseId) -> StatusId {
        if !self.juggler {
            return status::FAILED;
        }

        match self.client.last_status_for_case(self.run_id, case_id).await {
            Ok(previous) => juggle(TestStatus::Fail, previous),
            Err(err) => {
                warn!(
                    "Could not read previous status of case {}, reporting failed: {}",
                    case_id, err
                );
                status::FAILED
            }
        }
    }

    async fn update_case(&mut self, case_id: CaseId, test: &TestItem, tags: &TestTags) {
        info!("Updating case {} from test '{}'", case_id, test.name);
        let update = case_update(test, tags);
        if let Err(err) = self.client.update_case(case_id, &update).await {
            error!("Failed to update case {}: {}", case_id, err);
            self.summary.update_failed += 1;
            self.suite_summary.update_failed += 1;
        }
    }
}

#[async_trait]
impl<C: TestRailApi> Listener for ResultListener<C> {
    async fn on_test_start(&mut self, test: &TestItem) {
        self.state = State::TestStarted(test.name.clone());
    }

    async fn on_test_end(&mut self, outcome: &TestOutcome) {
        let submission = self.report(outcome).await;
        self.summary.record(&submission);
        self.suite_summary.record(&submission);
        self.state = State::TestEnded(submission);
    }

    async fn on_suite_end(&mut self, suite: &str) {
        let name = if suite.is_empty() { "(root)" } else { suite };
        info!("Suite '{}': {}", name, self.suite_summary);
        self.suite_summary = ReportSummary::default();
    }
}

/// Status to report given the new outcome and the case's previous status.
///
/// A pass is always passed. A failure is failed unless the previous status
/// was something other than passed or failed (blocked, retest, custom), in
/// which case that status stands.
pub fn juggle(outcome: TestStatus, previous: Option<StatusId>) -> StatusId {
    match (outcome, previous) {
        (TestStatus::Pass, _) => status::PASSED,
        (_, Some(previous)) if previous != status::PASSED && previous != status::FAILED => previous,
        _ => status::FAILED,
    }
}

/// The result payload for one outcome
pub fn build_result(outcome: &TestOutcome, status_id: StatusId, tags: &TestTags) -> NewResult {
    NewResult {
        status_id,
        comment: Some(outcome.message.clone()).filter(|m| !m.is_empty()),
        elapsed: time_span(outcome.elapsed_ms / 1000),
        defects: tags.defects_field(),
        version: None,
    }
}

fn case_update(test: &TestItem, tags: &TestTags) -> CaseUpdate {
    CaseUpdate {
        title: Some(test.name.clone()),
        type_id: Some(CASE_TYPE_AUTOMATED),
        priority_id: None,
        refs: Some(tags.references_field().unwrap_or_default()),
        custom_case_description: Some(test.doc.clone()),
    }
}

/// Format whole seconds as a TestRail timespan (`1h 2m 3s`).
///
/// TestRail rejects a zero timespan, so anything under a second is `None`.
pub fn time_span(seconds: u64) -> Option<String> {
    if seconds == 0 {
        return None;
    }

    let (h, m, s) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    let span = if h > 0 {
        format!("{}h {}m {}s", h, m, s)
    } else if m > 0 {
        format!("{}m {}s", m, s)
    } else {
        format!("{}s", s)
    };
    Some(span)
}
