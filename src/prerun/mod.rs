//! Pre-run filter
//!
//! Before anything executes, narrows a suite down to the tests whose
//! `testrailid` case is part of a TestRail run, optionally only cases in
//! given statuses. Runs nested with the run (the other runs of its test
//! plan) contribute their cases too, up to `results_depth` levels away.

use log::{debug, info};
use std::collections::{BTreeSet, HashSet};

use crate::client::models::{CaseId, RunId, StatusId};
use crate::client::{MAX_PAGE_SIZE, PageParams, TestRailApi, TestRailClient};
use crate::config::PreRunConfig;
use crate::error::Result;
use crate::runner::TestSuite;
use crate::tags;

/// What a filter pass did to a suite
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterReport {
    /// Size of the inclusion set
    pub included_cases: usize,
    /// Tests left in the suite
    pub kept: usize,
    /// Names of the tests taken out, in suite order
    pub removed: Vec<String>,
}

/// Filter that keeps only the tests whose cases are in a run.
///
/// The inclusion set is fetched on the first [`apply`](Self::apply) and
/// reused for every later suite. Any API error aborts the filter.
pub struct PreRunFilter<C> {
    client: C,
    run_id: RunId,
    results_depth: u32,
    statuses: Vec<String>,
    included: Option<BTreeSet<CaseId>>,
}

impl PreRunFilter<TestRailClient> {
    /// Build a filter for the server in `config`. No request is made.
    pub fn from_config(config: &PreRunConfig) -> Result<Self> {
        let client = TestRailClient::new(&config.server)?;
        Ok(Self::new(client, config.run_id)
            .with_results_depth(config.results_depth)
            .with_statuses(config.statuses.clone()))
    }
}

impl<C: TestRailApi> PreRunFilter<C> {
    pub fn new(client: C, run_id: RunId) -> Self {
        Self {
            client,
            run_id,
            results_depth: 0,
            statuses: Vec::new(),
            included: None,
        }
    }

    pub fn with_results_depth(mut self, results_depth: u32) -> Self {
        self.results_depth = results_depth;
        self
    }

    /// Status labels to keep; empty keeps cases in any status
    pub fn with_statuses(mut self, statuses: Vec<String>) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Cases whose tests may run, fetched once and cached.
    pub async fn included_cases(&mut self) -> Result<&BTreeSet<CaseId>> {
        if self.included.is_none() {
            let included = self.collect_case_ids().await?;
            info!(
                "Run {} (depth {}) includes {} cases",
                self.run_id,
                self.results_depth,
                included.len()
            );
            self.included = Some(included);
        }
        Ok(self.included.get_or_insert_with(BTreeSet::new))
    }

    /// Remove every test not in the inclusion set, then every child suite
    /// left empty. The suite itself stays even when nothing is left in it.
    pub async fn apply(&mut self, suite: &mut TestSuite) -> Result<FilterReport> {
        let included = self.included_cases().await?;
        let removed = retain_tests(suite, included);
        let report = FilterReport {
            included_cases: included.len(),
            kept: suite.test_count(),
            removed,
        };

        info!(
            "Suite '{}': {} tests kept, {} removed",
            suite.name,
            report.kept,
            report.removed.len()
        );
        for name in &report.removed {
            debug!("Removed '{}'", name);
        }
        Ok(report)
    }

    async fn status_ids(&self) -> Result<Vec<StatusId>> {
        let mut ids = Vec::with_capacity(self.statuses.len());
        for label in &self.statuses {
            ids.push(self.client.status_id_by_label(label).await?);
        }
        Ok(ids)
    }

    /// Breadth-first over the run and its sub-runs, never visiting a run twice.
    async fn collect_case_ids(&self) -> Result<BTreeSet<CaseId>> {
        let status_ids = self.status_ids().await?;
        let mut included = BTreeSet::new();
        let mut visited = HashSet::from([self.run_id]);
        let mut level = vec![self.run_id];
        let mut depth = 0;

        loop {
            for run_id in &level {
                self.collect_run(*run_id, &status_ids, &mut included)
                    .await?;
            }
            if depth >= self.results_depth {
                break;
            }

            let mut next = Vec::new();
            for run_id in &level {
                for sub_run in self.client.get_sub_runs(*run_id).await? {
                    if visited.insert(sub_run) {
                        next.push(sub_run);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            debug!("Depth {}: sub-runs {:?}", depth + 1, next);
            level = next;
            depth += 1;
        }

        Ok(included)
    }

    async fn collect_run(
        &self,
        run_id: RunId,
        status_ids: &[StatusId],
        included: &mut BTreeSet<CaseId>,
    ) -> Result<()> {
        let mut params = PageParams::new().limit(MAX_PAGE_SIZE);
        loop {
            let page = self.client.get_tests(run_id, status_ids, &params).await?;
            included.extend(page.items.iter().map(|test| test.case_id));
            if !page.has_more() {
                return Ok(());
            }
            params = params.offset(page.next_offset());
        }
    }
}

/// Keep only tests whose case id is in `included`, pruning child suites
/// that end up empty. Returns the names of the removed tests.
pub fn retain_tests(suite: &mut TestSuite, included: &BTreeSet<CaseId>) -> Vec<String> {
    let mut removed = Vec::new();
    prune(suite, included, &mut removed);
    removed
}

fn prune(suite: &mut TestSuite, included: &BTreeSet<CaseId>, removed: &mut Vec<String>) {
    suite.tests.retain(|test| {
        let keep = tags::case_id(&test.tags).is_some_and(|id| included.contains(&id));
        if !keep {
            removed.push(test.name.clone());
        }
        keep
    });

    for child in &mut suite.suites {
        prune(child, included, removed);
    }
    suite.suites.retain(|child| child.test_count() > 0);
}
