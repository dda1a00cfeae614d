//! Test runner model
//!
//! The host runner's side of the contract as plain data: the suite tree the
//! pre-run filter prunes, the outcomes the listener reports, and the
//! [`Listener`] hooks the runner calls. Both shapes are read from JSON by
//! the CLI.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outcome of a single executed test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Pass,
    Fail,
    #[serde(alias = "NOT RUN", alias = "NOT_RUN")]
    Skip,
}

/// A test as the runner knows it before execution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestItem {
    pub name: String,

    /// Test documentation
    #[serde(default)]
    pub doc: String,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl TestItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// A suite: tests plus child suites
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestSuite {
    pub name: String,

    #[serde(default)]
    pub tests: Vec<TestItem>,

    #[serde(default)]
    pub suites: Vec<TestSuite>,
}

impl TestSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Number of tests in this suite and all of its children
    pub fn test_count(&self) -> usize {
        self.tests.len() + self.suites.iter().map(TestSuite::test_count).sum::<usize>()
    }
}

/// An executed test and how it went
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    #[serde(flatten)]
    pub test: TestItem,

    /// Fully qualified name, `Suite.Sub Suite.Test`
    #[serde(default)]
    pub longname: String,

    pub status: TestStatus,

    /// Failure reason; empty for passing tests
    #[serde(default)]
    pub message: String,

    /// Wall time of the test in milliseconds
    #[serde(default)]
    pub elapsed_ms: u64,
}

impl TestOutcome {
    pub fn new(test: TestItem, status: TestStatus) -> Self {
        Self {
            longname: test.name.clone(),
            test,
            status,
            message: String::new(),
            elapsed_ms: 0,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_elapsed_ms(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = elapsed_ms;
        self
    }

    pub fn with_longname(mut self, longname: impl Into<String>) -> Self {
        self.longname = longname.into();
        self
    }

    /// Suite part of the long name; empty for a test outside any suite.
    ///
    /// The test name is stripped as a whole, so dots inside it stay with
    /// the test.
    pub fn suite_name(&self) -> &str {
        if self.longname == self.test.name {
            return "";
        }
        self.longname
            .strip_suffix(self.test.name.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
            .or_else(|| self.longname.rsplit_once('.').map(|(suite, _)| suite))
            .unwrap_or("")
    }
}

/// Lifecycle hooks the runner calls while tests execute.
///
/// Hooks do not return errors: a listener handles its own failures so one
/// misbehaving test never stops the run.
#[async_trait]
pub trait Listener: Send {
    async fn on_test_start(&mut self, _test: &TestItem) {}

    async fn on_test_end(&mut self, outcome: &TestOutcome);

    async fn on_suite_end(&mut self, _suite: &str) {}
}

/// Drive a listener over recorded outcomes in order.
///
/// Consecutive outcomes with the same suite name form one suite; the suite
/// end hook fires whenever the suite changes and after the last outcome.
pub async fn replay<L: Listener + ?Sized>(listener: &mut L, outcomes: &[TestOutcome]) {
    let mut current: Option<&str> = None;

    for outcome in outcomes {
        let suite = outcome.suite_name();
        if let Some(previous) = current.filter(|previous| *previous != suite) {
            listener.on_suite_end(previous).await;
        }
        current = Some(suite);

        listener.on_test_start(&outcome.test).await;
        listener.on_test_end(outcome).await;
    }

    if let Some(last) = current {
        listener.on_suite_end(last).await;
    }
}
