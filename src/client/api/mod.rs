//! API trait definitions split by responsibility
//!
//! This module organizes the TestRail API surface into focused sub-traits:
//! - [`ProjectApi`] - Projects, suites and sections
//! - [`CaseApi`] - Test case CRUD
//! - [`RunApi`] - Runs, plans, tests, statuses and results
//!
//! The [`TestRailApi`](super::TestRailApi) super-trait combines all three.

mod case;
mod project;
mod run;

pub use case::CaseApi;
pub use project::ProjectApi;
pub use run::RunApi;
