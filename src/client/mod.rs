//! TestRail API client

pub mod api;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod testrail;

pub use api::{CaseApi, ProjectApi, RunApi};
#[cfg(test)]
pub use mock::MockTestRailClient;
pub use pagination::{MAX_PAGE_SIZE, Page, PageParams};
pub use testrail::TestRailClient;

/// TestRail API client trait combining all sub-traits.
///
/// Implemented automatically for any type providing the three
/// responsibility traits, so the listener and the pre-run filter can take
/// either the HTTP client or the test mock.
pub trait TestRailApi: ProjectApi + CaseApi + RunApi {}

impl<T: ProjectApi + CaseApi + RunApi> TestRailApi for T {}
