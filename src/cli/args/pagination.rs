//! Pagination argument types for CLI commands

use clap::Args;

use crate::client::{MAX_PAGE_SIZE, PageParams};

/// Shared pagination arguments for list commands.
///
/// Flatten this into any command backed by a paged endpoint:
/// ```ignore
/// List {
///     #[command(flatten)]
///     pagination: PaginationArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Maximum results to return (TestRail serves at most 250)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Number of results to skip
    #[arg(long)]
    pub offset: Option<usize>,
}

impl PaginationArgs {
    /// Convert CLI args to API page params, capping the limit at the page size.
    pub fn to_params(&self) -> PageParams {
        let mut params = PageParams::new();
        if let Some(limit) = self.limit {
            params = params.limit(limit.min(MAX_PAGE_SIZE));
        }
        if let Some(offset) = self.offset {
            params = params.offset(offset);
        }
        params
    }
}
