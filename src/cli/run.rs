//! Run, status and result command implementations

use colored::Colorize;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, PaginationArgs};
use crate::client::RunApi;
use crate::client::models::{NewResult, NewRun, Run, Status, StatusId, Test, TestResult};
use crate::error::Result;
use crate::output::{
    self,
    display::{ResultDisplay, RunDisplay, StatusDisplay, TestDisplay},
};

/// Run the run get command
pub async fn get(opts: &GlobalOptions, run_id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let run = ctx.client.get_run(run_id).await?;
    output::print::<Run, RunDisplay>(&[run], ctx.format)
}

/// Run the run add command
pub async fn add(opts: &GlobalOptions, project_id: u64, run: NewRun) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let created = ctx.client.add_run(project_id, &run).await?;
    output::print::<Run, RunDisplay>(&[created], ctx.format)
}

/// Run the run tests command
pub async fn tests(
    opts: &GlobalOptions,
    run_id: u64,
    statuses: &[String],
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let mut status_ids = Vec::with_capacity(statuses.len());
    for label in statuses {
        status_ids.push(resolve_status(&ctx, label).await?);
    }
    debug!("Fetching tests of run {} in statuses {:?}", run_id, status_ids);

    let page = ctx
        .client
        .get_tests(run_id, &status_ids, &pagination.to_params())
        .await?;
    output::print::<Test, TestDisplay>(&page.items, ctx.format)?;

    if page.has_more() {
        eprintln!(
            "{}",
            format!("More tests available: --offset {}", page.next_offset()).dimmed()
        );
    }
    Ok(())
}

/// Run the status list command
pub async fn statuses(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let statuses = ctx.client.get_statuses().await?;
    output::print::<Status, StatusDisplay>(&statuses, ctx.format)
}

/// Run the result add command
pub async fn add_result(
    opts: &GlobalOptions,
    run_id: u64,
    case_id: u64,
    status: &str,
    mut result: NewResult,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    result.status_id = resolve_status(&ctx, status).await?;

    let created = ctx
        .client
        .add_result_for_case(run_id, case_id, &result)
        .await?;
    output::print::<TestResult, ResultDisplay>(&[created], ctx.format)
}

/// Run the result list command
pub async fn list_results(
    opts: &GlobalOptions,
    run_id: u64,
    case_id: u64,
    limit: Option<usize>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let page = ctx
        .client
        .get_results_for_case(run_id, case_id, limit)
        .await?;
    output::print::<TestResult, ResultDisplay>(&page.items, ctx.format)
}

/// A numeric status is taken as an id, anything else as a label.
async fn resolve_status(ctx: &CommandContext, status: &str) -> Result<StatusId> {
    match status.trim().parse::<StatusId>() {
        Ok(id) => Ok(id),
        Err(_) => ctx.client.status_id_by_label(status).await,
    }
}
