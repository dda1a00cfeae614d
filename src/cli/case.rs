//! Test case command implementations

use colored::Colorize;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{CaseFieldArgs, CommandContext, PaginationArgs};
use crate::client::CaseApi;
use crate::client::models::{Case, CaseFilter, CaseUpdate, NewCase};
use crate::error::{Error, Result};
use crate::output::{self, display::CaseDisplay};

/// Run the case get command
pub async fn get(opts: &GlobalOptions, case_id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let case = ctx.client.get_case(case_id).await?;
    output::print::<Case, CaseDisplay>(&[case], ctx.format)
}

/// Run the case list command
pub async fn list(
    opts: &GlobalOptions,
    project_id: u64,
    filter: CaseFilter,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    debug!("Fetching cases of project {} ({:?})", project_id, filter);

    let page = ctx
        .client
        .get_cases(project_id, &filter, &pagination.to_params())
        .await?;
    output::print::<Case, CaseDisplay>(&page.items, ctx.format)?;

    if page.has_more() {
        eprintln!(
            "{}",
            format!("More cases available: --offset {}", page.next_offset()).dimmed()
        );
    }
    Ok(())
}

/// Run the case add command
pub async fn add(
    opts: &GlobalOptions,
    section_id: u64,
    title: String,
    fields: CaseFieldArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let case = NewCase {
        title,
        type_id: fields.type_id,
        priority_id: fields.priority_id,
        refs: fields.refs,
        custom_case_description: fields.description,
        ..Default::default()
    };

    let created = ctx.client.add_case(section_id, &case).await?;
    output::print::<Case, CaseDisplay>(&[created], ctx.format)
}

/// Run the case update command
pub async fn update(
    opts: &GlobalOptions,
    case_id: u64,
    title: Option<String>,
    fields: CaseFieldArgs,
) -> Result<()> {
    let update = CaseUpdate {
        title,
        type_id: fields.type_id,
        priority_id: fields.priority_id,
        refs: fields.refs,
        custom_case_description: fields.description,
    };
    if update == CaseUpdate::default() {
        return Err(Error::Other(
            "Nothing to update: pass at least one field".to_string(),
        ));
    }

    let ctx = CommandContext::new(opts)?;
    let updated = ctx.client.update_case(case_id, &update).await?;
    output::print::<Case, CaseDisplay>(&[updated], ctx.format)
}
