//! Project, suite and section command implementations

use log::debug;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::client::ProjectApi;
use crate::client::models::{NewSection, Project, Section, Suite};
use crate::error::Result;
use crate::output::{
    self,
    display::{ProjectDisplay, SectionDisplay, SuiteDisplay},
};

/// Run the project get command
pub async fn get_project(opts: &GlobalOptions, project_id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let project = ctx.client.get_project(project_id).await?;
    output::print::<Project, ProjectDisplay>(&[project], ctx.format)
}

/// Run the suite get command
pub async fn get_suite(opts: &GlobalOptions, suite_id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let suite = ctx.client.get_suite(suite_id).await?;
    output::print::<Suite, SuiteDisplay>(&[suite], ctx.format)
}

/// Run the section get command
pub async fn get_section(opts: &GlobalOptions, section_id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let section = ctx.client.get_section(section_id).await?;
    output::print::<Section, SectionDisplay>(&[section], ctx.format)
}

/// Run the section list command
pub async fn list_sections(
    opts: &GlobalOptions,
    project_id: u64,
    suite_id: Option<u64>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    debug!("Fetching sections of project {}", project_id);
    let page = ctx.client.get_sections(project_id, suite_id).await?;
    debug!("Fetched {} sections", page.items.len());
    output::print::<Section, SectionDisplay>(&page.items, ctx.format)
}

/// Run the section add command
pub async fn add_section(opts: &GlobalOptions, project_id: u64, section: NewSection) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let created = ctx.client.add_section(project_id, &section).await?;
    output::print::<Section, SectionDisplay>(&[created], ctx.format)
}
