//! Report command: replay recorded outcomes through the result listener

use colored::Colorize;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::config::ListenerConfig;
use crate::error::Result;
use crate::listener::{ReportSummary, ResultListener};
use crate::output::json;
use crate::runner::{self, TestOutcome};

/// Run the report command
pub async fn run(opts: &GlobalOptions, listener_args: &str, outcomes_path: &Path) -> Result<()> {
    // Arguments are checked before anything is read or sent.
    let config: ListenerConfig = listener_args.parse()?;
    let outcomes: Vec<TestOutcome> = super::read_json(outcomes_path)?;

    let mut listener = ResultListener::from_config(&config)?;
    runner::replay(&mut listener, &outcomes).await;

    print_summary(config.run_id, &listener.summary(), opts.format)
}

fn print_summary(run_id: u64, summary: &ReportSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", json::format_json(summary)?),
        OutputFormat::Table => {
            println!("Run {}:", run_id);
            println!("  {} {}", "submitted".green(), summary.submitted);
            println!("  {} {}", "skipped".yellow(), summary.skipped);
            if summary.has_failures() {
                println!("  {} {}", "failed".red(), summary.failed);
                if summary.update_failed > 0 {
                    println!("  {} {}", "case updates failed".red(), summary.update_failed);
                }
            }
        }
    }
    Ok(())
}
