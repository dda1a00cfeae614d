//! Filter command: apply the pre-run filter to a suite description

use colored::Colorize;
use std::path::Path;

use crate::cli::args::GlobalOptions;
use crate::config::PreRunConfig;
use crate::error::Result;
use crate::prerun::PreRunFilter;
use crate::runner::TestSuite;

/// Modifier arguments plus the global `--hosted` flag, which the modifier
/// string has no slot for.
fn prerun_config(opts: &GlobalOptions, modifier_args: &str) -> Result<PreRunConfig> {
    let mut config: PreRunConfig = modifier_args.parse()?;
    config.server.hosted |= opts.hosted;
    Ok(config)
}

/// Run the filter command, printing the pruned suite as JSON
pub async fn run(opts: &GlobalOptions, modifier_args: &str, suite_path: &Path) -> Result<()> {
    let config = prerun_config(opts, modifier_args)?;
    let mut suite: TestSuite = super::read_json(suite_path)?;

    let mut filter = PreRunFilter::from_config(&config)?;
    let report = filter.apply(&mut suite).await?;

    println!("{}", serde_json::to_string_pretty(&suite)?);
    eprintln!(
        "{}",
        format!(
            "{} tests kept, {} removed ({} cases in run {})",
            report.kept,
            report.removed.len(),
            report.included_cases,
            config.run_id
        )
        .dimmed()
    );
    Ok(())
}
