//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

pub mod args;
pub mod case;
pub mod context;
pub mod filter;
pub mod project;
pub mod report;
pub mod run;

pub use args::{GlobalOptions, OutputFormat, PaginationArgs};
pub use context::CommandContext;

use crate::config::Scheme;
use crate::error::{Error, Result};

/// Read a JSON input file of the host runner
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::Other(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&contents)
        .map_err(|e| Error::Other(format!("Failed to parse {}: {}", path.display(), e)))
}

/// testrail-bridge - TestRail API client, result reporter and pre-run filter
#[derive(Parser, Debug)]
#[command(name = "testrail-bridge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// TestRail host, optionally with a port
    #[arg(long, global = true, env = "TESTRAIL_HOST", hide_env = true)]
    pub host: Option<String>,

    /// TestRail user
    #[arg(long, global = true, env = "TESTRAIL_USER", hide_env = true)]
    pub user: Option<String>,

    /// TestRail password or API key
    #[arg(
        long,
        global = true,
        env = "TESTRAIL_PASSWORD",
        hide_env = true,
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Protocol (http, https)
    #[arg(
        long,
        global = true,
        env = "TESTRAIL_SCHEME",
        default_value = "https",
        hide_env = true
    )]
    pub scheme: Scheme,

    /// Hosted instance: API served from the host root, not /testrail/
    #[arg(long, global = true, env = "TESTRAIL_HOSTED", hide_env = true)]
    pub hosted: bool,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "TESTRAIL_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long, global = true, env = "TESTRAIL_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show projects
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Show suites
    #[command(subcommand)]
    Suite(SuiteCommands),

    /// View and add sections
    #[command(subcommand)]
    Section(SectionCommands),

    /// View, add and update test cases
    #[command(subcommand)]
    Case(CaseCommands),

    /// View and add runs
    #[command(subcommand)]
    Run(RunCommands),

    /// List result statuses
    #[command(subcommand)]
    Status(StatusCommands),

    /// Add and list results
    #[command(subcommand)]
    Result(ResultCommands),

    /// Report recorded test outcomes to a run
    #[command(after_help = "\
Listener arguments: host:user:password:run_id[:scheme[:flag...]]
  flags: update   overwrite case title, description and references
         juggler  keep a blocked/retest status when a test fails again
         hosted   API served from the host root
Use ';' instead of ':' when the host has a port, e.g.
  localhost:8080;tester;secret;20;http;update")]
    Report {
        /// Colon-delimited listener arguments
        #[arg(long)]
        listener: String,

        /// JSON file with an array of test outcomes
        outcomes: PathBuf,
    },

    /// Keep only the tests of a suite whose cases are in a run
    #[command(after_help = "\
Modifier arguments: host:user:password:run_id:scheme:results_depth[:status...]
  results_depth  levels of sub-runs (other runs of the run's test plan) to include
  status         status labels to keep, e.g. failed:blocked
Add the global --hosted flag for a hosted instance.
The pruned suite is printed to stdout as JSON.")]
    Filter {
        /// Colon-delimited pre-run modifier arguments
        #[arg(long)]
        modifier: String,

        /// JSON file describing the suite
        suite: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Show a project
    Get { project_id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum SuiteCommands {
    /// Show a suite
    Get { suite_id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum SectionCommands {
    /// Show a section
    Get { section_id: u64 },

    /// List the sections of a project
    List {
        project_id: u64,

        /// Only sections of this suite (required in multi-suite projects)
        #[arg(long)]
        suite: Option<u64>,
    },

    /// Add a section to a project
    Add {
        project_id: u64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        suite: Option<u64>,

        /// Parent section for a nested section
        #[arg(long)]
        parent: Option<u64>,

        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CaseCommands {
    /// Show a test case
    Get { case_id: u64 },

    /// List the test cases of a project
    List {
        project_id: u64,

        #[arg(long)]
        suite: Option<u64>,

        #[arg(long)]
        section: Option<u64>,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Add a test case to a section
    Add {
        section_id: u64,

        #[arg(long)]
        title: String,

        #[command(flatten)]
        fields: CaseFieldArgs,
    },

    /// Update fields of a test case
    Update {
        case_id: u64,

        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        fields: CaseFieldArgs,
    },
}

/// Optional case fields shared by add and update
#[derive(clap::Args, Debug, Default, Clone)]
pub struct CaseFieldArgs {
    #[arg(long)]
    pub type_id: Option<u64>,

    #[arg(long)]
    pub priority_id: Option<u64>,

    /// References, comma-separated
    #[arg(long)]
    pub refs: Option<String>,

    /// Case description (custom_case_description)
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum RunCommands {
    /// Show a run
    Get { run_id: u64 },

    /// Add a run to a project
    Add {
        project_id: u64,

        #[arg(long)]
        suite: Option<u64>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Cases to include; without it the run includes every case
        #[arg(long = "case", value_delimiter = ',')]
        cases: Vec<u64>,
    },

    /// List the tests of a run
    Tests {
        run_id: u64,

        /// Only tests in these statuses (labels, comma-separated)
        #[arg(long = "status", value_delimiter = ',')]
        statuses: Vec<String>,

        #[command(flatten)]
        pagination: PaginationArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum StatusCommands {
    /// List every result status
    List,
}

#[derive(Subcommand, Debug)]
pub enum ResultCommands {
    /// Add a result for a case in a run
    Add {
        run_id: u64,
        case_id: u64,

        /// Status label or id (passed, failed, 5, ...)
        #[arg(long)]
        status: String,

        #[arg(long)]
        comment: Option<String>,

        /// Time spent, e.g. "1m 5s"
        #[arg(long)]
        elapsed: Option<String>,

        /// Defects, comma-separated
        #[arg(long)]
        defects: Option<String>,

        #[arg(long)]
        version: Option<String>,
    },

    /// List the results of a case in a run, newest first
    List {
        run_id: u64,
        case_id: u64,

        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
}
