//! testrail-bridge CLI

use clap::Parser;

use testrail_bridge::cli::{
    self, CaseCommands, Cli, Commands, GlobalOptions, ProjectCommands, ResultCommands,
    RunCommands, SectionCommands, StatusCommands, SuiteCommands,
};
use testrail_bridge::client::models::{CaseFilter, NewResult, NewRun, NewSection};
use testrail_bridge::error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(format!("testrail_bridge={}", level)),
    )
    .init();

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Project(ProjectCommands::Get { project_id }) => {
            cli::project::get_project(&opts, project_id).await
        }
        Commands::Suite(SuiteCommands::Get { suite_id }) => {
            cli::project::get_suite(&opts, suite_id).await
        }
        Commands::Section(section_cmd) => match section_cmd {
            SectionCommands::Get { section_id } => {
                cli::project::get_section(&opts, section_id).await
            }
            SectionCommands::List { project_id, suite } => {
                cli::project::list_sections(&opts, project_id, suite).await
            }
            SectionCommands::Add {
                project_id,
                name,
                suite,
                parent,
                description,
            } => {
                let section = NewSection {
                    name,
                    suite_id: suite,
                    parent_id: parent,
                    description,
                };
                cli::project::add_section(&opts, project_id, section).await
            }
        },
        Commands::Case(case_cmd) => match case_cmd {
            CaseCommands::Get { case_id } => cli::case::get(&opts, case_id).await,
            CaseCommands::List {
                project_id,
                suite,
                section,
                pagination,
            } => {
                let filter = CaseFilter {
                    suite_id: suite,
                    section_id: section,
                };
                cli::case::list(&opts, project_id, filter, &pagination).await
            }
            CaseCommands::Add {
                section_id,
                title,
                fields,
            } => cli::case::add(&opts, section_id, title, fields).await,
            CaseCommands::Update {
                case_id,
                title,
                fields,
            } => cli::case::update(&opts, case_id, title, fields).await,
        },
        Commands::Run(run_cmd) => match run_cmd {
            RunCommands::Get { run_id } => cli::run::get(&opts, run_id).await,
            RunCommands::Add {
                project_id,
                suite,
                name,
                description,
                cases,
            } => {
                let run = NewRun {
                    name,
                    suite_id: suite,
                    description,
                    include_all: Some(cases.is_empty()),
                    case_ids: (!cases.is_empty()).then_some(cases),
                    ..Default::default()
                };
                cli::run::add(&opts, project_id, run).await
            }
            RunCommands::Tests {
                run_id,
                statuses,
                pagination,
            } => cli::run::tests(&opts, run_id, &statuses, &pagination).await,
        },
        Commands::Status(StatusCommands::List) => cli::run::statuses(&opts).await,
        Commands::Result(result_cmd) => match result_cmd {
            ResultCommands::Add {
                run_id,
                case_id,
                status,
                comment,
                elapsed,
                defects,
                version,
            } => {
                let result = NewResult {
                    status_id: 0,
                    comment,
                    elapsed,
                    defects,
                    version,
                };
                cli::run::add_result(&opts, run_id, case_id, &status, result).await
            }
            ResultCommands::List {
                run_id,
                case_id,
                limit,
            } => cli::run::list_results(&opts, run_id, case_id, limit).await,
        },
        Commands::Report { listener, outcomes } => {
            cli::report::run(&opts, &listener, &outcomes).await
        }
        Commands::Filter { modifier, suite } => cli::filter::run(&opts, &modifier, &suite).await,
    }
}
