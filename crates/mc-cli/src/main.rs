//! `medicare` command-line entry point

use anyhow::{Context, Result};
use clap::ArgMatches;
use mc_cli::{command, logging, CliConfig, OutputFormat, Shell};
use mc_core::Repository;
use mc_store::DirStore;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = command().get_matches();
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    logging::init(matches.get_count("verbose"), config.log_level.as_deref());

    let data_dir = config.resolve_data_dir(matches.get_one::<PathBuf>("data-dir").map(PathBuf::as_path));
    let store = DirStore::open(data_dir.clone())
        .with_context(|| format!("cannot open data directory {}", data_dir.display()))?;
    let repo = Repository::open(store, config.repository);

    let format = if matches.get_flag("json") {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let today = chrono::Local::now().date_naive();
    let mut shell = Shell::new(repo, std::io::stdout().lock(), format, today);

    let outcome = shell.run(matches);
    for warning in shell.warnings() {
        eprintln!("warning: {warning}");
    }
    outcome
}
