use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use hw_project::cli::usage_exit_code;
use hw_project::{configured_stage_dir, find_project_root, logging, HwConfig, DEFAULT_STAGE_DIR};
use hwclean::{clean, CleanOptions};

fn cli() -> Command {
    Command::new("hwclean")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Deletes cmake-build* directories and staged files from the homework project")
        .arg(
            Arg::new("project_root")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Project to clean [default: nearest directory with .hwconfig.json]"),
        )
        .arg(
            Arg::new("stage_dir")
                .long("stage-dir")
                .env("STAGE_DIR")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Staging directory, relative to the project root [default: stage]"),
        )
        .arg(
            Arg::new("all")
                .long("all")
                .help("Also delete the saved prefix and the staging directory")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
}

fn run(matches: &ArgMatches) -> Result<()> {
    logging::init_logging(matches.get_flag("verbose"));

    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let project_root = match matches.get_one::<PathBuf>("project_root") {
        Some(dir) => current_dir.join(dir),
        None => find_project_root(&current_dir)?,
    };
    let stage_dir = match matches.get_one::<PathBuf>("stage_dir") {
        Some(dir) => project_root.join(dir),
        None => configured_stage_dir(&project_root, &HwConfig::load_from_root(&project_root)?)
            .unwrap_or_else(|| project_root.join(DEFAULT_STAGE_DIR)),
    };

    let opts = CleanOptions {
        stage_dir,
        project_root,
        all: matches.get_flag("all"),
    };
    let report = clean(&opts)?;
    tracing::info!(
        "removed {} build directories and {} staged files",
        report.build_dirs.len(),
        report.staged.files + report.staged.dirs
    );
    Ok(())
}

fn main() -> ExitCode {
    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => return ExitCode::from(usage_exit_code("hwclean", err)),
    };
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("hwclean: error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::cli;

    #[test]
    fn test_cli_is_well_formed() {
        cli().debug_assert();
    }
}
