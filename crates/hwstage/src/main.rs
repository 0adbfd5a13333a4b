use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use hw_project::cli::usage_exit_code;
use hw_project::{configured_stage_dir, find_project_root, logging, HwConfig, DEFAULT_STAGE_DIR};
use hwstage::{stage, StageError, StageOptions};

fn cli() -> Command {
    Command::new("hwstage")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Copies each question's main.cpp into the staging directory under a prefixed name")
        .arg(
            Arg::new("prefix")
                .help("Prefix for staged file names (saved for later runs)"),
        )
        .arg(
            Arg::new("stage_dir")
                .long("stage-dir")
                .env("STAGE_DIR")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Destination directory [default: stage]"),
        )
        .arg(
            Arg::new("clean")
                .long("clean")
                .help("Remove previously staged files before copying")
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

/// `--stage-dir`/`STAGE_DIR` is relative to the working directory; a
/// `stage_dir` from `.hwconfig.json` is relative to the project root.
fn resolve_stage_dir(matches: &ArgMatches, work_dir: &Path) -> Result<PathBuf> {
    if let Some(dir) = matches.get_one::<PathBuf>("stage_dir") {
        return Ok(work_dir.join(dir));
    }
    if let Ok(root) = find_project_root(work_dir) {
        let cfg = HwConfig::load_from_root(&root)?;
        if let Some(dir) = configured_stage_dir(&root, &cfg) {
            return Ok(dir);
        }
    }
    Ok(work_dir.join(DEFAULT_STAGE_DIR))
}

fn run(matches: &ArgMatches) -> Result<()> {
    logging::init_logging(matches.get_flag("verbose"));

    let work_dir = env::current_dir().context("Failed to get current directory")?;
    let opts = StageOptions {
        stage_dir: resolve_stage_dir(matches, &work_dir)?,
        work_dir,
        prefix: matches.get_one::<String>("prefix").cloned(),
        clean: matches.get_flag("clean"),
    };
    let report = stage(&opts)?;
    tracing::info!(
        "{} file(s) staged in {} with prefix {:?}",
        report.staged.len(),
        opts.stage_dir.display(),
        report.prefix
    );
    Ok(())
}

fn main() -> ExitCode {
    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => return ExitCode::from(usage_exit_code("hwstage", err)),
    };
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("hwstage: error: {:#}", err);
            let code = err
                .downcast_ref::<StageError>()
                .map(StageError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
