use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use hw_project::cli::usage_exit_code;
use hw_project::logging;
use hwinit::{init_project, DEFAULT_PROJECT_NAME};

fn cli() -> Command {
    Command::new("hwinit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sets up a homework project: .hwconfig.json, root CMakeLists.txt and .gitignore")
        .arg(
            Arg::new("project_dir")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory to initialize [default: current directory]"),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .value_name("NAME")
                .default_value(DEFAULT_PROJECT_NAME)
                .help("CMake project name"),
        )
        .arg(
            Arg::new("unsafe")
                .long("unsafe")
                .help("Initialize even if project files already exist")
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
    let proj_dir = match matches.get_one::<PathBuf>("project_dir") {
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };
    let name = matches
        .get_one::<String>("name")
        .map(String::as_str)
        .unwrap_or(DEFAULT_PROJECT_NAME);
    init_project(&proj_dir, name, matches.get_flag("unsafe"))?;
    tracing::info!("initialized {}", proj_dir.display());
    Ok(())
}

fn main() -> ExitCode {
    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => return ExitCode::from(usage_exit_code("hwinit", err)),
    };
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("hwinit: error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
