use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use hw_project::cli::usage_exit_code;
use hw_project::{find_project_root, logging, HwConfig};
use hwbuild::{build, Toolchain};

fn cli() -> Command {
    Command::new("hwbuild")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates a Debug CMake build for the homework project and runs make in it")
        .arg(
            Arg::new("project_root")
                .long("project-root")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Project to build [default: nearest directory with .hwconfig.json]"),
        )
        .arg(
            Arg::new("cmake")
                .long("cmake")
                .env("CMAKE")
                .value_name("EXE")
                .help("Build-system generator executable [default: cmake]"),
        )
        .arg(
            Arg::new("make")
                .long("make")
                .env("MAKE")
                .value_name("EXE")
                .help("Build tool executable [default: make]"),
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
    tracing::debug!("project root: {}", project_root.display());

    let cfg = HwConfig::load_from_root(&project_root)?;
    let toolchain = Toolchain::from_config(
        &cfg,
        matches.get_one::<String>("cmake").map(String::as_str),
        matches.get_one::<String>("make").map(String::as_str),
    )?;
    let build_dir = build(&project_root, &toolchain)?;
    tracing::info!("build complete in {}", build_dir.display());
    Ok(())
}

fn main() -> ExitCode {
    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => return ExitCode::from(usage_exit_code("hwbuild", err)),
    };
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("hwbuild: error: {:#}", err);
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
