// crates/hw_project/src/cli.rs

use clap::error::ErrorKind;

/// Exit code for a command-line usage error. Kept at 1 so it never collides
/// with the stager's "nothing staged" code.
pub const USAGE_EXIT_CODE: u8 = 1;

/// Reports a failed `try_get_matches` and returns the process exit code.
/// `--help` and `--version` print to stdout and succeed.
pub fn usage_exit_code(tool: &str, err: clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            0
        }
        _ => {
            eprint!("{}: {}", tool, err.render());
            USAGE_EXIT_CODE
        }
    }
}
