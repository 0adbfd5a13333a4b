// crates/hw_project/src/lib.rs

//! Shared plumbing for the homework tools: locating the project root,
//! loading `.hwconfig.json`, CLI exit handling and logging.

pub mod cli;
pub mod config;
pub mod logging;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use config::{ConfigError, HwConfig, CFG_FILENAME};

/// Directory (relative to the project root) the builder generates into.
pub const BUILD_DIR_BASENAME: &str = "cmake-build-debug";

/// Default staging directory, relative to the directory the stager runs in.
pub const DEFAULT_STAGE_DIR: &str = "stage";

/// Name of the file inside the staging directory that remembers the prefix.
pub const PREFIX_FILENAME: &str = ".prefix";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("{} is not inside a hw project (no {} here or above); run hwinit to set one up", start.display(), CFG_FILENAME)]
    NotInProject { start: PathBuf },
}

/// Returns the nearest ancestor of `start` (inclusive) that holds a `.hwconfig.json`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, ProjectError> {
    start
        .ancestors()
        .find(|dir| dir.join(CFG_FILENAME).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| ProjectError::NotInProject {
            start: start.to_path_buf(),
        })
}

/// The staging directory named in the project config, anchored at the project root.
pub fn configured_stage_dir(project_root: &Path, cfg: &HwConfig) -> Option<PathBuf> {
    cfg.stage_dir.as_ref().map(|dir| project_root.join(dir))
}

/// Renders `path` relative to `cwd` when that is shorter than the absolute form.
pub fn describe_path(path: &Path, cwd: &Path) -> String {
    match path.strip_prefix(cwd) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
        _ => path.display().to_string(),
    }
}
