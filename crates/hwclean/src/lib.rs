// crates/hwclean/src/lib.rs

//! Removes generated build directories and staged output from a project.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hwstage::{clear_stage_dir, Cleared, StageError};
use thiserror::Error;
use walkdir::WalkDir;

/// Directories whose name starts with this are build output.
pub const BUILD_DIR_PREFIX: &str = "cmake-build";

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("failed to walk project tree")]
    Walk(#[from] walkdir::Error),

    #[error("failed to remove {}", path.display())]
    Remove { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Stage(#[from] StageError),
}

#[derive(Clone, Debug)]
pub struct CleanOptions {
    pub project_root: PathBuf,
    pub stage_dir: PathBuf,
    /// Also delete the saved prefix and the staging directory itself.
    pub all: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub build_dirs: Vec<PathBuf>,
    pub staged: Cleared,
}

/// Lists every `cmake-build*` directory under `root`, without descending into them.
pub fn find_build_dirs(root: &Path) -> Result<Vec<PathBuf>, CleanError> {
    let mut found = Vec::new();
    let mut it = WalkDir::new(root)
        .min_depth(1)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
        .into_iter();
    while let Some(entry) = it.next() {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with(BUILD_DIR_PREFIX) {
            found.push(entry.into_path());
            it.skip_current_dir();
        }
    }
    Ok(found)
}

pub fn clean(opts: &CleanOptions) -> Result<CleanReport, CleanError> {
    let build_dirs = find_build_dirs(&opts.project_root)?;
    for dir in &build_dirs {
        tracing::debug!("deleting directory {}", dir.display());
        fs::remove_dir_all(dir).map_err(|source| CleanError::Remove {
            path: dir.clone(),
            source,
        })?;
    }

    let staged = clear_stage_dir(&opts.stage_dir, !opts.all)?;
    if opts.all && opts.stage_dir.is_dir() {
        fs::remove_dir(&opts.stage_dir).map_err(|source| CleanError::Remove {
            path: opts.stage_dir.clone(),
            source,
        })?;
        tracing::debug!("deleted {}", opts.stage_dir.display());
    }

    Ok(CleanReport { build_dirs, staged })
}
